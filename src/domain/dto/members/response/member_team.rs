//! 회원-팀 조인 결과 프로젝션

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::domain::entities::members::member::Member;
use crate::domain::entities::teams::team::Team;
use crate::query::member_filter::fields;
use crate::query::predicate::{FieldValue, Record};

/// 회원-팀 조인 결과 한 행
///
/// 검색 결과마다 새로 만들어지는 읽기 전용 값이며 캐싱하지 않습니다.
/// 팀이 없는 회원은 `team_id` / `team_name`이 `None`입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberTeamDto {
    pub member_id: String,
    pub username: String,
    pub age: i32,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
}

impl MemberTeamDto {
    /// `team`은 `(team_id, team_name)`
    pub fn new(
        member_id: impl Into<String>,
        username: impl Into<String>,
        age: i32,
        team: Option<(&str, &str)>,
    ) -> Self {
        let (team_id, team_name) = match team {
            Some((id, name)) => (Some(id.to_string()), Some(name.to_string())),
            None => (None, None),
        };

        Self {
            member_id: member_id.into(),
            username: username.into(),
            age,
            team_id,
            team_name,
        }
    }

    /// 저장된 회원과 (있다면) 소속 팀으로 만듭니다.
    pub fn from_member(member: &Member, team: Option<&Team>) -> Self {
        Self {
            member_id: member.id_string().unwrap_or_default(),
            username: member.username.clone(),
            age: member.age,
            team_id: team.and_then(Team::id_string),
            team_name: team.map(|t| t.name.clone()),
        }
    }
}

/// 조인 뷰 경로(`team.name`)를 평평한 필드에 대응시킵니다.
impl Record for MemberTeamDto {
    fn field(&self, path: &str) -> Option<FieldValue> {
        match path {
            fields::USERNAME => Some(FieldValue::from(self.username.as_str())),
            fields::AGE => Some(FieldValue::from(self.age)),
            fields::TEAM_NAME => self.team_name.as_deref().map(FieldValue::from),
            fields::TEAM_ID => self.team_id.as_deref().map(FieldValue::from),
            fields::MEMBER_ID => Some(FieldValue::from(self.member_id.as_str())),
            _ => None,
        }
    }
}

/// `$project` 단계가 돌려주는 문서 모양
///
/// ObjectId를 그대로 받은 뒤 [`MemberTeamDto`]로 변환합니다.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberTeamRow {
    pub member_id: ObjectId,
    pub username: String,
    pub age: i32,
    #[serde(default)]
    pub team_id: Option<ObjectId>,
    #[serde(default)]
    pub team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberTeamDto {
    fn from(row: MemberTeamRow) -> Self {
        Self {
            member_id: row.member_id.to_hex(),
            username: row.username,
            age: row.age,
            team_id: row.team_id.map(|id| id.to_hex()),
            team_name: row.team_name,
        }
    }
}

/// 이름과 나이만 담는 단순 프로젝션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDto {
    pub username: String,
    pub age: i32,
}

impl From<&Member> for MemberDto {
    fn from(member: &Member) -> Self {
        Self { username: member.username.clone(), age: member.age }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_row_with_team_converts_to_hex_ids() {
        let member_id = ObjectId::new();
        let team_id = ObjectId::new();
        let document = doc! {
            "member_id": member_id,
            "username": "member1",
            "age": 10,
            "team_id": team_id,
            "team_name": "teamA",
        };

        let row: MemberTeamRow = bson::from_document(document).unwrap();
        let dto = MemberTeamDto::from(row);

        assert_eq!(dto.member_id, member_id.to_hex());
        assert_eq!(dto.team_id, Some(team_id.to_hex()));
        assert_eq!(dto.team_name.as_deref(), Some("teamA"));
    }

    #[test]
    fn test_row_without_team_from_left_join() {
        let document = doc! { "member_id": ObjectId::new(), "username": "loner", "age": 50 };

        let dto = MemberTeamDto::from(bson::from_document::<MemberTeamRow>(document).unwrap());
        assert_eq!(dto.team_id, None);
        assert_eq!(dto.team_name, None);
    }

    #[test]
    fn test_from_member_with_and_without_team() {
        let team = Team { id: Some(ObjectId::new()), name: "teamB".to_string() };
        let mut member = Member::with_team("member2", 20, &team);
        member.id = Some(ObjectId::new());

        let dto = MemberTeamDto::from_member(&member, Some(&team));
        assert_eq!(dto.team_name.as_deref(), Some("teamB"));
        assert_eq!(dto.member_id, member.id_string().unwrap());

        let dto = MemberTeamDto::from_member(&member, None);
        assert_eq!(dto.team_id, None);
    }

    #[test]
    fn test_member_dto_projection() {
        let dto = MemberDto::from(&Member::with_age("member1", 10));
        assert_eq!(dto, MemberDto { username: "member1".to_string(), age: 10 });
    }
}
