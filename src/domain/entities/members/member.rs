//! Member Entity
//!
//! 회원은 이름, 나이, 소속 팀 참조(`team_id`)를 가집니다.
//! 팀은 참조로만 연결되며 조회 시 `$lookup`으로 조인합니다.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::domain::entities::teams::team::Team;
use crate::query::member_filter::fields;
use crate::query::predicate::{FieldValue, Record};

/// `members` 컬렉션 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub age: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<ObjectId>,
}

impl Member {
    pub const COLLECTION: &'static str = "members";

    /// 나이 0, 팀 없음
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_age(username, 0)
    }

    pub fn with_age(username: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            username: username.into(),
            age,
            team_id: None,
        }
    }

    pub fn with_team(username: impl Into<String>, age: i32, team: &Team) -> Self {
        let mut member = Self::with_age(username, age);
        member.change_team(team);
        member
    }

    /// 소속 팀을 바꿉니다. 저장되지 않은 팀이면 팀 참조가 비워집니다.
    pub fn change_team(&mut self, team: &Team) {
        self.team_id = team.id;
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

/// 조인 없는 회원 문서 기준의 평가. 팀 이름은 알 수 없으므로 `None`입니다.
impl Record for Member {
    fn field(&self, path: &str) -> Option<FieldValue> {
        match path {
            fields::USERNAME => Some(FieldValue::from(self.username.as_str())),
            fields::AGE => Some(FieldValue::from(self.age)),
            _ => None,
        }
    }
}
