//! 회원 검색 조건과 페이징/정렬 쿼리 파라미터

use serde::{Deserialize, Deserializer, Serialize};

/// 회원 검색 조건
///
/// 모든 필드는 독립적인 선택 값이며 필드 간 검증은 하지 않습니다.
/// `age_goe > age_loe`도 허용되며 결과가 비어 있을 뿐입니다.
///
/// `GET /api/v1/members?username=member1&team_name=teamA&age_goe=10&age_loe=30`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_age")]
    pub age_goe: Option<i32>,
    #[serde(deserialize_with = "deserialize_optional_age")]
    pub age_loe: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AgeParam {
    Number(i32),
    Text(String),
}

/// 나이 파라미터. 쿼리 스트링의 `age_goe=`처럼 빈 값은 생략으로 봅니다.
fn deserialize_optional_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AgeParam>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AgeParam::Number(age)) => Ok(Some(age)),
        Some(AgeParam::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(AgeParam::Text(text)) => text
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("나이는 정수여야 합니다: {}", text))),
    }
}

/// 페이지 요청 파라미터 (`page`는 0부터)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    /// `age:desc,username`
    pub sort: Option<String>,
}

/// 목록 조회용 정렬 파라미터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortQuery {
    pub sort: Option<String>,
}

/// 단순 목록 조회 파라미터 (`?username=member1`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn test_condition_from_query_string() {
        let query = Query::<MemberSearchCondition>::from_query(
            "username=member1&team_name=teamB&age_goe=35&age_loe=40",
        )
        .unwrap();

        assert_eq!(query.username.as_deref(), Some("member1"));
        assert_eq!(query.team_name.as_deref(), Some("teamB"));
        assert_eq!(query.age_goe, Some(35));
        assert_eq!(query.age_loe, Some(40));
    }

    #[test]
    fn test_empty_query_string_is_empty_condition() {
        let query = Query::<MemberSearchCondition>::from_query("").unwrap();
        assert_eq!(query.into_inner(), MemberSearchCondition::default());
    }

    #[test]
    fn test_blank_age_is_absent_and_blank_name_is_kept() {
        let query = Query::<MemberSearchCondition>::from_query("username=&age_goe=&age_loe=-5").unwrap();

        assert_eq!(query.username.as_deref(), Some(""));
        assert_eq!(query.age_goe, None);
        assert_eq!(query.age_loe, Some(-5));
    }

    #[test]
    fn test_non_numeric_age_is_rejected() {
        assert!(Query::<MemberSearchCondition>::from_query("age_goe=old").is_err());
    }

    #[test]
    fn test_condition_ignores_paging_parameters() {
        let condition = Query::<MemberSearchCondition>::from_query("age_goe=10&page=2&size=5").unwrap();
        let page = Query::<PageQuery>::from_query("age_goe=10&page=2&size=5").unwrap();

        assert_eq!(condition.age_goe, Some(10));
        assert_eq!(page.page, Some(2));
        assert_eq!(page.size, Some(5));
        assert_eq!(page.sort, None);
    }

    #[test]
    fn test_username_query() {
        let query = Query::<UsernameQuery>::from_query("username=member7").unwrap();
        assert_eq!(query.username.as_deref(), Some("member7"));

        let empty = Query::<UsernameQuery>::from_query("").unwrap();
        assert_eq!(empty.username, None);
    }

    #[test]
    fn test_condition_from_json_numbers() {
        let condition: MemberSearchCondition =
            serde_json::from_str(r#"{"age_goe": 20, "team_name": "teamA"}"#).unwrap();
        assert_eq!(condition.age_goe, Some(20));
        assert_eq!(condition.age_loe, None);
    }
}
