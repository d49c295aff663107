//! 회원 등록 및 벌크 연산 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /api/v1/members`
///
/// `team_name`이 있으면 해당 이름의 기존 팀에 소속시킵니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 50, message = "회원 이름은 1-50자 사이여야 합니다"))]
    pub username: String,

    #[validate(range(min = 0, max = 200, message = "나이는 0-200 사이여야 합니다"))]
    pub age: i32,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub team_name: Option<String>,
}

/// `POST /api/v1/members/bulk/rename` - `age < age_lt`인 회원의 이름 일괄 변경
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkRenameRequest {
    pub age_lt: i32,

    #[validate(length(min = 1, max = 50, message = "변경할 이름은 1-50자 사이여야 합니다"))]
    pub username: String,
}

/// `POST /api/v1/members/bulk/add-age` - 전체 회원 나이에 `delta` 더하기
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkAddAgeRequest {
    #[validate(range(min = -200, max = 200, message = "나이 변화량은 -200에서 200 사이여야 합니다"))]
    pub delta: i32,
}

/// `POST /api/v1/members/bulk/delete` - `age > age_gt`인 회원 일괄 삭제
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    pub age_gt: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_member_request_validation() {
        let ok = CreateMemberRequest { username: "member1".to_string(), age: 10, team_name: None };
        assert!(ok.validate().is_ok());

        let blank = CreateMemberRequest { username: "".to_string(), age: 10, team_name: None };
        assert!(blank.validate().is_err());

        let negative = CreateMemberRequest { username: "member1".to_string(), age: -1, team_name: None };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_create_member_request_blank_team_is_none() {
        let request: CreateMemberRequest =
            serde_json::from_str(r#"{"username": "member1", "age": 10, "team_name": "  "}"#).unwrap();
        assert_eq!(request.team_name, None);

        let request: CreateMemberRequest =
            serde_json::from_str(r#"{"username": "member1", "age": 10}"#).unwrap();
        assert_eq!(request.team_name, None);
    }

    #[test]
    fn test_bulk_requests_validation() {
        assert!(BulkRenameRequest { age_lt: 28, username: "비회원".to_string() }.validate().is_ok());
        assert!(BulkRenameRequest { age_lt: 28, username: String::new() }.validate().is_err());
        assert!(BulkAddAgeRequest { delta: 1 }.validate().is_ok());
        assert!(BulkAddAgeRequest { delta: 1000 }.validate().is_err());
    }
}
