//! Team Entity

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// `teams` 컬렉션 문서
///
/// 소속 회원 목록은 저장하지 않습니다. 회원 쪽 `team_id`를 `$lookup`으로 역조회합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
}

impl Team {
    pub const COLLECTION: &'static str = "teams";

    pub fn new(name: impl Into<String>) -> Self {
        Self { id: None, name: name.into() }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_unsaved_team_serializes_without_id() {
        let document = bson::to_document(&Team::new("teamA")).unwrap();
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("name").unwrap(), "teamA");
    }
}
