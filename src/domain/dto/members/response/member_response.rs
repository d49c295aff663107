//! 통계 및 벌크 연산 응답 DTO

use serde::{Deserialize, Serialize};

/// 전체 회원 나이 집계
///
/// 회원이 없으면 모든 값이 0입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberAgeStats {
    pub count: i64,
    pub sum_age: i64,
    pub avg_age: f64,
    pub max_age: i32,
    pub min_age: i32,
}

/// 팀별 평균 나이
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAgeStats {
    pub team_name: String,
    pub avg_age: f64,
    pub member_count: i64,
}

/// 벌크 수정/삭제 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateResponse {
    pub affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_age_stats_from_group_document() {
        let document = doc! {
            "_id": null,
            "count": 4,
            "sum_age": 100,
            "avg_age": 25.0,
            "max_age": 40,
            "min_age": 10,
        };

        let stats: MemberAgeStats = bson::from_document(document).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.sum_age, 100);
        assert_eq!(stats.avg_age, 25.0);
        assert_eq!(stats.max_age, 40);
        assert_eq!(stats.min_age, 10);
    }

    #[test]
    fn test_team_stats_from_projected_document() {
        let document = doc! { "team_name": "teamA", "avg_age": 15.0, "member_count": 2 };
        let stats: TeamAgeStats = bson::from_document(document).unwrap();

        assert_eq!(stats.team_name, "teamA");
        assert_eq!(stats.member_count, 2);
    }
}
