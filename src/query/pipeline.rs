//! # 회원-팀 집계 파이프라인
//!
//! 조인, 필터, 프로젝션, 정렬, 페이징을 MongoDB aggregation 단계로 조립합니다.
//! 모든 함수는 순수 함수이며 실행은 리포지토리가 담당합니다.
//!
//! ```text
//! members ─$lookup(teams)─▶ $unwind(preserve) ─▶ $match ─▶ $project ─▶ $sort ─▶ $skip ─▶ $limit
//! ```
//!
//! `$unwind`에서 빈 배열을 보존하므로 팀이 없는 회원도 결과에 남습니다 (left join).
//! 팀 통계처럼 팀이 있는 회원만 필요하면 [`inner_join_team_stages`]를 씁니다.

use mongodb::bson::{Document, doc};
use crate::domain::entities::teams::team::Team;
use crate::query::pageable::{Pageable, SortOrder, TIEBREAK_PROPERTY};
use crate::query::predicate::Predicate;

/// `$facet` 결과에서 내용 배열의 키
pub const FACET_CONTENT: &str = "content";
/// `$facet` / `$count` 결과에서 개수의 키
pub const COUNT_FIELD: &str = "count";

fn lookup_team_stage() -> Document {
    doc! {
        "$lookup": {
            "from": Team::COLLECTION,
            "localField": "team_id",
            "foreignField": "_id",
            "as": "team",
        }
    }
}

/// 회원 → 팀 left join
pub fn left_join_team_stages() -> Vec<Document> {
    vec![
        lookup_team_stage(),
        doc! { "$unwind": { "path": "$team", "preserveNullAndEmptyArrays": true } },
    ]
}

/// 회원 → 팀 inner join (팀이 없는 회원 제외)
pub fn inner_join_team_stages() -> Vec<Document> {
    vec![lookup_team_stage(), doc! { "$unwind": "$team" }]
}

/// 조건이 없으면 `$match` 단계를 만들지 않습니다.
pub fn match_stage(predicate: &Predicate) -> Option<Document> {
    if predicate.is_always() {
        return None;
    }
    Some(doc! { "$match": predicate.to_document() })
}

/// 조인 결과를 평평한 `MemberTeamDto` 모양으로 바꿉니다.
pub fn project_member_team_stage() -> Document {
    doc! {
        "$project": {
            "_id": 0,
            "member_id": "$_id",
            "username": 1,
            "age": 1,
            "team_id": "$team._id",
            "team_name": "$team.name",
        }
    }
}

/// 요청 순서대로 정렬하고, 같은 값끼리는 `member_id` 오름차순으로 고정합니다.
pub fn sort_stage(sort: &[SortOrder]) -> Document {
    let mut keys = Document::new();
    for order in sort {
        if !keys.contains_key(&order.property) {
            keys.insert(order.property.clone(), order.direction.as_mongo());
        }
    }
    if !keys.contains_key(TIEBREAK_PROPERTY) {
        keys.insert(TIEBREAK_PROPERTY, 1);
    }
    doc! { "$sort": keys }
}

fn filtered_join(predicate: &Predicate) -> Vec<Document> {
    let mut pipeline = left_join_team_stages();
    pipeline.extend(match_stage(predicate));
    pipeline
}

/// 조건에 맞는 회원-팀 행 목록 (페이징 없음)
pub fn member_team_pipeline(predicate: &Predicate, sort: &[SortOrder]) -> Vec<Document> {
    let mut pipeline = filtered_join(predicate);
    pipeline.push(project_member_team_stage());
    pipeline.push(sort_stage(sort));
    pipeline
}

/// 한 페이지 분량의 회원-팀 행
pub fn member_team_page_pipeline(predicate: &Predicate, pageable: &Pageable) -> Vec<Document> {
    let mut pipeline = member_team_pipeline(predicate, &pageable.sort);
    pipeline.extend(page_stages(pageable));
    pipeline
}

fn page_stages(pageable: &Pageable) -> [Document; 2] {
    [
        doc! { "$skip": to_i64(pageable.offset()) },
        doc! { "$limit": to_i64(pageable.size) },
    ]
}

/// 내용과 전체 개수를 한 번에 가져오는 `$facet` 파이프라인
///
/// 결과 문서: `{ "content": [ ... ], "count": [ { "count": n } ] }`
pub fn member_team_facet_pipeline(predicate: &Predicate, pageable: &Pageable) -> Vec<Document> {
    let mut content = vec![project_member_team_stage(), sort_stage(&pageable.sort)];
    content.extend(page_stages(pageable));

    let mut pipeline = filtered_join(predicate);
    pipeline.push(doc! {
        "$facet": {
            "content": content,
            "count": [ { "$count": COUNT_FIELD } ],
        }
    });
    pipeline
}

/// 조건에 맞는 조인 행 개수. 결과가 없으면 문서도 없습니다.
pub fn count_pipeline(predicate: &Predicate) -> Vec<Document> {
    let mut pipeline = filtered_join(predicate);
    pipeline.push(doc! { "$count": COUNT_FIELD });
    pipeline
}

/// 전체 회원의 나이 집계 (count, sum, avg, max, min)
pub fn age_statistics_pipeline() -> Vec<Document> {
    vec![doc! {
        "$group": {
            "_id": null,
            "count": { "$sum": 1 },
            "sum_age": { "$sum": "$age" },
            "avg_age": { "$avg": "$age" },
            "max_age": { "$max": "$age" },
            "min_age": { "$min": "$age" },
        }
    }]
}

/// 팀 이름별 평균 나이와 인원 (팀 이름 오름차순)
pub fn team_age_statistics_pipeline() -> Vec<Document> {
    let mut pipeline = inner_join_team_stages();
    pipeline.push(doc! {
        "$group": {
            "_id": "$team.name",
            "avg_age": { "$avg": "$age" },
            "member_count": { "$sum": 1 },
        }
    });
    pipeline.push(doc! { "$sort": { "_id": 1 } });
    pipeline.push(doc! {
        "$project": { "_id": 0, "team_name": "$_id", "avg_age": 1, "member_count": 1 }
    });
    pipeline
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_names(pipeline: &[Document]) -> Vec<String> {
        pipeline
            .iter()
            .filter_map(|stage| stage.keys().next().cloned())
            .collect()
    }

    #[test]
    fn test_left_join_preserves_members_without_team() {
        let stages = left_join_team_stages();
        let unwind = stages[1].get_document("$unwind").unwrap();
        assert!(unwind.get_bool("preserveNullAndEmptyArrays").unwrap());

        let lookup = stages[0].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "teams");
    }

    #[test]
    fn test_inner_join_drops_members_without_team() {
        let stages = inner_join_team_stages();
        assert_eq!(stages[1], doc! { "$unwind": "$team" });
    }

    #[test]
    fn test_always_predicate_has_no_match_stage() {
        assert!(match_stage(&Predicate::Always).is_none());

        let pipeline = member_team_pipeline(&Predicate::Always, &[]);
        assert_eq!(stage_names(&pipeline), vec!["$lookup", "$unwind", "$project", "$sort"]);
    }

    #[test]
    fn test_page_pipeline_stage_order() {
        let predicate = Predicate::eq("team.name", "teamB");
        let pageable = Pageable { page: 2, size: 5, sort: vec![SortOrder::desc("age")] };
        let pipeline = member_team_page_pipeline(&predicate, &pageable);

        assert_eq!(
            stage_names(&pipeline),
            vec!["$lookup", "$unwind", "$match", "$project", "$sort", "$skip", "$limit"]
        );
        assert_eq!(pipeline[2], doc! { "$match": { "team.name": "teamB" } });
        assert_eq!(pipeline[5], doc! { "$skip": 10_i64 });
        assert_eq!(pipeline[6], doc! { "$limit": 5_i64 });
    }

    #[test]
    fn test_sort_stage_appends_tiebreak_once() {
        assert_eq!(sort_stage(&[]), doc! { "$sort": { "member_id": 1 } });
        assert_eq!(
            sort_stage(&[SortOrder::desc("age"), SortOrder::asc("username")]),
            doc! { "$sort": { "age": -1, "username": 1, "member_id": 1 } }
        );
        assert_eq!(
            sort_stage(&[SortOrder::desc("member_id"), SortOrder::asc("member_id")]),
            doc! { "$sort": { "member_id": -1 } }
        );
    }

    #[test]
    fn test_facet_pipeline_carries_content_and_count() {
        let pageable = Pageable { page: 0, size: 3, sort: Vec::new() };
        let pipeline = member_team_facet_pipeline(&Predicate::goe("age", 10), &pageable);

        let facet = pipeline.last().unwrap().get_document("$facet").unwrap();
        assert_eq!(facet.get_array(FACET_CONTENT).unwrap().len(), 4);
        assert_eq!(facet.get_array(COUNT_FIELD).unwrap().len(), 1);
    }

    #[test]
    fn test_count_pipeline_ends_with_count() {
        let pipeline = count_pipeline(&Predicate::Always);
        assert_eq!(pipeline.last().unwrap(), &doc! { "$count": "count" });
    }

    #[test]
    fn test_team_statistics_uses_inner_join_and_sorts_by_name() {
        let pipeline = team_age_statistics_pipeline();
        assert_eq!(
            stage_names(&pipeline),
            vec!["$lookup", "$unwind", "$group", "$sort", "$project"]
        );
        assert_eq!(pipeline[1], doc! { "$unwind": "$team" });
    }
}
