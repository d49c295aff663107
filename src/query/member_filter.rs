//! # 회원 검색 동적 필터
//!
//! [`MemberSearchCondition`]의 채워진 필드만 골라 [`Predicate`]로 만듭니다.
//! 두 가지 방식을 제공하며 결과 일치 집합은 항상 같습니다.
//!
//! - [`build_filter`] - 빌더로 하나의 조건식을 완성해 넘기는 방식
//! - [`build_filter_clauses`] - 필드별 조건을 목록으로 넘기고 호출자가 AND로 접는 방식
//!
//! | 필드 | 조건 | 무시되는 경우 |
//! |------|------|---------------|
//! | `username` | `username == v` | 없음, 빈 문자열, 공백만 |
//! | `team_name` | `team.name == v` | 없음, 빈 문자열, 공백만 |
//! | `age_goe` | `age >= v` | 없음 |
//! | `age_loe` | `age <= v` | 없음 |
//!
//! 문자열 값은 공백 제거 없이 그대로 비교합니다. 나이 0이나 음수도 유효한 조건입니다.
//! 이 모듈은 I/O가 없고 실패하지 않습니다.

use crate::domain::dto::members::request::MemberSearchCondition;
use crate::query::predicate::{Predicate, PredicateBuilder};
use crate::utils::string_utils::has_text;

/// 회원-팀 조인 뷰의 필드 경로
pub mod fields {
    pub const MEMBER_ID: &str = "_id";
    pub const USERNAME: &str = "username";
    pub const AGE: &str = "age";
    pub const TEAM_ID: &str = "team_id";
    pub const TEAM_NAME: &str = "team.name";
}

pub fn username_eq(condition: &MemberSearchCondition) -> Option<Predicate> {
    let username = condition.username.as_deref().filter(|v| has_text(Some(*v)))?;
    Some(Predicate::eq(fields::USERNAME, username))
}

pub fn team_name_eq(condition: &MemberSearchCondition) -> Option<Predicate> {
    let team_name = condition.team_name.as_deref().filter(|v| has_text(Some(*v)))?;
    Some(Predicate::eq(fields::TEAM_NAME, team_name))
}

pub fn age_goe(condition: &MemberSearchCondition) -> Option<Predicate> {
    condition.age_goe.map(|age| Predicate::goe(fields::AGE, age))
}

pub fn age_loe(condition: &MemberSearchCondition) -> Option<Predicate> {
    condition.age_loe.map(|age| Predicate::loe(fields::AGE, age))
}

/// 검색 조건을 하나의 조건식으로 만듭니다.
///
/// 채워진 필드가 없으면 [`Predicate::Always`]를 반환합니다.
pub fn build_filter(condition: &MemberSearchCondition) -> Predicate {
    let mut builder = PredicateBuilder::new();
    builder
        .and_if_some(username_eq(condition))
        .and_if_some(team_name_eq(condition))
        .and_if_some(age_goe(condition))
        .and_if_some(age_loe(condition));
    builder.build()
}

/// 검색 조건을 필드별 조건 목록으로 만듭니다.
///
/// 항상 `username`, `team_name`, `age_goe`, `age_loe` 순서의 네 항목을 반환하고,
/// 비어 있는 필드 자리에는 [`Predicate::Always`]가 들어갑니다.
/// 호출자는 `Predicate::all(clauses)`로 결합하거나 다른 조건을 덧붙일 수 있습니다.
pub fn build_filter_clauses(condition: &MemberSearchCondition) -> Vec<Predicate> {
    [
        username_eq(condition),
        team_name_eq(condition),
        age_goe(condition),
        age_loe(condition),
    ]
    .into_iter()
    .map(Option::unwrap_or_default)
    .collect()
}
