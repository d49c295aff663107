//! # 페이지 요청과 페이지 결과
//!
//! `?page=0&size=20&sort=age:desc,username` 형태의 요청을 [`Pageable`]로 바꾸고,
//! 조회 결과를 [`Page`]로 감쌉니다. 페이지 번호는 0부터 시작합니다.
//!
//! [`resolve_total`]은 내용 개수만으로 전체 개수를 알 수 있을 때
//! count 쿼리를 생략하기 위한 계산입니다.

use serde::{Deserialize, Serialize};
use crate::config::PagingConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::members::request::PageQuery;

/// 정렬 가능한 프로젝션 필드
pub const SORTABLE_PROPERTIES: [&str; 5] = ["member_id", "username", "age", "team_id", "team_name"];

/// 정렬 기준이 같은 행의 순서를 고정하는 보조 정렬 필드
pub const TIEBREAK_PROPERTY: &str = "member_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// MongoDB `$sort` 값 (1 / -1)
    pub fn as_mongo(&self) -> i32 {
        match self {
            Direction::Asc => 1,
            Direction::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: &str) -> Self {
        Self { property: property.to_string(), direction: Direction::Asc }
    }

    pub fn desc(property: &str) -> Self {
        Self { property: property.to_string(), direction: Direction::Desc }
    }
}

/// `age:desc,username` → `[age DESC, username ASC]`
///
/// 빈 문자열이면 빈 목록입니다. 허용되지 않은 필드나 방향은 `ValidationError`.
pub fn parse_sort(raw: &str) -> AppResult<Vec<SortOrder>> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_sort_token)
        .collect()
}

fn parse_sort_token(token: &str) -> AppResult<SortOrder> {
    let (property, direction) = match token.split_once(':') {
        Some((property, direction)) => (property.trim(), direction.trim()),
        None => (token, "asc"),
    };

    if !SORTABLE_PROPERTIES.contains(&property) {
        return Err(AppError::ValidationError(format!(
            "정렬할 수 없는 필드입니다: {} (허용: {})",
            property,
            SORTABLE_PROPERTIES.join(", ")
        )));
    }

    let direction = match direction.to_lowercase().as_str() {
        "asc" => Direction::Asc,
        "desc" => Direction::Desc,
        other => {
            return Err(AppError::ValidationError(format!(
                "정렬 방향은 asc 또는 desc 여야 합니다: {}",
                other
            )));
        }
    };

    Ok(SortOrder { property: property.to_string(), direction })
}

/// 페이지 요청 (0부터 시작하는 페이지 번호, 페이지 크기, 정렬)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl Pageable {
    /// 크기를 `1..=max_page_size` 범위로, offset을 `$skip`이 받을 수 있는 범위로 검증해 생성합니다.
    pub fn new(page: u64, size: u64, sort: Vec<SortOrder>) -> AppResult<Self> {
        let max = PagingConfig::max_page_size();
        if size == 0 || size > max {
            return Err(AppError::ValidationError(format!(
                "페이지 크기는 1 이상 {} 이하여야 합니다: {}",
                max, size
            )));
        }

        let offset_fits = page
            .checked_mul(size)
            .is_some_and(|offset| i64::try_from(offset).is_ok());
        if !offset_fits {
            return Err(AppError::ValidationError(format!(
                "페이지 번호가 너무 큽니다: {}",
                page
            )));
        }

        Ok(Self { page, size, sort })
    }

    /// 쿼리 파라미터에서 생성합니다. 생략된 값은 0페이지, 기본 크기, 정렬 없음입니다.
    pub fn from_query(query: &PageQuery) -> AppResult<Self> {
        let sort = match query.sort.as_deref() {
            Some(raw) => parse_sort(raw)?,
            None => Vec::new(),
        };
        Self::new(
            query.page.unwrap_or(0),
            query.size.unwrap_or_else(PagingConfig::default_page_size),
            sort,
        )
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// 내용 개수만으로 전체 개수를 알 수 있으면 반환합니다.
///
/// - 첫 페이지가 가득 차지 않았으면 전체 개수 = 내용 개수
/// - 이후 페이지가 비어 있지 않고 가득 차지 않았으면 전체 개수 = offset + 내용 개수
/// - 그 외에는 `None` (count 쿼리 필요)
pub fn resolve_total(pageable: &Pageable, content_len: u64) -> Option<u64> {
    let offset = pageable.offset();
    if offset == 0 {
        return (pageable.size > content_len).then_some(content_len);
    }
    (content_len != 0 && pageable.size > content_len).then(|| offset.saturating_add(content_len))
}

/// 한 페이지 분량의 결과와 전체 개수 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub number_of_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(pageable.size.max(1));
        let number_of_elements = content.len() as u64;

        Self {
            content,
            page: pageable.page,
            size: pageable.size,
            total_elements,
            total_pages,
            first: pageable.page == 0,
            last: pageable.page.saturating_add(1) >= total_pages,
            number_of_elements,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            number_of_elements: self.number_of_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pageable(page: u64, size: u64) -> Pageable {
        Pageable { page, size, sort: Vec::new() }
    }

    #[test]
    fn test_parse_sort() {
        let orders = parse_sort("age:desc, username").unwrap();
        assert_eq!(orders, vec![SortOrder::desc("age"), SortOrder::asc("username")]);

        assert!(parse_sort("").unwrap().is_empty());
        assert!(parse_sort(" , ").unwrap().is_empty());
        assert_eq!(parse_sort("team_name:ASC").unwrap(), vec![SortOrder::asc("team_name")]);
    }

    #[test]
    fn test_parse_sort_rejects_unknown_property_and_direction() {
        assert!(matches!(parse_sort("password"), Err(AppError::ValidationError(_))));
        assert!(matches!(parse_sort("age:sideways"), Err(AppError::ValidationError(_))));
        assert!(matches!(parse_sort("$where:asc"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_pageable_size_bounds() {
        assert!(Pageable::new(0, 0, Vec::new()).is_err());
        assert!(Pageable::new(0, 1, Vec::new()).is_ok());
        assert!(Pageable::new(0, PagingConfig::max_page_size() + 1, Vec::new()).is_err());
    }

    #[test]
    fn test_pageable_rejects_page_whose_offset_overflows() {
        let query = PageQuery { page: Some(u64::MAX), size: Some(20), sort: None };
        assert!(matches!(Pageable::from_query(&query), Err(AppError::ValidationError(_))));

        let last_valid = i64::MAX as u64 / 20;
        assert!(Pageable::new(last_valid, 20, Vec::new()).is_ok());
        assert!(Pageable::new(last_valid + 1, 20, Vec::new()).is_err());
    }

    #[test]
    fn test_page_metadata_on_extreme_page_does_not_overflow() {
        let page: Page<&str> = Page::new(Vec::new(), &pageable(u64::MAX, 20), 100);
        assert!(page.last);
        assert!(!page.first);

        assert_eq!(resolve_total(&pageable(u64::MAX, 1), 0), None);
        assert_eq!(resolve_total(&Pageable { page: 1, size: u64::MAX, sort: Vec::new() }, 1), Some(u64::MAX));
    }

    #[test]
    fn test_pageable_from_query_defaults() {
        let query = PageQuery::default();
        let pageable = Pageable::from_query(&query).unwrap();

        assert_eq!(pageable.page, 0);
        assert_eq!(pageable.size, PagingConfig::default_page_size());
        assert!(pageable.sort.is_empty());
    }

    #[test]
    fn test_offset() {
        assert_eq!(pageable(0, 3).offset(), 0);
        assert_eq!(pageable(2, 3).offset(), 6);
    }

    #[test]
    fn test_resolve_total_first_page() {
        assert_eq!(resolve_total(&pageable(0, 3), 2), Some(2));
        assert_eq!(resolve_total(&pageable(0, 3), 0), Some(0));
        assert_eq!(resolve_total(&pageable(0, 3), 3), None);
    }

    #[test]
    fn test_resolve_total_later_pages() {
        assert_eq!(resolve_total(&pageable(1, 3), 1), Some(4));
        assert_eq!(resolve_total(&pageable(1, 3), 3), None);
        assert_eq!(resolve_total(&pageable(5, 3), 0), None);
    }

    #[test]
    fn test_page_metadata() {
        let page = Page::new(vec!["a", "b", "c"], &pageable(0, 3), 100);
        assert_eq!(page.total_pages, 34);
        assert!(page.first);
        assert!(!page.last);
        assert_eq!(page.number_of_elements, 3);

        let last = Page::new(vec!["x"], &pageable(33, 3), 100);
        assert!(!last.first);
        assert!(last.last);

        let empty: Page<&str> = Page::new(Vec::new(), &pageable(0, 20), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.first && empty.last);
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], &pageable(1, 2), 5).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }
}
