//! # Query Module - 동적 검색 조건과 집계 파이프라인
//!
//! 회원 검색의 핵심 로직을 담는 순수 계층입니다. I/O가 없으므로 어디서든 동시에 호출할 수 있습니다.
//!
//! - [`predicate`] - AND 전용 조건식 `Predicate`, `PredicateBuilder`, `Record`
//! - [`member_filter`] - `MemberSearchCondition` → `Predicate` 변환 (`build_filter`, `build_filter_clauses`)
//! - [`pageable`] - `Pageable`, `Page`, 정렬 파싱, count 생략 판정
//! - [`pipeline`] - 조인/필터/정렬/페이징 aggregation 단계 조립
//!
//! ```rust,ignore
//! use crate::query::{build_filter, pipeline};
//!
//! let predicate = build_filter(&condition);
//! let stages = pipeline::member_team_page_pipeline(&predicate, &pageable);
//! let cursor = members.aggregate(stages).await?;
//! ```

pub mod member_filter;
pub mod pageable;
pub mod pipeline;
pub mod predicate;

pub use member_filter::{build_filter, build_filter_clauses};
pub use pageable::{Page, Pageable, SortOrder, resolve_total};
pub use predicate::{FieldValue, Predicate, PredicateBuilder, Record};
