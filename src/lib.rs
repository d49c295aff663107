//! 회원/팀 검색 서비스 백엔드
//!
//! 선택적 검색 조건을 조합해 회원-팀 조인 결과를 검색하는 REST 서비스입니다.
//! 조건 조합 로직(`query`)은 순수 함수로 분리되어 있고,
//! 나머지 계층은 싱글톤 매크로 기반 의존성 주입으로 연결됩니다.
//!
//! # Features
//!
//! - **동적 필터**: `username`, `team_name`, `age_goe`, `age_loe` 중 채워진 조건만 AND로 결합
//! - **조인 프로젝션**: 회원 → 팀 left join 결과를 평평한 `MemberTeamDto`로 변환
//! - **페이징**: 단일 `$facet` 쿼리 방식과 count 지연 방식
//! - **벌크 연산**: 이름 일괄 변경, 나이 일괄 증감, 일괄 삭제 (+ 캐시 무효화)
//! - **집계**: 전체 나이 통계, 팀별 평균 나이, 최고령 회원
//! - **MongoDB / Redis**: 영구 저장과 단건 캐시
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1, /api/v2, /api/v3
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 쿼리 파라미터 추출, DTO 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 트랜잭션 경계
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌─────────────────┐
//! │  Repositories   │ ───▶ │      Query      │ ← Predicate, Pipeline, Pageable
//! └─────────────────┘      └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use member_search_service::domain::dto::members::request::MemberSearchCondition;
//! use member_search_service::query::build_filter;
//!
//! let condition = MemberSearchCondition {
//!     team_name: Some("teamB".to_string()),
//!     age_goe: Some(35),
//!     age_loe: Some(40),
//!     ..Default::default()
//! };
//! let predicate = build_filter(&condition);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod query;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
