//! 데이터 액세스 계층
//!
//! `#[repository]` 매크로로 싱글톤 관리되는 리포지토리입니다.
//! MongoDB가 주 저장소이고, 단건 조회만 Redis에 캐싱합니다.
//!
//! - [`members`] - 회원 저장, 동적 조건 검색, 페이징, 벌크 연산, 집계
//! - [`teams`] - 팀 저장과 조회
//!
//! ```rust,ignore
//! use crate::repositories::members::member_repo::MemberRepository;
//!
//! let page = MemberRepository::instance()
//!     .search_page_complex(&condition, &pageable)
//!     .await?;
//! ```

pub mod members;
pub mod teams;
