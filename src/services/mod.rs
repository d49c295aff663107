//! 비즈니스 로직 계층
//!
//! `#[service]` 매크로로 싱글톤 관리되며 리포지토리는 `Arc<T>` 필드로 주입됩니다.
//!
//! - [`members`] - 회원 등록/검색/페이징/벌크 연산/통계/샘플 데이터
//! - [`teams`] - 팀 등록과 조회
//!
//! ```rust,ignore
//! use crate::services::members::member_service::MemberService;
//!
//! let rows = MemberService::instance().search(&condition, &[]).await?;
//! ```

pub mod members;
pub mod teams;
