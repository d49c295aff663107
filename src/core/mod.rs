//! # Core Framework Module
//!
//! 서비스 전체가 공유하는 프레임워크 기능입니다.
//!
//! - [`registry`] - `#[service]` / `#[repository]` 싱글톤을 관리하는 `ServiceLocator`
//! - [`errors`] - `AppError`, `AppResult`, actix-web 에러 응답 변환
//!
//! ## 계층 구조
//!
//! ```text
//! handlers ──▶ services ──▶ repositories ──▶ MongoDB / Redis
//!                  │              │
//!                  └── query ◀────┘   (동적 필터, 페이징, 파이프라인)
//! ```
//!
//! 모든 계층은 `AppResult<T>`를 반환하고, 핸들러에서 `AppError`가
//! 그대로 HTTP 응답으로 변환됩니다.

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
