//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 빈 문자열 판정(`has_text`), 필수/선택 문자열 정리
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{has_text, validate_required_string};
//!
//! if has_text(condition.username.as_deref()) { /* ... */ }
//! let name = validate_required_string(&request.name, "팀 이름")?;
//! ```

pub mod string_utils;
