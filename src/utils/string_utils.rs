//! # 문자열 유틸리티
//!
//! 검색 조건과 요청 DTO에서 쓰는 문자열 검사/정리 함수입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 값이 존재하고 공백이 아닌 문자를 하나 이상 포함하는지 확인합니다.
///
/// Spring `StringUtils.hasText`와 같은 규칙입니다. 값 자체는 변경하지 않습니다.
///
/// ```rust,ignore
/// assert!(has_text(Some("member1")));
/// assert!(!has_text(Some("  ")));
/// assert!(!has_text(None));
/// ```
pub fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있으면 `ValidationError`, 아니면 앞뒤 공백을 제거한 값을 반환합니다.
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// `None`, 빈 문자열, 공백만 있는 문자열은 `None`이 됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용합니다.
/// 앞뒤 공백을 제거하고, 비어 있으면 `None`입니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
