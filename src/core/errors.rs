//! # Application Error Handling System
//!
//! 회원/팀 검색 서비스 전역에서 사용하는 에러 타입입니다.
//! `thiserror`로 메시지를 정의하고 `actix_web::ResponseError`를 구현하여
//! 핸들러가 `Result<HttpResponse, AppError>`를 그대로 반환할 수 있게 합니다.
//!
//! ## 에러 분류
//!
//! | 변형 | HTTP 상태 | 발생 위치 |
//! |------|-----------|-----------|
//! | `DatabaseError` | 500 | MongoDB 조회/쓰기 실패 |
//! | `RedisError` | 500 | 캐시 계층 실패 (조회 경로에서는 무시됨) |
//! | `ValidationError` | 400 | 잘못된 ID, 요청 DTO 검증 실패, 정렬 필드 오류 |
//! | `NotFound` | 404 | 회원/팀 미존재 |
//! | `ConflictError` | 409 | 팀 이름 중복 |
//! | `InternalError` | 500 | 그 외 내부 오류 |
//!
//! 동적 필터 빌더(`crate::query`)는 어떤 입력에도 실패하지 않으므로
//! 이 열거형에 대응하는 변형이 없습니다. 에러는 저장소 계층에서만 만들어집니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn get_member(&self, id: &str) -> Result<MemberTeamDto, AppError> {
//!     let member = self.member_repo.find_by_id(id).await?
//!         .ok_or_else(|| AppError::NotFound(format!("회원을 찾을 수 없습니다: {}", id)))?;
//!     // ...
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.http_status()
    }

    /// 각 에러를 `{"error": "..."}` 형태의 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.http_status())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("member not found".to_string());

        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("teamA".to_string());

        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_storage_errors_are_internal() {
        let db = AppError::DatabaseError("connection reset".to_string());
        let cache = AppError::RedisError("timeout".to_string());

        assert_eq!(db.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(cache.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_message_keeps_variant_prefix() {
        let error = AppError::NotFound("회원 ID 42".to_string());

        assert_eq!(error.to_string(), "Not found: 회원 ID 42");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }

    #[test]
    fn test_error_with_context_is_lazy() {
        let ok: Result<u32, &str> = Ok(3);
        let value = ok.with_context(|| panic!("must not be evaluated"));

        assert_eq!(value.unwrap(), 3);
    }
}
