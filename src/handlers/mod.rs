//! HTTP 요청 핸들러
//!
//! 핸들러는 요청을 추출/검증하고 서비스를 호출한 뒤 JSON으로 응답합니다.
//! 오류는 `AppError`가 `ResponseError`로 변환되어 `{"error": "..."}` 형태로 반환됩니다.
//!
//! - [`members`] - 회원 검색(v1/v2/v3), 등록, 조회, 벌크 연산, 통계
//! - [`teams`] - 팀 등록과 목록

pub mod members;
pub mod teams;
