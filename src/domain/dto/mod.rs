//! 요청/응답 DTO
//!
//! - [`members`] - 검색 조건, 페이징 파라미터, 회원 등록/벌크 요청, 조인 프로젝션, 통계
//! - [`teams`] - 팀 등록 요청과 응답

pub mod members;
pub mod teams;
