//! # Domain Layer Module
//!
//! 회원/팀 도메인 모델과 API 계약을 정의합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - Member, Team (MongoDB 문서)
//! └── dto       - 검색 조건, 요청 DTO, 조인 프로젝션, 통계 응답
//!      │
//!      ▼
//! Query Layer (Predicate, Pipeline) → Repositories → Services → Handlers
//! ```
//!
//! | Spring / JPA | 이 모듈 |
//! |--------------|---------|
//! | `@Entity Member`, `@ManyToOne Team` | [`entities::members::Member`] (`team_id` 참조) |
//! | `@QueryProjection MemberTeamDto` | [`dto::members::response::MemberTeamDto`] + `MemberTeamRow` 변환 |
//! | `MemberSearchCondition` | [`dto::members::request::MemberSearchCondition`] |
//! | `@Valid` | `validator::Validate` |

pub mod dto;
pub mod entities;
