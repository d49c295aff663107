//! 회원 데이터 액세스
//!
//! ```rust,ignore
//! use crate::repositories::members::member_repo::MemberRepository;
//!
//! let member_repo = MemberRepository::instance();
//! let rows = member_repo.search_by_builder(&condition).await?;
//! ```

pub mod member_repo;
