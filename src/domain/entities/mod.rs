//! 영속 엔티티
//!
//! - [`members::Member`] - `members` 컬렉션
//! - [`teams::Team`] - `teams` 컬렉션

pub mod members;
pub mod teams;
