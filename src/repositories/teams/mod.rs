//! 팀 데이터 액세스
//!
//! ```rust,ignore
//! use crate::repositories::teams::team_repo::TeamRepository;
//!
//! let team_repo = TeamRepository::instance();
//! let team = team_repo.find_by_name("teamA").await?;
//! ```

pub mod team_repo;
