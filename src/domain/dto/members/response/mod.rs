pub mod member_response;
pub mod member_team;

pub use member_response::*;
pub use member_team::*;
