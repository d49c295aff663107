pub mod member_request;
pub mod search_condition;

pub use member_request::*;
pub use search_condition::*;
