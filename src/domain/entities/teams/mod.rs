pub mod team;

pub use team::Team;
