//! Contributor permission levels.

pub mod level;

pub use level::Permission;
