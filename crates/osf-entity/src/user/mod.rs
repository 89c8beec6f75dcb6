//! User references embedded in other entities.

pub mod model;

pub use model::UserRef;
