//! Concrete repository implementations.

pub mod project;
