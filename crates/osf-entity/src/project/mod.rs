//! Project domain entities.

pub mod contributor;
pub mod model;

pub use contributor::Contributor;
pub use model::{CreateProject, Project};
