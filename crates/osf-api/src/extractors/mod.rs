//! Custom Axum extractors.

pub mod access;
pub mod subject;

pub use access::{Authorized, EditAccess, ViewAccess};
pub use subject::Viewer;
