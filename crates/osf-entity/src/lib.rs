//! # osf-entity
//!
//! Domain entity models for the project file service. Every struct in this
//! crate is a persisted record or a domain value object, and derives
//! `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod file;
pub mod permission;
pub mod project;
pub mod user;
