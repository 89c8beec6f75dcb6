//! # osf-database
//!
//! Repository implementations for project metadata. Projects (with their
//! file records and version lists) are held in memory and, when a snapshot
//! path is configured, written through to a JSON file after every change.

pub mod repositories;

pub use repositories::project::ProjectRepository;
