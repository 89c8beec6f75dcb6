//! # osf-storage
//!
//! Storage provider implementations and the on-disk layout of uploads.
//! Current files live at `{uploads_root}/{project_id}/{filename}`; every
//! uploaded revision is additionally kept under
//! `{uploads_root}/{project_id}/.versions/{record_id}`.

pub mod layout;
pub mod providers;

pub use providers::LocalStorageProvider;
