//! Render planning and content decoding.

pub mod archive;
pub mod highlight;
pub mod selector;

pub use archive::{ArchiveFormat, list_entries, prune_entries};
pub use highlight::Highlighter;
pub use selector::{RenderPlan, RenderStrategySelector, extension_of};
