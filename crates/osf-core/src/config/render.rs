//! Rendering configuration.

use serde::{Deserialize, Serialize};

/// Static inputs of the render strategy selector and archive lister.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Files larger than this are never decoded for rendering.
    #[serde(default = "default_max_render_size")]
    pub max_render_size_bytes: u64,
    /// Extensions (without the dot) rendered as inline images.
    #[serde(default = "default_image_formats")]
    pub image_formats: Vec<String>,
    /// Maximum number of `/` in an archive entry name; `None` lists everything.
    #[serde(default = "default_archive_depth")]
    pub archive_depth: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_render_size_bytes: default_max_render_size(),
            image_formats: default_image_formats(),
            archive_depth: default_archive_depth(),
        }
    }
}

fn default_max_render_size() -> u64 {
    3_145_728 // 3 MB
}

fn default_image_formats() -> Vec<String> {
    ["jpg", "jpeg", "jpe", "png", "gif", "bmp", "tif", "tiff", "svg", "ico"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_archive_depth() -> Option<usize> {
    Some(1)
}
