//! Per-run configuration snapshots.
//!
//! The operator may edit these between runs; each batch run captures a
//! snapshot at start and never observes later edits.

use serde::{Deserialize, Serialize};

/// How a single certificate is drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Anchor point the certificate name is centered on.
    pub name_x: u32,
    pub name_y: u32,

    /// Name text size in pixels.
    pub font_size: u32,

    /// Requested font family. Carried for the operator's benefit; the
    /// engine resolves one concrete system font at construction and logs
    /// the requested family rather than matching it per run.
    pub font_family: String,

    /// Name text color as a `#rrggbb` hex string.
    pub text_color: String,

    /// Accepted but never varies rendering: name text is always centered.
    pub text_align: String,

    /// Title caption used only by the placeholder layout (no template).
    pub event_name: String,

    /// Date caption used only by the placeholder layout (no template).
    pub event_date: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            name_x: 650,
            name_y: 490,
            font_size: 48,
            font_family: "serif".to_string(),
            text_color: "#000000".to_string(),
            text_align: "center".to_string(),
            event_name: "Road To Legacy 2.0".to_string(),
            event_date: "May 31, 2025".to_string(),
        }
    }
}

impl RenderConfig {
    /// Adopt a template's natural pixel dimensions so the artifact matches
    /// the uploaded background exactly.
    pub fn fit_to_template(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// Where artifacts are uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Whether uploads are performed at all.
    pub enabled: bool,

    /// Destination container name (folder/bucket).
    pub folder_path: String,

    /// Whether uploaded artifacts get a public viewing link.
    pub generate_public_links: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            folder_path: "certificates".to_string(),
            generate_public_links: true,
        }
    }
}

impl UploadConfig {
    /// Container name with the documented fallback for an empty setting.
    pub fn resolved_folder(&self) -> &str {
        if self.folder_path.is_empty() {
            "certificates"
        } else {
            &self.folder_path
        }
    }
}
