//! Error types shared across Certmill crates.

use std::path::PathBuf;

/// Top-level error type for Certmill operations.
#[derive(Debug, thiserror::Error)]
pub enum CertmillError {
    /// No drawing surface can be produced at all (no resolvable font,
    /// render slot already claimed). Fatal for an entire batch run.
    #[error("Render unavailable: {message}")]
    RenderUnavailable { message: String },

    /// A single render attempt failed. Non-fatal: the orchestrator
    /// converts this into a failure outcome and moves on.
    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Roster error: {message}")]
    Roster { message: String },

    #[error("Upload error: {message}")]
    Upload { message: String },

    #[error("Batch error: {message}")]
    Batch { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CertmillError.
pub type CertmillResult<T> = Result<T, CertmillError>;

impl CertmillError {
    pub fn render_unavailable(msg: impl Into<String>) -> Self {
        Self::RenderUnavailable {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn roster(msg: impl Into<String>) -> Self {
        Self::Roster {
            message: msg.into(),
        }
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload {
            message: msg.into(),
        }
    }

    pub fn batch(msg: impl Into<String>) -> Self {
        Self::Batch {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
