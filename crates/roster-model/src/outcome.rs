//! Per-artifact upload outcomes.

use serde::{Deserialize, Serialize};

use crate::entry::RosterEntry;

/// The result of attempting to upload one artifact.
///
/// Created by the upload adapter, appended to the run's outcome list, and
/// never mutated afterward. Always carries the originating entry and the
/// artifact filename, whichever way the attempt went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub entry: RosterEntry,
    pub filename: String,
    pub result: OutcomeKind,
}

/// Success/failure tag for an upload attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeKind {
    Success {
        /// Resolvable viewing URL for the uploaded artifact.
        url: String,
        /// ISO-8601 completion timestamp.
        uploaded_at: String,
    },
    Failure {
        /// Human-readable error description.
        error: String,
    },
}

impl UploadOutcome {
    pub fn success(
        entry: RosterEntry,
        filename: impl Into<String>,
        url: impl Into<String>,
        uploaded_at: impl Into<String>,
    ) -> Self {
        Self {
            entry,
            filename: filename.into(),
            result: OutcomeKind::Success {
                url: url.into(),
                uploaded_at: uploaded_at.into(),
            },
        }
    }

    pub fn failure(
        entry: RosterEntry,
        filename: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            entry,
            filename: filename.into(),
            result: OutcomeKind::Failure {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.result, OutcomeKind::Success { .. })
    }

    /// Viewing URL, present only on success.
    pub fn url(&self) -> Option<&str> {
        match &self.result {
            OutcomeKind::Success { url, .. } => Some(url),
            OutcomeKind::Failure { .. } => None,
        }
    }

    /// Completion timestamp, present only on success.
    pub fn uploaded_at(&self) -> Option<&str> {
        match &self.result {
            OutcomeKind::Success { uploaded_at, .. } => Some(uploaded_at),
            OutcomeKind::Failure { .. } => None,
        }
    }

    /// Error description, present only on failure.
    pub fn error(&self) -> Option<&str> {
        match &self.result {
            OutcomeKind::Success { .. } => None,
            OutcomeKind::Failure { error } => Some(error),
        }
    }
}
