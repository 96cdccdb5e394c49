//! Folder-based object store backend.
//!
//! Artifacts land in `<root>/<container>/<filename>`; the viewing URL is a
//! `file://` path. Needs no credential. Duplicate filenames are written
//! independently (last write wins) — the store never deduplicates.

use std::path::PathBuf;

use async_trait::async_trait;
use certmill_common::{CertmillError, CertmillResult};
use certmill_render_engine::Artifact;
use certmill_roster_model::UploadOutcome;
use chrono::Utc;

use crate::backend::UploadBackend;

pub struct FolderStoreBackend {
    root: PathBuf,
    container: String,
}

impl FolderStoreBackend {
    pub fn new(root: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            container: container.into(),
        }
    }

    fn container_path(&self) -> PathBuf {
        self.root.join(&self.container)
    }
}

#[async_trait]
impl UploadBackend for FolderStoreBackend {
    fn name(&self) -> &str {
        "folder-store"
    }

    async fn ensure_container(&self, _credential: Option<&str>) -> CertmillResult<String> {
        let path = self.container_path();
        if !path.exists() {
            tokio::fs::create_dir_all(&path).await.map_err(|e| {
                CertmillError::upload(format!(
                    "Failed to create container {}: {e}",
                    path.display()
                ))
            })?;
            tracing::info!(container = %path.display(), "Created destination container");
        }
        Ok(path.display().to_string())
    }

    async fn upload(&self, artifact: &Artifact, credential: Option<&str>) -> UploadOutcome {
        if let Err(e) = self.ensure_container(credential).await {
            return UploadOutcome::failure(artifact.entry.clone(), &artifact.filename, e.to_string());
        }

        let file_path = self.container_path().join(&artifact.filename);
        if let Err(e) = tokio::fs::write(&file_path, &artifact.png).await {
            return UploadOutcome::failure(
                artifact.entry.clone(),
                &artifact.filename,
                format!("Failed to write {}: {e}", file_path.display()),
            );
        }

        let url = match std::fs::canonicalize(&file_path) {
            Ok(absolute) => format!("file://{}", absolute.display()),
            Err(_) => format!("file://{}", file_path.display()),
        };

        tracing::debug!(file = %file_path.display(), "Stored artifact");
        UploadOutcome::success(
            artifact.entry.clone(),
            &artifact.filename,
            url,
            Utc::now().to_rfc3339(),
        )
    }
}
