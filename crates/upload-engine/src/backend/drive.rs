//! Google Drive backend.
//!
//! Uses the Drive v3 REST API with an externally supplied bearer token:
//! folder lookup by name, folder creation on miss, and a multipart upload
//! (JSON metadata part + PNG part). Base URLs are constructor parameters
//! so tests can point the backend at a local server.

use async_trait::async_trait;
use certmill_common::{CertmillError, CertmillResult};
use certmill_render_engine::Artifact;
use certmill_roster_model::{UploadConfig, UploadOutcome};
use chrono::Utc;
use reqwest::multipart::{Form, Part};

use crate::backend::UploadBackend;

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const DEFAULT_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";
const NOT_AUTHENTICATED: &str = "Not authenticated with Google Drive";

pub struct DriveBackend {
    http: reqwest::Client,
    api_base: String,
    upload_base: String,
    container: String,
    generate_public_links: bool,
}

impl DriveBackend {
    pub fn new(config: &UploadConfig) -> Self {
        Self::with_base_urls(config, DEFAULT_API_BASE, DEFAULT_UPLOAD_BASE)
    }

    /// Construct against explicit API roots (used by tests).
    pub fn with_base_urls(
        config: &UploadConfig,
        api_base: impl Into<String>,
        upload_base: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            upload_base: upload_base.into(),
            container: config.resolved_folder().to_string(),
            generate_public_links: config.generate_public_links,
        }
    }

    async fn find_folder(&self, token: &str) -> CertmillResult<Option<String>> {
        let response = self
            .http
            .get(format!("{}/files", self.api_base))
            .query(&[
                ("q", folder_query(&self.container)),
                ("fields", "files(id,name)".to_string()),
            ])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CertmillError::upload(format!("Folder lookup failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CertmillError::upload(format!(
                "Folder lookup failed with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CertmillError::upload(format!("Folder lookup returned bad JSON: {e}")))?;

        Ok(body
            .get("files")
            .and_then(|files| files.get(0))
            .and_then(|file| file.get("id"))
            .and_then(|id| id.as_str())
            .map(String::from))
    }

    async fn create_folder(&self, token: &str) -> CertmillResult<String> {
        let response = self
            .http
            .post(format!("{}/files", self.api_base))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "name": self.container,
                "mimeType": FOLDER_MIME,
            }))
            .send()
            .await
            .map_err(|e| CertmillError::upload(format!("Folder creation failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CertmillError::upload(format!(
                "Folder creation failed with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            CertmillError::upload(format!("Folder creation returned bad JSON: {e}"))
        })?;

        body.get("id")
            .and_then(|id| id.as_str())
            .map(String::from)
            .ok_or_else(|| CertmillError::upload("Folder creation response missing id"))
    }

    /// Best-effort anyone-with-link reader permission. A failure here is
    /// logged but does not demote an already-successful upload.
    async fn share_publicly(&self, token: &str, file_id: &str) {
        let result = self
            .http
            .post(format!("{}/files/{file_id}/permissions", self.api_base))
            .bearer_auth(token)
            .json(&serde_json::json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                tracing::warn!(file_id, status = %response.status(), "Public link sharing failed");
            }
            Err(e) => {
                tracing::warn!(file_id, error = %e, "Public link sharing failed");
            }
        }
    }
}

#[async_trait]
impl UploadBackend for DriveBackend {
    fn name(&self) -> &str {
        "google-drive"
    }

    async fn ensure_container(&self, credential: Option<&str>) -> CertmillResult<String> {
        let token = valid_token(credential)
            .ok_or_else(|| CertmillError::upload(NOT_AUTHENTICATED))?;

        // Look up by name first; create only on miss.
        if let Some(id) = self.find_folder(token).await? {
            return Ok(id);
        }
        let id = self.create_folder(token).await?;
        tracing::info!(folder = %self.container, id = %id, "Created Drive folder");
        Ok(id)
    }

    async fn upload(&self, artifact: &Artifact, credential: Option<&str>) -> UploadOutcome {
        let Some(token) = valid_token(credential) else {
            return UploadOutcome::failure(
                artifact.entry.clone(),
                &artifact.filename,
                NOT_AUTHENTICATED,
            );
        };

        let folder_id = match self.ensure_container(credential).await {
            Ok(id) => id,
            Err(e) => {
                return UploadOutcome::failure(
                    artifact.entry.clone(),
                    &artifact.filename,
                    e.to_string(),
                )
            }
        };

        let metadata = serde_json::json!({
            "name": artifact.filename,
            "mimeType": "image/png",
            "parents": [folder_id],
        });

        let form = match multipart_form(&metadata, &artifact.png, &artifact.filename) {
            Ok(form) => form,
            Err(e) => {
                return UploadOutcome::failure(
                    artifact.entry.clone(),
                    &artifact.filename,
                    e.to_string(),
                )
            }
        };

        let response = self
            .http
            .post(format!("{}/files?uploadType=multipart", self.upload_base))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                return UploadOutcome::failure(
                    artifact.entry.clone(),
                    &artifact.filename,
                    e.to_string(),
                )
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = if body.is_empty() {
                format!("Upload failed with status {status}")
            } else {
                body
            };
            return UploadOutcome::failure(artifact.entry.clone(), &artifact.filename, error);
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return UploadOutcome::failure(
                    artifact.entry.clone(),
                    &artifact.filename,
                    format!("Upload response was not JSON: {e}"),
                )
            }
        };

        let Some(file_id) = body.get("id").and_then(|id| id.as_str()) else {
            return UploadOutcome::failure(
                artifact.entry.clone(),
                &artifact.filename,
                "Upload response missing file id",
            );
        };

        if self.generate_public_links {
            self.share_publicly(token, file_id).await;
        }

        UploadOutcome::success(
            artifact.entry.clone(),
            &artifact.filename,
            viewing_url(file_id),
            Utc::now().to_rfc3339(),
        )
    }
}

fn valid_token(credential: Option<&str>) -> Option<&str> {
    credential.filter(|token| !token.trim().is_empty())
}

fn folder_query(container: &str) -> String {
    format!(
        "name='{}' and mimeType='{FOLDER_MIME}' and trashed=false",
        container.replace('\'', "\\'")
    )
}

fn viewing_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{file_id}/view")
}

fn multipart_form(
    metadata: &serde_json::Value,
    png: &[u8],
    filename: &str,
) -> CertmillResult<Form> {
    let metadata_part = Part::text(metadata.to_string())
        .mime_str("application/json")
        .map_err(|e| CertmillError::upload(format!("Bad metadata part: {e}")))?;
    let file_part = Part::bytes(png.to_vec())
        .file_name(filename.to_string())
        .mime_str("image/png")
        .map_err(|e| CertmillError::upload(format!("Bad file part: {e}")))?;
    Ok(Form::new()
        .part("metadata", metadata_part)
        .part("file", file_part))
}
