//! Upload backend trait and implementations.

use async_trait::async_trait;
use certmill_common::CertmillResult;
use certmill_render_engine::Artifact;
use certmill_roster_model::UploadOutcome;

pub mod drive;
pub mod folder;

/// A destination for rendered artifacts.
///
/// One attempt per artifact, no retry. The credential is resolved at call
/// time and passed in explicitly; an absent credential on a backend that
/// needs one is an ordinary failure outcome, not an error.
#[async_trait]
pub trait UploadBackend: Send + Sync {
    /// Backend name for logs and summaries.
    fn name(&self) -> &str;

    /// Resolve the named destination container, creating it only on miss.
    ///
    /// Idempotent: calling twice with the same name never produces two
    /// containers. Returns a backend-specific container identifier.
    async fn ensure_container(&self, credential: Option<&str>) -> CertmillResult<String>;

    /// Transfer one artifact.
    ///
    /// Never returns an error: backend failures of any kind (non-2xx
    /// responses, transport errors, missing credential) are converted to
    /// failure outcomes.
    async fn upload(&self, artifact: &Artifact, credential: Option<&str>) -> UploadOutcome;
}
