//! The batch run state machine.

use std::sync::Arc;
use std::time::Duration;

use certmill_common::{CertmillError, CertmillResult};
use certmill_render_engine::{RenderEngine, TemplateSurface};
use certmill_roster_model::{sample_roster, RenderConfig, RosterEntry, UploadOutcome};
use certmill_upload_engine::UploadBackend;

use crate::progress::{percent_complete, BatchProgress, ProgressCallback};

/// Default pacing delay between consecutive entries.
pub const DEFAULT_PACING: Duration = Duration::from_millis(200);

/// State of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run has executed yet (or the last one aborted).
    Idle,
    /// A run is in flight, holding the current entry index.
    Running { index: usize },
    /// The last run finished and published its report.
    Completed,
}

/// What a run request produced.
#[derive(Debug)]
pub enum BatchRun {
    /// The roster was empty: no run executed; the fixed example roster is
    /// handed back so the operator can load it and run again.
    SampleLoaded(Vec<RosterEntry>),
    /// The run executed to completion.
    Completed(BatchReport),
}

/// Final accounting of one completed run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Successful outcomes only, in roster order. Failures are counted,
    /// logged, and excluded from export.
    pub uploaded: Vec<UploadOutcome>,

    /// Entries attempted (the roster snapshot size).
    pub attempted: usize,

    /// Entries whose upload (or render) failed.
    pub failed: usize,
}

/// Drives the roster through render and upload, one entry at a time.
pub struct BatchRunner {
    backend: Arc<dyn UploadBackend>,
    pacing: Duration,
    state: RunState,
}

impl BatchRunner {
    pub fn new(backend: Arc<dyn UploadBackend>) -> Self {
        Self {
            backend,
            pacing: DEFAULT_PACING,
            state: RunState::Idle,
        }
    }

    /// Override the pacing delay (tests run with `Duration::ZERO`).
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Execute one batch run over a roster snapshot.
    ///
    /// Entries are processed strictly in order. Per entry: publish
    /// progress, render, upload once, keep the outcome only if it
    /// succeeded, then pace unconditionally. A failed entry never aborts
    /// the batch; only `RenderUnavailable` does.
    pub async fn run(
        &mut self,
        engine: &RenderEngine,
        roster: &[RosterEntry],
        render_config: &RenderConfig,
        template: Option<&TemplateSurface>,
        credential: Option<&str>,
        progress: Option<ProgressCallback>,
    ) -> CertmillResult<BatchRun> {
        if matches!(self.state, RunState::Running { .. }) {
            return Err(CertmillError::batch("A batch run is already in progress"));
        }

        if roster.is_empty() {
            tracing::info!("Empty roster; loading the sample roster instead of running");
            return Ok(BatchRun::SampleLoaded(sample_roster()));
        }

        let total = roster.len();
        let mut uploaded: Vec<UploadOutcome> = Vec::new();
        let mut failed = 0usize;

        tracing::info!(entries = total, backend = self.backend.name(), "Starting batch run");

        for (index, entry) in roster.iter().enumerate() {
            self.state = RunState::Running { index };
            publish(
                &progress,
                BatchProgress {
                    current: index,
                    total,
                    percent: percent_complete(index, total),
                    running: true,
                },
            );

            let outcome = match engine.render(entry, render_config, template) {
                Ok(artifact) => self.backend.upload(&artifact, credential).await,
                Err(e @ CertmillError::RenderUnavailable { .. }) => {
                    // No drawing surface at all: fatal for the whole run.
                    self.state = RunState::Idle;
                    return Err(e);
                }
                Err(e) => {
                    // Per-entry render trouble is isolated: record a
                    // synthetic failure and keep going.
                    tracing::error!(name = %entry.certificate_name, error = %e, "Render failed");
                    UploadOutcome::failure(entry.clone(), entry.certificate_filename(), e.to_string())
                }
            };

            if outcome.is_success() {
                uploaded.push(outcome);
            } else {
                failed += 1;
                tracing::warn!(
                    name = %entry.certificate_name,
                    error = outcome.error().unwrap_or("unknown"),
                    "Upload failed"
                );
            }

            // Pacing is unconditional, success or not.
            if !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        self.state = RunState::Completed;
        publish(
            &progress,
            BatchProgress {
                current: total,
                total,
                percent: 100,
                running: false,
            },
        );

        tracing::info!(
            succeeded = uploaded.len(),
            failed,
            "Batch run complete"
        );

        Ok(BatchRun::Completed(BatchReport {
            uploaded,
            attempted: total,
            failed,
        }))
    }
}

fn publish(progress: &Option<ProgressCallback>, snapshot: BatchProgress) {
    if let Some(callback) = progress {
        callback(snapshot);
    }
}
