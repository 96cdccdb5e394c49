//! Certmill Batch Engine
//!
//! The sequential pipeline core: for each roster entry, in original
//! order, render a certificate, attempt one upload, record the outcome,
//! publish progress, and pace before the next entry.
//!
//! ```text
//! roster ──▶ Running { index } ──▶ render ──▶ upload ──▶ accumulate
//!                 ▲                                          │
//!                 └────────────── pacing delay ◀─────────────┘
//!                                                  │ (roster exhausted)
//!                                                  ▼
//!                                              Completed
//! ```
//!
//! Error isolation: a failed entry is recorded and the run continues; only
//! `RenderUnavailable` aborts the batch. Suspension happens at exactly two
//! points — the upload round-trip and the pacing delay.

pub mod progress;
pub mod runner;

pub use progress::{percent_complete, BatchProgress, ProgressCallback};
pub use runner::{BatchReport, BatchRun, BatchRunner, RunState};
