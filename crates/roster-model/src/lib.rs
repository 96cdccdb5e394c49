//! Certmill Roster Model
//!
//! Data types shared across the pipeline: roster entries, per-run
//! configuration snapshots, upload outcomes, roster ingestion from
//! tabular files, and the certificate-list report export.

pub mod config;
pub mod entry;
pub mod ingest;
pub mod outcome;
pub mod report;

pub use config::{RenderConfig, UploadConfig};
pub use entry::{sample_roster, RosterEntry};
pub use ingest::parse_roster;
pub use outcome::UploadOutcome;
pub use report::{certificate_list_csv, REPORT_FILENAME};
