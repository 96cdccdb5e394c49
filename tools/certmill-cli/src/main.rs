//! Certmill CLI — Command-line interface for batch certificate generation.
//!
//! Usage:
//!   certmill run <ROSTER>      Render and upload certificates for a roster
//!   certmill preview           Render a single certificate without uploading
//!   certmill check             Check fonts, credentials, and configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "certmill",
    about = "Batch certificate generation and upload",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which upload backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Folder-based object store on the local filesystem
    Folder,
    /// Google Drive (requires a bearer token)
    Drive,
}

#[derive(Subcommand)]
enum Commands {
    /// Render and upload certificates for every roster entry
    Run {
        /// Path to the roster CSV
        roster: PathBuf,

        /// Background template image (placeholder layout when omitted)
        #[arg(long)]
        template: Option<PathBuf>,

        /// Upload backend
        #[arg(long, value_enum, default_value = "folder")]
        backend: Backend,

        /// Root directory for the folder backend
        #[arg(long, default_value = ".")]
        folder_root: PathBuf,

        /// Destination container name
        #[arg(long)]
        folder: Option<String>,

        /// Bearer token for the Drive backend (falls back to CERTMILL_DRIVE_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Where to write the certificate-list report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Pacing delay between entries, in milliseconds
        #[arg(long)]
        pacing_ms: Option<u64>,

        /// Skip public-link sharing on the Drive backend
        #[arg(long)]
        no_public_links: bool,
    },

    /// Render one certificate without uploading
    Preview {
        /// Path to the roster CSV (sample roster when omitted)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Zero-based roster index to preview
        #[arg(long, default_value = "0")]
        index: usize,

        /// Background template image
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output PNG path
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },

    /// Check fonts, credentials, and configuration
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    certmill_common::logging::init_logging(&certmill_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Run {
            roster,
            template,
            backend,
            folder_root,
            folder,
            token,
            report,
            pacing_ms,
            no_public_links,
        } => {
            commands::run::run(
                roster,
                template,
                backend,
                folder_root,
                folder,
                token,
                report,
                pacing_ms,
                no_public_links,
            )
            .await
        }
        Commands::Preview {
            roster,
            index,
            template,
            output,
        } => commands::preview::run(roster, index, template, output),
        Commands::Check => commands::check::run(),
    }
}
