//! Run a full batch: render, upload, report.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use certmill_batch_engine::{BatchProgress, BatchRun, BatchRunner, ProgressCallback};
use certmill_common::config::AppConfig;
use certmill_render_engine::{RenderEngine, TemplateSurface};
use certmill_roster_model::{
    certificate_list_csv, parse_roster, RenderConfig, UploadConfig, REPORT_FILENAME,
};
use certmill_upload_engine::{DriveBackend, FolderStoreBackend, UploadBackend};

use crate::Backend;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    roster_path: PathBuf,
    template_path: Option<PathBuf>,
    backend: Backend,
    folder_root: PathBuf,
    folder: Option<String>,
    token: Option<String>,
    report_path: Option<PathBuf>,
    pacing_ms: Option<u64>,
    no_public_links: bool,
) -> anyhow::Result<()> {
    let app_config = AppConfig::load();
    let token = token.or_else(|| std::env::var("CERTMILL_DRIVE_TOKEN").ok());

    let bytes = std::fs::read(&roster_path)
        .map_err(|e| anyhow::anyhow!("Failed to read roster {}: {e}", roster_path.display()))?;
    let roster = parse_roster(&bytes)?;
    println!("Loaded roster: {} entries", roster.len());

    let mut render_config = RenderConfig::default();
    let template = match &template_path {
        Some(path) => {
            let surface = TemplateSurface::from_path(path)?;
            // The canvas adopts the template's natural dimensions.
            render_config.fit_to_template(surface.width(), surface.height());
            println!(
                "Template: {} ({}x{})",
                path.display(),
                surface.width(),
                surface.height()
            );
            Some(surface)
        }
        None => None,
    };

    let upload_config = UploadConfig {
        enabled: true,
        folder_path: folder.unwrap_or_else(|| app_config.batch.folder_path.clone()),
        generate_public_links: !no_public_links && app_config.batch.generate_public_links,
    };

    let backend: Arc<dyn UploadBackend> = match backend {
        Backend::Folder => Arc::new(FolderStoreBackend::new(
            folder_root,
            upload_config.resolved_folder(),
        )),
        Backend::Drive => {
            if token.is_none() {
                println!("No Drive token supplied; every upload will fail until one is provided");
            }
            Arc::new(DriveBackend::new(&upload_config))
        }
    };
    println!("  Backend: {}", backend.name());
    println!("  Container: {}", upload_config.resolved_folder());

    let engine = RenderEngine::new()
        .map_err(|e| anyhow::anyhow!("Cannot start batch: {e}"))?;

    let pacing = Duration::from_millis(pacing_ms.unwrap_or(app_config.batch.pacing_ms));
    let mut runner = BatchRunner::new(backend).with_pacing(pacing);

    let progress: ProgressCallback = Box::new(|p: BatchProgress| {
        print!("\r  Progress: {}% ({}/{})  ", p.percent, p.current, p.total);
        std::io::stdout().flush().ok();
    });

    let run = runner
        .run(
            &engine,
            &roster,
            &render_config,
            template.as_ref(),
            token.as_deref(),
            Some(progress),
        )
        .await?;

    match run {
        BatchRun::SampleLoaded(sample) => {
            println!("Roster was empty; nothing was uploaded.");
            println!("Sample roster loaded ({} entries):", sample.len());
            for entry in &sample {
                println!("  {} <{}>", entry.certificate_name, entry.email);
            }
        }
        BatchRun::Completed(report) => {
            println!();
            println!(
                "Batch complete: {} uploaded, {} failed (of {})",
                report.uploaded.len(),
                report.failed,
                report.attempted
            );

            let report_path = report_path.unwrap_or_else(|| PathBuf::from(REPORT_FILENAME));
            std::fs::write(&report_path, certificate_list_csv(&report.uploaded))?;
            println!("  Report: {}", report_path.display());
        }
    }

    Ok(())
}
