//! Render one certificate without uploading.

use std::path::PathBuf;

use certmill_render_engine::{RenderEngine, TemplateSurface};
use certmill_roster_model::{parse_roster, sample_roster, RenderConfig};

pub fn run(
    roster_path: Option<PathBuf>,
    index: usize,
    template_path: Option<PathBuf>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let roster = match &roster_path {
        Some(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                anyhow::anyhow!("Failed to read roster {}: {e}", path.display())
            })?;
            parse_roster(&bytes)?
        }
        None => sample_roster(),
    };

    // Out-of-range indices fall back to the first sample entry.
    let entry = roster
        .get(index)
        .cloned()
        .unwrap_or_else(|| sample_roster().remove(0));

    let mut render_config = RenderConfig::default();
    let template = match &template_path {
        Some(path) => {
            let surface = TemplateSurface::from_path(path)?;
            render_config.fit_to_template(surface.width(), surface.height());
            Some(surface)
        }
        None => None,
    };

    let engine = RenderEngine::new()?;
    let artifact = engine.render(&entry, &render_config, template.as_ref())?;

    std::fs::write(&output, &artifact.png)?;
    println!("Preview for: {}", entry.certificate_name);
    println!(
        "  Canvas: {}x{}",
        render_config.width, render_config.height
    );
    println!("  Written: {}", output.display());

    Ok(())
}
