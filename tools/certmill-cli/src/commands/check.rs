//! Check fonts, credentials, and configuration.

use certmill_common::config::AppConfig;
use certmill_render_engine::font::resolve_font;

pub fn run() -> anyhow::Result<()> {
    println!("Certmill Setup Check");
    println!("{}", "=".repeat(50));

    // Render font
    match resolve_font() {
        Some(_) => println!("[OK] Render font resolved"),
        None => println!("[FAIL] No usable font found; set CERTMILL_FONT to a TTF path"),
    }
    if let Ok(path) = std::env::var("CERTMILL_FONT") {
        println!("     CERTMILL_FONT={path}");
    }

    // Drive credential
    match std::env::var("CERTMILL_DRIVE_TOKEN") {
        Ok(token) if !token.trim().is_empty() => {
            println!("[OK] Drive token present in CERTMILL_DRIVE_TOKEN");
        }
        _ => {
            println!("[WARN] CERTMILL_DRIVE_TOKEN not set (folder backend needs no credential)");
        }
    }

    // Defaults
    let config = AppConfig::load();
    println!("[OK] Defaults loaded:");
    println!("     Container: {}", config.batch.folder_path);
    println!("     Pacing: {}ms", config.batch.pacing_ms);
    println!(
        "     Public links: {}",
        if config.batch.generate_public_links {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(())
}
