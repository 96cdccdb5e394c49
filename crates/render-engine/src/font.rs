//! System font resolution.
//!
//! The render configuration carries a requested font family, but mapping
//! arbitrary family names would need a full font database. Instead the
//! engine resolves one concrete TTF at construction: an explicit
//! `CERTMILL_FONT` override first, then a list of common system font
//! locations.

use ab_glyph::FontVec;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Resolve a usable TTF font, if any exists on this system.
pub fn resolve_font() -> Option<FontVec> {
    if let Ok(path) = std::env::var("CERTMILL_FONT") {
        match load_font(&path) {
            Some(font) => return Some(font),
            None => {
                tracing::warn!(path, "CERTMILL_FONT did not yield a usable font");
            }
        }
    }

    for candidate in FONT_CANDIDATES {
        if let Some(font) = load_font(candidate) {
            tracing::debug!(path = candidate, "Resolved render font");
            return Some(font);
        }
    }

    None
}

fn load_font(path: &str) -> Option<FontVec> {
    let data = std::fs::read(path).ok()?;
    FontVec::try_from_vec(data).ok()
}
