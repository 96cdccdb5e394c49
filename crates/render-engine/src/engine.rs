//! The per-entry render operation.

use std::io::Cursor;

use ab_glyph::{FontVec, PxScale};
use certmill_common::{CertmillError, CertmillResult};
use certmill_roster_model::{RenderConfig, RosterEntry};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::font::resolve_font;
use crate::surface::SurfaceSlot;
use crate::template::TemplateSurface;

const PLACEHOLDER_TITLE: &str = "Certificate of Participation";
const PLACEHOLDER_TITLE_SIZE: f32 = 36.0;
const PLACEHOLDER_CAPTION_SIZE: f32 = 24.0;
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// One rendered certificate: lossless PNG bytes plus the derived filename.
///
/// Produced fresh per entry and handed to the upload adapter; not kept
/// around beyond the upload attempt.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub entry: RosterEntry,
    pub filename: String,
    pub png: Vec<u8>,
}

/// Renders certificates onto a single-occupancy drawing surface.
pub struct RenderEngine {
    font: FontVec,
    slot: SurfaceSlot,
}

impl RenderEngine {
    /// Construct an engine with a system-resolved font.
    ///
    /// Fails with `RenderUnavailable` when no drawing surface can be
    /// produced at all, which is fatal for a whole batch run.
    pub fn new() -> CertmillResult<Self> {
        let font = resolve_font().ok_or_else(|| {
            CertmillError::render_unavailable(
                "No usable font found; set CERTMILL_FONT to a TTF path",
            )
        })?;
        Ok(Self::with_font(font))
    }

    /// Construct an engine around an explicit font.
    pub fn with_font(font: FontVec) -> Self {
        Self {
            font,
            slot: SurfaceSlot::new(),
        }
    }

    /// Render one certificate.
    ///
    /// The surface is reset to `config.width x config.height`, the
    /// template (or placeholder layout) is drawn, and the entry's name is
    /// drawn last, centered both ways on the configured anchor point.
    /// Purely a function of its inputs: no network or filesystem access.
    pub fn render(
        &self,
        entry: &RosterEntry,
        config: &RenderConfig,
        template: Option<&TemplateSurface>,
    ) -> CertmillResult<Artifact> {
        let _guard = self.slot.acquire()?;

        if config.width == 0 || config.height == 0 {
            return Err(CertmillError::render(format!(
                "Invalid canvas dimensions {}x{}",
                config.width, config.height
            )));
        }

        let mut canvas = match template {
            // Template stretched to fill the surface exactly.
            Some(template) => imageops::resize(
                template.image(),
                config.width,
                config.height,
                FilterType::Triangle,
            ),
            None => self.placeholder(config),
        };

        let color = parse_hex_color(&config.text_color).unwrap_or_else(|| {
            tracing::warn!(color = %config.text_color, "Unparseable text color, using black");
            BLACK
        });

        // Name goes on last, centered vertically and horizontally on the
        // anchor. The configured alignment is accepted but never varies
        // this; see RenderConfig::text_align.
        let scale = PxScale::from(config.font_size as f32);
        draw_centered(
            &mut canvas,
            color,
            &self.font,
            scale,
            config.name_x as i32,
            config.name_y as i32,
            VAlign::Middle,
            &entry.certificate_name,
        );

        tracing::debug!(
            name = %entry.certificate_name,
            width = config.width,
            height = config.height,
            family = %config.font_family,
            "Rendered certificate"
        );

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| CertmillError::render(format!("PNG encoding failed: {e}")))?;

        Ok(Artifact {
            entry: entry.clone(),
            filename: entry.certificate_filename(),
            png,
        })
    }

    /// Deterministic layout used when no template is supplied: white fill,
    /// a 4-unit border inset 20 units, a title line, and two caption lines
    /// built from the event name and date.
    fn placeholder(&self, config: &RenderConfig) -> RgbaImage {
        let (w, h) = (config.width, config.height);
        let mut canvas = RgbaImage::from_pixel(w, h, WHITE);

        // Stroked 4-unit rectangle centered on the 20-unit inset path.
        for i in 0..4u32 {
            let inset = 18 + i;
            if w > inset * 2 && h > inset * 2 {
                let rect =
                    Rect::at(inset as i32, inset as i32).of_size(w - inset * 2, h - inset * 2);
                draw_hollow_rect_mut(&mut canvas, rect, BLACK);
            }
        }

        let center_x = (w / 2) as i32;
        draw_centered(
            &mut canvas,
            BLACK,
            &self.font,
            PxScale::from(PLACEHOLDER_TITLE_SIZE),
            center_x,
            150,
            VAlign::Baseline,
            PLACEHOLDER_TITLE,
        );
        draw_centered(
            &mut canvas,
            BLACK,
            &self.font,
            PxScale::from(PLACEHOLDER_CAPTION_SIZE),
            center_x,
            200,
            VAlign::Baseline,
            &config.event_name,
        );
        draw_centered(
            &mut canvas,
            BLACK,
            &self.font,
            PxScale::from(PLACEHOLDER_CAPTION_SIZE),
            center_x,
            h as i32 - 100,
            VAlign::Baseline,
            &config.event_date,
        );

        canvas
    }
}

/// Vertical anchoring for text placement.
enum VAlign {
    /// The anchor y is the text baseline (caption lines).
    Baseline,
    /// The anchor y is the vertical center of the text (the name).
    Middle,
}

#[allow(clippy::too_many_arguments)]
fn draw_centered(
    canvas: &mut RgbaImage,
    color: Rgba<u8>,
    font: &FontVec,
    scale: PxScale,
    anchor_x: i32,
    anchor_y: i32,
    valign: VAlign,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    let (tw, th) = text_size(scale, font, text);
    let x = anchor_x - tw as i32 / 2;
    let y = match valign {
        VAlign::Baseline => anchor_y - th as i32,
        VAlign::Middle => anchor_y - th as i32 / 2,
    };
    draw_text_mut(canvas, color, x, y, scale, font, text);
}

/// Parse a `#rrggbb` color string.
fn parse_hex_color(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgba([r, g, b, 255]))
}
