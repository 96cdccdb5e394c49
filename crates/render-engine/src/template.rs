//! Template background decoding.

use std::path::Path;

use certmill_common::{CertmillError, CertmillResult};
use image::RgbaImage;

/// A decoded background image plus its natural pixel dimensions.
///
/// Owned by the caller and passed by reference into each render; the
/// pipeline never mutates it.
#[derive(Debug, Clone)]
pub struct TemplateSurface {
    image: RgbaImage,
}

impl TemplateSurface {
    /// Decode a template from an uploaded image blob.
    pub fn from_bytes(bytes: &[u8]) -> CertmillResult<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| CertmillError::render(format!("Failed to decode template image: {e}")))?
            .to_rgba8();
        Ok(Self { image })
    }

    /// Load a template from disk.
    pub fn from_path(path: &Path) -> CertmillResult<Self> {
        if !path.exists() {
            return Err(CertmillError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub(crate) fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba};
    use std::io::Cursor;

    #[test]
    fn decodes_png_bytes_and_reports_natural_dimensions() {
        let image = RgbaImage::from_pixel(12, 34, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let template = TemplateSurface::from_bytes(&bytes).unwrap();
        assert_eq!((template.width(), template.height()), (12, 34));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(TemplateSurface::from_bytes(b"not an image").is_err());
    }
}
