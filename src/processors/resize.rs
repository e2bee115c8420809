//! Aspect-preserving resize with center crop.
//!
//! Classification networks expect a fixed square input. The resizer scales
//! the source so its shorter side matches the target, which guarantees the
//! scaled image covers the target square, then crops the center region and
//! re-encodes it.

use crate::core::ClassifyResult;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::io::Cursor;

/// Resizes encoded image bytes to a fixed target resolution via uniform
/// scale plus center crop.
#[derive(Debug, Clone)]
pub struct CenterCropResizer {
    target_width: u32,
    target_height: u32,
}

/// Computes the scaled dimensions for a uniform ratio that maps the source's
/// shorter side onto the target's shorter side.
pub(crate) fn scaled_dimensions(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32) {
    let ratio = target_width.min(target_height) as f32 / src_width.min(src_height) as f32;
    let width = (ratio * src_width as f32).round() as u32;
    let height = (ratio * src_height as f32).round() as u32;
    // Rounding must never leave the scaled image short of the crop window.
    (width.max(target_width), height.max(target_height))
}

/// Computes the top-left corner of a centered crop window.
pub(crate) fn crop_offsets(
    scaled_width: u32,
    scaled_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32) {
    let horizontal_slack = scaled_width - target_width;
    let vertical_slack = scaled_height - target_height;
    (horizontal_slack / 2, vertical_slack / 2)
}

impl CenterCropResizer {
    /// Creates a resizer for the given target resolution.
    pub fn new(target_width: u32, target_height: u32) -> Self {
        Self {
            target_width,
            target_height,
        }
    }

    /// Returns the target resolution as (width, height).
    pub fn target_shape(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }

    /// Resizes encoded image bytes to the target resolution and returns the
    /// result as JPEG bytes at maximum quality.
    ///
    /// If the source already matches the target resolution the input bytes
    /// are returned unchanged, without re-encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Decode`](crate::core::ClassifyError::Decode)
    /// if the bytes do not parse as an image.
    pub fn resize(&self, raw: &[u8]) -> ClassifyResult<Vec<u8>> {
        let source = image::load_from_memory(raw)?;

        if source.width() == self.target_width && source.height() == self.target_height {
            return Ok(raw.to_vec());
        }

        let (scaled_width, scaled_height) = scaled_dimensions(
            source.width(),
            source.height(),
            self.target_width,
            self.target_height,
        );
        let scaled = source.resize_exact(scaled_width, scaled_height, FilterType::Triangle);

        let (left, top) = crop_offsets(
            scaled_width,
            scaled_height,
            self.target_width,
            self.target_height,
        );
        let cropped = scaled
            .crop_imm(left, top, self.target_width, self.target_height)
            .to_rgb8();

        let mut encoded = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut encoded, 100);
        cropped.write_with_encoder(encoder)?;
        Ok(encoded.into_inner())
    }
}

impl Default for CenterCropResizer {
    fn default() -> Self {
        Self::new(224, 224)
    }
}
