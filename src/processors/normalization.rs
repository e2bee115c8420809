//! Per-channel image normalization into a planar float tensor.
//!
//! Pixels are mapped with `(value / 255 - mean) / std` per channel and laid
//! out CHW: every red value in row-major pixel order, then every green value,
//! then every blue value. The mean and std defaults are the ImageNet training
//! statistics the network was trained with and must not be altered.

use crate::core::{ClassifyError, ClassifyResult, Tensor4D};

/// Normalizes a decoded image into a `[1, 3, H, W]` tensor.
///
/// The per-channel arithmetic is precomputed as `alpha = scale / std` and
/// `beta = -mean / std`, so each pixel costs one multiply-add.
#[derive(Debug, Clone)]
pub struct NormalizeImage {
    alpha: [f32; 3],
    beta: [f32; 3],
}

impl NormalizeImage {
    /// Creates a normalizer from a scale factor and per-channel mean/std.
    ///
    /// # Errors
    ///
    /// Returns an error if the scale is not positive or any std is not
    /// positive.
    pub fn new(scale: f32, mean: [f32; 3], std: [f32; 3]) -> ClassifyResult<Self> {
        if scale <= 0.0 {
            return Err(ClassifyError::invalid_input(
                "normalization scale must be greater than 0",
            ));
        }
        for (i, &s) in std.iter().enumerate() {
            if s <= 0.0 {
                return Err(ClassifyError::invalid_input(format!(
                    "standard deviation at index {i} must be greater than 0, got {s}"
                )));
            }
        }

        let mut alpha = [0.0; 3];
        let mut beta = [0.0; 3];
        for c in 0..3 {
            alpha[c] = scale / std[c];
            beta[c] = -mean[c] / std[c];
        }
        Ok(Self { alpha, beta })
    }

    /// Creates the normalizer matching the network's training-time
    /// statistics: scale 1/255, ImageNet mean and std.
    pub fn imagenet() -> Self {
        let mean = [0.485f32, 0.456, 0.406];
        let std = [0.229f32, 0.224, 0.225];
        let mut alpha = [0.0; 3];
        let mut beta = [0.0; 3];
        for c in 0..3 {
            alpha[c] = 1.0 / 255.0 / std[c];
            beta[c] = -mean[c] / std[c];
        }
        Self { alpha, beta }
    }

    /// Decodes encoded image bytes and normalizes them into a planar
    /// `[1, 3, H, W]` tensor.
    ///
    /// The caller is expected to hand over an image already at the model's
    /// input resolution; this function normalizes whatever it decodes.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Decode`] if the bytes do not parse as an
    /// image.
    pub fn normalize_to(&self, encoded: &[u8]) -> ClassifyResult<Tensor4D> {
        let rgb = image::load_from_memory(encoded)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let plane = width as usize * height as usize;
        let mut buffer = vec![0.0f32; 3 * plane];
        for (i, pixel) in rgb.pixels().enumerate() {
            for c in 0..3 {
                buffer[c * plane + i] = pixel[c] as f32 * self.alpha[c] + self.beta[c];
            }
        }

        let tensor =
            Tensor4D::from_shape_vec((1, 3, height as usize, width as usize), buffer)?;
        Ok(tensor)
    }
}

impl Default for NormalizeImage {
    fn default() -> Self {
        Self::imagenet()
    }
}
