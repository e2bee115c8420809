//! The classification facade: one call from encoded image bytes to a label.
//!
//! [`ImageClassifier`] wires the pipeline stages together and drives them
//! strictly in order: resize, normalize, forward pass, label decode. Model
//! and labels are loaded once at construction and are read-only afterwards;
//! everything produced during a call is scoped to that call.

use crate::core::{
    ByteProvider, ClassifyError, ClassifyResult, FileProvider, MemoryProvider, OrtModel,
    ScoreModel,
};
use crate::processors::{CenterCropResizer, LabelDecoder, NormalizeImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration for an image classifier.
///
/// The defaults match the EfficientNet/Food-101 deployment this crate was
/// built around; override the tensor names for models exported with a
/// different signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Name of the model's input tensor.
    pub input_name: String,
    /// Name of the model's output score tensor.
    pub output_name: String,
    /// Model input resolution as (width, height).
    pub input_shape: (u32, u32),
}

impl ClassifierConfig {
    /// Configuration for the EfficientNet model trained on Food-101.
    pub fn food101() -> Self {
        Self {
            input_name: "input.1".to_string(),
            output_name: "650".to_string(),
            input_shape: (224, 224),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClassifyResult<()> {
        if self.input_name.is_empty() {
            return Err(ClassifyError::invalid_input("input tensor name is empty"));
        }
        if self.output_name.is_empty() {
            return Err(ClassifyError::invalid_input("output tensor name is empty"));
        }
        let (width, height) = self.input_shape;
        if width == 0 || height == 0 {
            return Err(ClassifyError::invalid_input(format!(
                "input shape must be non-zero, got {width}x{height}"
            )));
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::food101()
    }
}

/// Classifies a single photograph into one of a fixed set of categories.
///
/// The model seam is generic so tests can drive the full pipeline with a
/// deterministic stand-in; production code uses the [`OrtModel`] default.
#[derive(Debug)]
pub struct ImageClassifier<M: ScoreModel = OrtModel> {
    resize: CenterCropResizer,
    normalize: NormalizeImage,
    model: M,
    decode: LabelDecoder,
}

impl<M: ScoreModel> ImageClassifier<M> {
    pub(crate) fn from_parts(
        resize: CenterCropResizer,
        normalize: NormalizeImage,
        model: M,
        decode: LabelDecoder,
    ) -> Self {
        Self {
            resize,
            normalize,
            model,
            decode,
        }
    }

    /// Returns the number of categories the classifier can produce.
    pub fn num_labels(&self) -> usize {
        self.decode.num_labels()
    }

    /// Classifies encoded image bytes and returns the winning label.
    ///
    /// The stages run strictly in order and every failure propagates
    /// verbatim; there is no partial result, retry, or fallback.
    ///
    /// # Errors
    ///
    /// * [`ClassifyError::InvalidInput`] - the byte buffer is empty, or the
    ///   winning label cleans up to an empty string.
    /// * [`ClassifyError::Decode`] - the bytes do not parse as an image.
    /// * [`ClassifyError::ShapeMismatch`] - the model output does not line
    ///   up with the configured output name or the label set.
    /// * [`ClassifyError::Inference`] - the forward pass itself failed.
    pub fn classify_image(&self, raw: &[u8]) -> ClassifyResult<String> {
        if raw.is_empty() {
            return Err(ClassifyError::invalid_input("image bytes must not be empty"));
        }

        let resized = self.resize.resize(raw)?;
        debug!(bytes = resized.len(), "resized input image");

        let tensor = self.normalize.normalize_to(&resized)?;
        let scores = self.model.run(&tensor)?;
        debug!(scores = scores.len(), "model produced score vector");

        let label = self.decode.decode(&scores)?;
        debug!(%label, "classification complete");
        Ok(label)
    }
}

/// Builder for [`ImageClassifier`] backed by ONNX Runtime.
///
/// Model bytes and label text arrive through [`ByteProvider`] collaborators,
/// keeping the classifier independent of how resources are packaged.
pub struct ImageClassifierBuilder {
    config: ClassifierConfig,
    model: Option<Box<dyn ByteProvider>>,
    labels: Option<Box<dyn ByteProvider>>,
}

impl ImageClassifierBuilder {
    /// Creates a builder with the default (Food-101) configuration.
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            model: None,
            labels: None,
        }
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Supplies model bytes through an arbitrary provider.
    pub fn model_provider(mut self, provider: impl ByteProvider + 'static) -> Self {
        self.model = Some(Box::new(provider));
        self
    }

    /// Reads the model from a file on disk.
    pub fn model_file(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.model_provider(FileProvider::new(path))
    }

    /// Uses model bytes already held in memory.
    pub fn model_bytes(self, bytes: Vec<u8>) -> Self {
        self.model_provider(MemoryProvider::new(bytes))
    }

    /// Supplies label text through an arbitrary provider.
    pub fn labels_provider(mut self, provider: impl ByteProvider + 'static) -> Self {
        self.labels = Some(Box::new(provider));
        self
    }

    /// Reads newline-separated label text from a file on disk.
    pub fn labels_file(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.labels_provider(FileProvider::new(path))
    }

    /// Uses newline-separated label text already held in memory.
    pub fn labels_text(self, text: impl Into<String>) -> Self {
        self.labels_provider(MemoryProvider::new(text.into().into_bytes()))
    }

    /// Loads the model and labels and constructs the classifier.
    ///
    /// Both resources are read exactly once here; later classification calls
    /// reuse them without reloading.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::LoadFailure`] if either provider is missing
    /// or its resource is empty or unparseable.
    pub fn build(self) -> ClassifyResult<ImageClassifier<OrtModel>> {
        self.config.validate()?;

        let model_provider = self
            .model
            .ok_or_else(|| ClassifyError::load_failure("no model provider configured"))?;
        let labels_provider = self
            .labels
            .ok_or_else(|| ClassifyError::load_failure("no label provider configured"))?;

        let label_bytes = labels_provider.bytes()?;
        let label_text = String::from_utf8(label_bytes).map_err(|e| {
            ClassifyError::load_failure_with_source("label text is not valid UTF-8", e)
        })?;
        let decode = LabelDecoder::from_text(&label_text)?;

        let model_bytes = model_provider.bytes()?;
        let model = OrtModel::from_bytes(
            &model_bytes,
            &self.config.input_name,
            &self.config.output_name,
        )?;

        let (width, height) = self.config.input_shape;
        info!(
            labels = decode.num_labels(),
            input = %self.config.input_name,
            output = %self.config.output_name,
            "image classifier initialized"
        );

        Ok(ImageClassifier::from_parts(
            CenterCropResizer::new(width, height),
            NormalizeImage::imagenet(),
            model,
            decode,
        ))
    }
}

impl Default for ImageClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tensor4D;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    /// Deterministic model stand-in: returns a fixed score vector.
    struct FixedScores(Vec<f32>);

    impl ScoreModel for FixedScores {
        fn run(&self, input: &Tensor4D) -> ClassifyResult<Vec<f32>> {
            assert_eq!(input.shape(), &[1, 3, 224, 224]);
            Ok(self.0.clone())
        }
    }

    fn classifier_with(scores: Vec<f32>, labels: &str) -> ImageClassifier<FixedScores> {
        ImageClassifier::from_parts(
            CenterCropResizer::new(224, 224),
            NormalizeImage::imagenet(),
            FixedScores(scores),
            LabelDecoder::from_text(labels).unwrap(),
        )
    }

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([180, 120, 60]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    const LABELS: &str = "apple_pie\nbaby_back_ribs\nbeef_carpaccio\nbeignets";

    #[test]
    fn end_to_end_returns_the_winning_label() {
        let classifier = classifier_with(vec![0.1, 2.5, 0.3, 0.0], LABELS);
        let label = classifier.classify_image(&encode_png(640, 480)).unwrap();
        assert_eq!(label, "baby back ribs");
    }

    #[test]
    fn target_sized_input_skips_the_resample_path() {
        let classifier = classifier_with(vec![3.0, 0.1, 0.1, 0.1], LABELS);
        let label = classifier.classify_image(&encode_png(224, 224)).unwrap();
        assert_eq!(label, "apple pie");
    }

    #[test]
    fn empty_bytes_are_rejected_before_any_stage_runs() {
        let classifier = classifier_with(vec![1.0, 0.0, 0.0, 0.0], LABELS);
        let err = classifier.classify_image(&[]).unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidInput { .. }));
    }

    #[test]
    fn corrupt_bytes_surface_as_decode_failures() {
        let classifier = classifier_with(vec![1.0, 0.0, 0.0, 0.0], LABELS);
        let err = classifier.classify_image(b"not an image").unwrap_err();
        assert!(matches!(err, ClassifyError::Decode(_)));
    }

    #[test]
    fn score_vector_longer_than_label_set_is_a_shape_mismatch() {
        let classifier = classifier_with(vec![0.0, 0.0, 0.0, 0.0, 9.0], LABELS);
        let err = classifier.classify_image(&encode_png(640, 480)).unwrap_err();
        assert!(matches!(err, ClassifyError::ShapeMismatch { .. }));
    }

    #[test]
    fn builder_without_model_provider_fails_to_build() {
        let err = ImageClassifierBuilder::new()
            .labels_text(LABELS)
            .build()
            .unwrap_err();
        assert!(matches!(err, ClassifyError::LoadFailure { .. }));
    }

    #[test]
    fn builder_with_empty_model_bytes_fails_to_build() {
        let err = ImageClassifierBuilder::new()
            .model_bytes(Vec::new())
            .labels_text(LABELS)
            .build()
            .unwrap_err();
        assert!(matches!(err, ClassifyError::LoadFailure { .. }));
    }

    #[test]
    fn config_validation_rejects_blank_tensor_names() {
        let config = ClassifierConfig {
            input_name: String::new(),
            ..ClassifierConfig::food101()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_serde() {
        let json = serde_json::to_string(&ClassifierConfig::food101()).unwrap();
        let config: ClassifierConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.input_name, "input.1");
        assert_eq!(config.output_name, "650");
        assert_eq!(config.input_shape, (224, 224));
    }
}
