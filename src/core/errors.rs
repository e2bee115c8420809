//! Error types for the classification pipeline.
//!
//! Every stage surfaces its failures through [`ClassifyError`]; no stage
//! recovers locally or substitutes a fallback result. The variants map the
//! pipeline's failure taxonomy: invalid caller input, image decode failures,
//! resource load failures at startup, and tensor/label shape mismatches,
//! plus pass-through variants for the underlying runtime crates.

use thiserror::Error;

/// Convenient result alias for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Errors produced by the classification pipeline.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The caller handed the pipeline unusable input, or the pipeline
    /// produced an empty final label.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// The supplied bytes do not parse as an image.
    #[error("image decode")]
    Decode(#[from] image::ImageError),

    /// The model or label resource is missing, empty, or unparseable.
    #[error("resource load failed: {message}")]
    LoadFailure {
        /// A message describing which resource failed and why.
        message: String,
        /// The underlying error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The model output does not line up with what the pipeline expects:
    /// the configured output tensor is absent, or the arg-max index falls
    /// outside the label set.
    #[error("shape mismatch: {message}")]
    ShapeMismatch {
        /// A message describing the mismatch.
        message: String,
    },

    /// The ONNX Runtime forward pass failed.
    #[error("inference")]
    Inference(#[source] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ClassifyError {
    /// Creates a ClassifyError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a ClassifyError for a resource that failed to load.
    pub fn load_failure(message: impl Into<String>) -> Self {
        Self::LoadFailure {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a ClassifyError for a resource that failed to load,
    /// chaining the underlying error.
    pub fn load_failure_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::LoadFailure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a ClassifyError for a model-output/label-set mismatch.
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }
}
