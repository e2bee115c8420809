//! # food-classifier
//!
//! A Rust library that classifies a photograph into one of a fixed set of
//! food categories using a pretrained ONNX image-classification network
//! executed locally.
//!
//! ## Pipeline
//!
//! One classification call runs four stages strictly in order:
//!
//! 1. **Resize**: decode the input bytes and scale/center-crop them to the
//!    model's 224x224 input resolution.
//! 2. **Normalize**: convert pixels into a planar `[1, 3, 224, 224]` float
//!    tensor using the network's training-time per-channel statistics.
//! 3. **Infer**: run a single forward pass through the loaded model.
//! 4. **Decode**: reduce the score vector to a label via arg-max and clean
//!    up the label text.
//!
//! ## Modules
//!
//! * [`core`] - error types, tensor aliases, provider traits, and the ONNX
//!   Runtime engine
//! * [`processors`] - resize, normalization, and postprocess stages
//! * [`classifier`] - the [`ImageClassifier`](classifier::ImageClassifier)
//!   facade and its builder
//! * [`utils`] - tracing setup
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use food_classifier::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = ImageClassifierBuilder::new()
//!     .model_file("models/efficientnet_food101.onnx")
//!     .labels_file("models/classes.txt")
//!     .build()?;
//!
//! let image = std::fs::read("dinner.jpg")?;
//! let label = classifier.classify_image(&image)?;
//! println!("{label}");
//! # Ok(())
//! # }
//! ```
//!
//! The crate is synchronous; callers in async contexts should wrap
//! `classify_image` in their runtime's blocking facility (for example
//! `tokio::task::spawn_blocking`).

pub mod classifier;
pub mod core;
pub mod processors;
pub mod utils;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::classifier::{ClassifierConfig, ImageClassifier, ImageClassifierBuilder};
    pub use crate::core::{
        ByteProvider, ClassifyError, ClassifyResult, FileProvider, MemoryProvider, OrtModel,
        ScoreModel, Tensor4D,
    };
    pub use crate::processors::{CenterCropResizer, LabelDecoder, NormalizeImage};
}
