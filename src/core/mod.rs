//! Core error handling, shared tensor aliases, traits, and the inference
//! engine.

pub mod errors;
pub mod inference;
pub mod traits;

pub use errors::{ClassifyError, ClassifyResult};
pub use inference::OrtModel;
pub use traits::{ByteProvider, FileProvider, MemoryProvider, ScoreModel};

/// A 4-dimensional tensor in NCHW layout.
pub type Tensor4D = ndarray::Array4<f32>;
