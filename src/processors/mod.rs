//! Image processing stages of the classification pipeline.
//!
//! * `resize` - aspect-preserving scale plus center crop to the model input
//!   resolution
//! * `normalization` - per-channel normalization into a planar float tensor
//! * `postprocess` - arg-max score reduction and label cleanup

pub mod normalization;
pub mod postprocess;
pub mod resize;

pub use normalization::NormalizeImage;
pub use postprocess::LabelDecoder;
pub use resize::CenterCropResizer;
