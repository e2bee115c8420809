//! Core traits: resource byte providers and the score-model seam.

use crate::core::{ClassifyError, ClassifyResult, Tensor4D};
use std::path::{Path, PathBuf};

/// Supplies the raw bytes of a bundled resource (model weights, label text).
///
/// The pipeline never cares how a resource is packaged; anything that can
/// hand over a byte buffer once at startup can back a classifier.
pub trait ByteProvider {
    /// Reads the full resource into memory.
    fn bytes(&self) -> ClassifyResult<Vec<u8>>;
}

/// Reads a resource from a file on disk.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    /// Creates a provider for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this provider reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteProvider for FileProvider {
    fn bytes(&self) -> ClassifyResult<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| {
            ClassifyError::load_failure_with_source(
                format!("failed to read resource at '{}'", self.path.display()),
                e,
            )
        })
    }
}

/// Serves a resource already held in memory.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    data: Vec<u8>,
}

impl MemoryProvider {
    /// Wraps an in-memory byte buffer.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl ByteProvider for MemoryProvider {
    fn bytes(&self) -> ClassifyResult<Vec<u8>> {
        Ok(self.data.clone())
    }
}

/// A loaded, immutable inference model that maps one input tensor to a
/// flat score vector, one score per category.
///
/// [`OrtModel`](crate::core::OrtModel) is the production implementation;
/// tests drive the facade through deterministic stand-ins.
pub trait ScoreModel {
    /// Executes a single forward pass.
    fn run(&self, input: &Tensor4D) -> ClassifyResult<Vec<f32>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_provider_round_trips() {
        let provider = MemoryProvider::new(vec![1, 2, 3]);
        assert_eq!(provider.bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn file_provider_reports_missing_files_as_load_failures() {
        let provider = FileProvider::new("/definitely/not/here.onnx");
        let err = provider.bytes().unwrap_err();
        assert!(matches!(err, ClassifyError::LoadFailure { .. }));
    }
}
