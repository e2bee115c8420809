//! ONNX Runtime inference engine for single-image classification.
//!
//! [`OrtModel`] owns one session loaded from raw model bytes. The model is
//! immutable after construction; the session sits behind a `Mutex` because
//! `Session::run` needs exclusive access, which also serializes concurrent
//! callers to one execution in flight at a time.

use crate::core::{ClassifyError, ClassifyResult, ScoreModel, Tensor4D};
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::TensorRef;
use std::sync::Mutex;

/// A classification model backed by an ONNX Runtime session.
pub struct OrtModel {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl std::fmt::Debug for OrtModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtModel")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .finish()
    }
}

impl OrtModel {
    /// Loads a model from its serialized bytes.
    ///
    /// The model must expose an input tensor under `input_name`; its scores
    /// are read from the output tensor named `output_name` on every run.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::LoadFailure`] if the byte buffer is empty or
    /// does not parse as an ONNX model.
    pub fn from_bytes(
        model_bytes: &[u8],
        input_name: impl Into<String>,
        output_name: impl Into<String>,
    ) -> ClassifyResult<Self> {
        if model_bytes.is_empty() {
            return Err(ClassifyError::load_failure("model byte buffer is empty"));
        }

        let session = Session::builder()
            .and_then(|b| Ok(b.with_log_level(LogLevel::Error)?))
            .and_then(|mut b| b.commit_from_memory(model_bytes))
            .map_err(|e| {
                ClassifyError::load_failure_with_source(
                    "failed to create ONNX session from model bytes",
                    e,
                )
            })?;

        Ok(Self {
            session: Mutex::new(session),
            input_name: input_name.into(),
            output_name: output_name.into(),
        })
    }

    /// Returns the configured input tensor name.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Returns the configured output tensor name.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl ScoreModel for OrtModel {
    /// Feeds the input tensor under the configured input name and returns
    /// the values of the configured output tensor.
    ///
    /// All per-run state lives in this call frame and is released on every
    /// exit path, success or failure.
    fn run(&self, input: &Tensor4D) -> ClassifyResult<Vec<f32>> {
        let input_tensor =
            TensorRef::from_array_view(input.view()).map_err(ClassifyError::Inference)?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            ClassifyError::Inference(ort::Error::new(
                "session lock poisoned by a previous inference failure",
            ))
        })?;

        let outputs = session.run(inputs).map_err(ClassifyError::Inference)?;

        let value = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            ClassifyError::shape_mismatch(format!(
                "model has no output tensor named '{}'",
                self.output_name
            ))
        })?;

        let (_, scores) = value
            .try_extract_tensor::<f32>()
            .map_err(ClassifyError::Inference)?;

        Ok(scores.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-assembled minimal ONNX model: a single Identity node mapping a
    /// float `[1, 3, 224, 224]` input to an equally shaped output. Encoded
    /// field by field so the tests need no model file on disk.
    mod fixture {
        fn varint(mut value: u64) -> Vec<u8> {
            let mut out = Vec::new();
            loop {
                let byte = (value & 0x7f) as u8;
                value >>= 7;
                if value == 0 {
                    out.push(byte);
                    break;
                }
                out.push(byte | 0x80);
            }
            out
        }

        fn bytes_field(field: u64, payload: &[u8]) -> Vec<u8> {
            let mut out = varint(field << 3 | 2);
            out.extend(varint(payload.len() as u64));
            out.extend_from_slice(payload);
            out
        }

        fn varint_field(field: u64, value: u64) -> Vec<u8> {
            let mut out = varint(field << 3);
            out.extend(varint(value));
            out
        }

        fn tensor_type(dims: &[u64]) -> Vec<u8> {
            let mut shape = Vec::new();
            for &dim in dims {
                shape.extend(bytes_field(1, &varint_field(1, dim)));
            }
            // elem_type 1 = float32
            let mut tensor = varint_field(1, 1);
            tensor.extend(bytes_field(2, &shape));
            bytes_field(1, &tensor)
        }

        fn value_info(name: &str, dims: &[u64]) -> Vec<u8> {
            let mut info = bytes_field(1, name.as_bytes());
            info.extend(bytes_field(2, &tensor_type(dims)));
            info
        }

        pub fn identity_model(input: &str, output: &str) -> Vec<u8> {
            let dims = [1, 3, 224, 224];
            let mut node = bytes_field(1, input.as_bytes());
            node.extend(bytes_field(2, output.as_bytes()));
            node.extend(bytes_field(4, b"Identity"));

            let mut graph = bytes_field(1, &node);
            graph.extend(bytes_field(2, b"identity"));
            graph.extend(bytes_field(11, &value_info(input, &dims)));
            graph.extend(bytes_field(12, &value_info(output, &dims)));

            // ir_version 8, graph, opset 13 in the default domain
            let mut model = varint_field(1, 8);
            model.extend(bytes_field(7, &graph));
            model.extend(bytes_field(8, &varint_field(2, 13)));
            model
        }
    }

    fn identity_model(output_name: &str) -> OrtModel {
        let bytes = fixture::identity_model("input.1", "scores");
        OrtModel::from_bytes(&bytes, "input.1", output_name).unwrap()
    }

    #[test]
    fn empty_model_bytes_fail_to_load() {
        let err = OrtModel::from_bytes(&[], "input.1", "650").unwrap_err();
        assert!(matches!(err, ClassifyError::LoadFailure { .. }));
    }

    #[test]
    fn garbage_model_bytes_fail_to_load() {
        let err = OrtModel::from_bytes(b"not an onnx model", "input.1", "650").unwrap_err();
        assert!(matches!(err, ClassifyError::LoadFailure { .. }));
    }

    #[test]
    fn run_returns_the_configured_output_values() {
        let model = identity_model("scores");
        let input = Tensor4D::from_elem((1, 3, 224, 224), 0.5);
        let scores = model.run(&input).unwrap();
        assert_eq!(scores.len(), 3 * 224 * 224);
        assert!(scores.iter().all(|&s| (s - 0.5).abs() < f32::EPSILON));
    }

    #[test]
    fn missing_configured_output_is_a_shape_mismatch() {
        let model = identity_model("no_such_output");
        let err = model.run(&Tensor4D::zeros((1, 3, 224, 224))).unwrap_err();
        assert!(matches!(err, ClassifyError::ShapeMismatch { .. }));
    }

    #[test]
    fn poisoned_session_lock_is_an_inference_error() {
        use std::sync::Arc;

        let model = Arc::new(identity_model("scores"));
        let poisoner = Arc::clone(&model);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.session.lock().unwrap();
            panic!("poison the session lock");
        })
        .join();

        let err = model.run(&Tensor4D::zeros((1, 3, 224, 224))).unwrap_err();
        assert!(matches!(err, ClassifyError::Inference(_)));
    }
}
