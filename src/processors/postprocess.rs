//! Score-vector reduction: arg-max plus label text cleanup.

use crate::core::{ClassifyError, ClassifyResult};

/// Maps a model's score vector onto a human-readable category label.
///
/// Holds the ordered label set; index `i` of the score vector corresponds to
/// line `i` of the label text the decoder was built from.
#[derive(Debug, Clone)]
pub struct LabelDecoder {
    labels: Vec<String>,
}

/// Returns the index of the largest value, taking the lowest index among
/// ties.
pub(crate) fn arg_max(scores: &[f32]) -> Option<usize> {
    let mut best_index = None;
    let mut best_score = f32::NEG_INFINITY;
    for (index, &score) in scores.iter().enumerate() {
        if best_index.is_none() || score > best_score {
            best_index = Some(index);
            best_score = score;
        }
    }
    best_index
}

impl LabelDecoder {
    /// Builds a decoder from newline-separated label text.
    ///
    /// Empty lines are skipped; the remaining line order defines the
    /// index-to-label mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::LoadFailure`] if no non-empty lines remain.
    pub fn from_text(text: &str) -> ClassifyResult<Self> {
        let labels: Vec<String> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if labels.is_empty() {
            return Err(ClassifyError::load_failure(
                "label text contains no usable lines",
            ));
        }
        Ok(Self { labels })
    }

    /// Returns the number of labels.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Reduces a score vector to its winning label.
    ///
    /// The winning index is the arg-max of the scores (lowest index among
    /// ties). The label text is cleaned up on the way out: carriage returns
    /// stripped, underscores replaced with spaces, surrounding whitespace
    /// trimmed.
    ///
    /// # Errors
    ///
    /// * [`ClassifyError::ShapeMismatch`] if the scores are empty or the
    ///   winning index exceeds the label set — a label-count/model-output
    ///   mismatch.
    /// * [`ClassifyError::InvalidInput`] if the cleaned label is empty.
    pub fn decode(&self, scores: &[f32]) -> ClassifyResult<String> {
        let index = arg_max(scores).ok_or_else(|| {
            ClassifyError::shape_mismatch("model produced an empty score vector")
        })?;

        let label = self.labels.get(index).ok_or_else(|| {
            ClassifyError::shape_mismatch(format!(
                "arg-max index {index} exceeds label count {}",
                self.labels.len()
            ))
        })?;

        let cleaned = label.replace('\r', "").replace('_', " ").trim().to_string();
        if cleaned.is_empty() {
            return Err(ClassifyError::invalid_input(format!(
                "label at index {index} is empty after cleanup"
            )));
        }
        Ok(cleaned)
    }
}
