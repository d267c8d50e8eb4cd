use tokenizers::{PostProcessor, Tokenizer, TruncationDirection};
use ort::session::Session;
use ndarray::{Array1, Array2};
use ort::value::Tensor;
use std::collections::HashMap;

use super::error::ClassifierError;

/// Tokenizer-to-logits pipeline for ONNX sequence-classification exports.
///
/// The ONNX model is expected to:
/// - Accept `input_ids` and `attention_mask` (both i64, shape [batch_size, sequence_length])
/// - Output `logits` of shape [batch_size, num_labels]
///
/// DistilBERT exports have no `token_type_ids` input; this pipeline never sends one.
pub(crate) trait SequenceEncoding {
    fn tokenizer(&self) -> &Tokenizer;

    fn session(&self) -> &Session;

    fn max_sequence_length(&self) -> usize;

    /// Counts the tokens of `text` without special tokens or truncation.
    fn count_tokens(&self, text: &str) -> Result<usize, ClassifierError> {
        self.tokenizer()
            .encode(text, false)
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))
            .map(|encoding| encoding.len())
    }

    /// Encodes `text` for the model; see [`encode_for_model`].
    fn encode(&self, text: &str) -> Result<(Vec<i64>, Vec<i64>), ClassifierError> {
        encode_for_model(self.tokenizer(), text, self.max_sequence_length())
    }

    /// Runs the model on one encoded sequence and returns its logits row.
    fn forward(&self, input_ids: Vec<i64>, attention_mask: Vec<i64>) -> Result<Array1<f32>, ClassifierError> {
        let seq_len = input_ids.len();

        let ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create input array: {}", e)))?;
        let mask_array = Array2::from_shape_vec((1, seq_len), attention_mask)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create mask array: {}", e)))?;

        let mut input_tensors = HashMap::new();
        input_tensors.insert("input_ids", Tensor::from_array(ids_array)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create input tensor: {}", e)))?);
        input_tensors.insert("attention_mask", Tensor::from_array(mask_array)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to create mask tensor: {}", e)))?);

        let outputs = self.session().run(input_tensors)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to run model: {}", e)))?;
        let logits = outputs[0].try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::ModelError(format!("Failed to extract logits: {}", e)))?;

        let shape = logits.shape();
        if shape.len() != 2 || shape[0] != 1 {
            return Err(ClassifierError::PredictionError(
                format!("Expected logits of shape [1, num_labels], got {:?}", shape)
            ));
        }

        Ok(logits.iter().copied().collect())
    }

    /// Encodes and scores `text` in one go.
    fn score_text(&self, text: &str) -> Result<Array1<f32>, ClassifierError> {
        let (ids, mask) = self.encode(text)?;
        self.forward(ids, mask)
    }
}

/// Encodes `text` with special tokens, cut so the whole sequence fits
/// `max_sequence_length`.
///
/// Returns `(input_ids, attention_mask)`. The tokenizer's own truncation
/// is disabled at load time; the content is cut here before the special
/// tokens are added so `[CLS]`/`[SEP]` always survive.
pub(crate) fn encode_for_model(
    tokenizer: &Tokenizer,
    text: &str,
    max_sequence_length: usize,
) -> Result<(Vec<i64>, Vec<i64>), ClassifierError> {
    let mut encoding = tokenizer
        .encode(text, false)
        .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;

    let special_tokens = tokenizer
        .get_post_processor()
        .map_or(0, |processor| processor.added_tokens(false));
    let budget = max_sequence_length.saturating_sub(special_tokens);
    if encoding.len() > budget {
        log::debug!("Truncating input from {} to {} tokens", encoding.len(), budget);
        encoding.truncate(budget, 0, TruncationDirection::Right);
    }

    let encoding = tokenizer
        .post_process(encoding, None, true)
        .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;
    if encoding.is_empty() {
        return Err(ClassifierError::TokenizerError("Tokenizer produced no tokens".into()));
    }

    let ids = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
    let mask = encoding.get_attention_mask().iter().map(|&m| i64::from(m)).collect();
    Ok((ids, mask))
}
