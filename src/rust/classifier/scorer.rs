use std::fmt;
use std::path::Path;
use ort::session::Session;
use tokenizers::Tokenizer;
use log::{info, error};

use super::encoding::SequenceEncoding;
use super::error::ClassifierError;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Turns text into the raw per-class scores of a sequence-classification model.
///
/// The classifier only depends on this trait, so the HTTP layer and tests can
/// run against a deterministic stand-in instead of a real ONNX model.
pub trait Scorer: Send + Sync + fmt::Debug {
    /// Logits for `text`, one entry per class in model index order.
    fn logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError>;
}

/// ONNX Runtime backed scorer: a tokenizer and a session loaded once and
/// shared read-only afterwards.
#[derive(Debug)]
pub struct OnnxScorer {
    tokenizer: Tokenizer,
    session: Session,
    max_sequence_length: usize,
}

// Compile-time verification of thread-safety
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OnnxScorer>();
};

impl SequenceEncoding for OnnxScorer {
    fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn max_sequence_length(&self) -> usize {
        self.max_sequence_length
    }
}

impl Scorer for OnnxScorer {
    fn logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError> {
        self.score_text(text).map(|logits| logits.to_vec())
    }
}

impl OnnxScorer {
    /// Loads the tokenizer and ONNX model from disk.
    ///
    /// # Errors
    /// - `BuildError` if either file is missing or cannot be loaded
    /// - `ModelError` if the graph lacks `input_ids`/`attention_mask` inputs or has no output
    pub fn load(
        model_path: &Path,
        tokenizer_path: &Path,
        max_sequence_length: usize,
        runtime_config: &RuntimeConfig,
    ) -> Result<Self, ClassifierError> {
        if max_sequence_length == 0 {
            return Err(ClassifierError::BuildError("Max sequence length must be positive".into()));
        }
        if !model_path.is_file() {
            return Err(ClassifierError::BuildError(format!("Model file not found: {}", model_path.display())));
        }
        if !tokenizer_path.is_file() {
            return Err(ClassifierError::BuildError(format!("Tokenizer file not found: {}", tokenizer_path.display())));
        }

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| {
                error!("Failed to load tokenizer: {}", e);
                ClassifierError::BuildError(format!("Failed to load tokenizer: {}", e))
            })?;
        tokenizer
            .with_truncation(None)
            .map_err(|e| ClassifierError::BuildError(format!("Failed to configure tokenizer: {}", e)))?;
        info!("Tokenizer loaded from {}", tokenizer_path.display());

        let session = create_session_builder(runtime_config)?
            .commit_from_file(model_path)?;
        Self::validate_model(&session)?;
        info!("Model loaded and validated from {}", model_path.display());

        Ok(Self { tokenizer, session, max_sequence_length })
    }

    /// Token count of `text` before special tokens and truncation.
    pub fn count_tokens(&self, text: &str) -> Result<usize, ClassifierError> {
        SequenceEncoding::count_tokens(self, text)
    }

    pub fn max_sequence_length(&self) -> usize {
        self.max_sequence_length
    }

    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        for required in ["input_ids", "attention_mask"] {
            if !session.inputs.iter().any(|input| input.name == required) {
                return Err(ClassifierError::ModelError(format!(
                    "Model is missing the '{}' input (found: {:?})",
                    required,
                    session.inputs.iter().map(|input| input.name.as_str()).collect::<Vec<_>>()
                )));
            }
        }

        if session.outputs.is_empty() {
            return Err(ClassifierError::ModelError(
                "Model must have at least 1 output for logits".to_string()
            ));
        }

        Ok(())
    }
}
