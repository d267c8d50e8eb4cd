use ort::Error as OrtError;

/// Represents the different types of errors that can occur in the disaster classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Error occurred while loading or using the tokenizer
    #[error("Tokenizer error: {0}")]
    TokenizerError(String),
    /// Error occurred while loading or running the ONNX model
    #[error("Model error: {0}")]
    ModelError(String),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// The model produced output that cannot be turned into a prediction
    #[error("Prediction error: {0}")]
    PredictionError(String),
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ClassifierError {
    /// Whether the caller, rather than the model, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::BuildError(err.to_string())
    }
}
