mod error;
mod encoding;
mod scorer;
mod labels;
#[allow(clippy::module_inception)]
mod classifier;
pub mod builder;
mod utils;

pub use error::ClassifierError;
pub use scorer::{OnnxScorer, Scorer};
pub use labels::{DisasterLabel, LABEL_BY_INDEX};
pub use classifier::{Classifier, Prediction};
pub use builder::ClassifierBuilder;

/// Information about the model behind a classifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file, if loaded from disk
    pub model_path: Option<String>,
    /// Path to the tokenizer file, if loaded from disk
    pub tokenizer_path: Option<String>,
    /// Maximum number of tokens fed to the model
    pub max_sequence_length: usize,
    /// Labels in class index order
    pub labels: Vec<DisasterLabel>,
}
