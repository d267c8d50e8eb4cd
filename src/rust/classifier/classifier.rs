use std::sync::Arc;
use ndarray::ArrayView1;
use serde::Serialize;

use super::error::ClassifierError;
use super::labels::{DisasterLabel, LABEL_BY_INDEX};
use super::scorer::Scorer;
use super::utils::{argmax, softmax};
use super::ClassifierInfo;

/// Outcome of classifying one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: DisasterLabel,
    /// Probability of `label`, always the larger of the two
    pub confidence: f32,
    /// Full distribution in class index order
    pub probabilities: [f32; 2],
}

impl Prediction {
    /// Builds a prediction from a raw logits row.
    ///
    /// # Errors
    /// - `PredictionError` if the row does not hold exactly one score per label
    pub fn from_logits(logits: &[f32]) -> Result<Self, ClassifierError> {
        if logits.len() != LABEL_BY_INDEX.len() {
            return Err(ClassifierError::PredictionError(format!(
                "Model produced {} scores, expected {}",
                logits.len(),
                LABEL_BY_INDEX.len()
            )));
        }
        if logits.iter().any(|x| !x.is_finite()) {
            return Err(ClassifierError::PredictionError(format!("Non-finite logits: {:?}", logits)));
        }

        let probabilities = softmax(ArrayView1::from(logits));
        let index = argmax(probabilities.view())
            .ok_or_else(|| ClassifierError::PredictionError("Empty probability distribution".into()))?;
        let label = DisasterLabel::from_index(index)
            .ok_or_else(|| ClassifierError::PredictionError(format!("No label for class index {}", index)))?;

        Ok(Self {
            label,
            confidence: probabilities[index],
            probabilities: [probabilities[0], probabilities[1]],
        })
    }
}

/// Disaster / not-disaster classifier.
///
/// Holds the scorer behind an `Arc`; clones share the same loaded model, and
/// `classify` only needs `&self`, so one instance serves every request.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use disaster_api::{Classifier, BuiltinModel};
///
/// let classifier = Classifier::builder()
///     .with_model(BuiltinModel::DistilBertDisasterTweets)?
///     .build()?;
///
/// let prediction = classifier.classify("Forest fire spreading rapidly near town")?;
/// println!("{} ({:.1}%)", prediction.label, prediction.confidence * 100.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    pub(crate) scorer: Arc<dyn Scorer>,
    pub(crate) info: ClassifierInfo,
}

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the loaded model
    pub fn info(&self) -> &ClassifierInfo {
        &self.info
    }

    /// Classifies `text` as disaster or not.
    ///
    /// Empty text is scored like any other input; the model then only sees
    /// its special tokens.
    ///
    /// # Errors
    /// - `TokenizerError` / `ModelError` if scoring fails
    /// - `PredictionError` if the model output is malformed
    pub fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let logits = self.scorer.logits(text)?;
        Prediction::from_logits(&logits)
    }
}
