use std::path::Path;
use std::sync::Arc;
use log::info;

use super::error::ClassifierError;
use super::classifier::Classifier;
use super::labels::LABEL_BY_INDEX;
use super::scorer::{OnnxScorer, Scorer};
use super::ClassifierInfo;
use crate::{BuiltinModel, ModelManager, runtime::RuntimeConfig};

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Debug, Default)]
pub struct ClassifierBuilder {
    scorer: Option<Arc<dyn Scorer>>,
    model_path: Option<String>,
    tokenizer_path: Option<String>,
    max_sequence_length: Option<usize>,
    runtime_config: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration for ONNX model execution.
    ///
    /// Must be called before the model is loaded to take effect.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Overrides the maximum number of tokens fed to the model.
    ///
    /// Must be called before the model is loaded to take effect; defaults to
    /// the model's own limit (512 for DistilBERT).
    pub fn with_max_sequence_length(mut self, max_sequence_length: usize) -> Self {
        self.max_sequence_length = Some(max_sequence_length);
        self
    }

    /// Loads a built-in model from the default model cache.
    ///
    /// # Errors
    /// - `BuildError` if a model is already set
    /// - `BuildError` if the model is not downloaded; use
    ///   `ModelManager::ensure_model_downloaded` first
    /// - `BuildError` / `ModelError` if the model or tokenizer fails to load
    pub fn with_model(self, model: BuiltinModel) -> Result<Self, ClassifierError> {
        let manager = ModelManager::new_default()
            .map_err(|e| ClassifierError::BuildError(format!("Failed to create model manager: {}", e)))?;
        self.with_model_manager(&manager, model)
    }

    /// Loads a built-in model from the cache owned by `manager`.
    pub fn with_model_manager(self, manager: &ModelManager, model: BuiltinModel) -> Result<Self, ClassifierError> {
        self.ensure_unset()?;

        let name = model.name();
        if !manager.is_model_downloaded(name) {
            return Err(ClassifierError::BuildError(format!(
                "Model '{:?}' is not downloaded to {}. Download it first with ModelManager::download_model()",
                model,
                manager.models_dir().display()
            )));
        }

        let max_sequence_length = self
            .max_sequence_length
            .unwrap_or(model.characteristics().max_sequence_length);
        self.load(
            &manager.get_model_path(name),
            &manager.get_tokenizer_path(name),
            max_sequence_length,
        )
    }

    /// Loads a model export and tokenizer from explicit paths.
    ///
    /// The sequence length defaults to 512 unless set with
    /// `with_max_sequence_length`.
    pub fn with_custom_model(self, model_path: &str, tokenizer_path: &str) -> Result<Self, ClassifierError> {
        if model_path.is_empty() || tokenizer_path.is_empty() {
            return Err(ClassifierError::BuildError("Model and tokenizer paths cannot be empty".to_string()));
        }
        self.ensure_unset()?;

        let max_sequence_length = self
            .max_sequence_length
            .unwrap_or(BuiltinModel::DistilBertDisasterTweets.characteristics().max_sequence_length);
        self.load(Path::new(model_path), Path::new(tokenizer_path), max_sequence_length)
    }

    /// Uses an already constructed scorer instead of loading a model.
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    fn ensure_unset(&self) -> Result<(), ClassifierError> {
        if self.scorer.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }
        Ok(())
    }

    fn load(
        mut self,
        model_path: &Path,
        tokenizer_path: &Path,
        max_sequence_length: usize,
    ) -> Result<Self, ClassifierError> {
        let scorer = OnnxScorer::load(model_path, tokenizer_path, max_sequence_length, &self.runtime_config)?;
        self.scorer = Some(Arc::new(scorer));
        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.tokenizer_path = Some(tokenizer_path.to_string_lossy().to_string());
        self.max_sequence_length = Some(max_sequence_length);
        Ok(self)
    }

    /// Builds and returns the final Classifier instance
    ///
    /// # Errors
    /// - `BuildError` if no model or scorer has been set
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let scorer = self.scorer
            .ok_or_else(|| ClassifierError::BuildError("A model or scorer must be set".to_string()))?;

        let info = ClassifierInfo {
            model_path: self.model_path,
            tokenizer_path: self.tokenizer_path,
            max_sequence_length: self.max_sequence_length
                .unwrap_or(BuiltinModel::DistilBertDisasterTweets.characteristics().max_sequence_length),
            labels: LABEL_BY_INDEX.to_vec(),
        };
        info!("Classifier ready: {:?}", info);

        Ok(Classifier { scorer, info })
    }
}
