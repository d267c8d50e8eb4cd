//! Registry descriptions of the models this service knows how to load.

/// Default model registry. Artifact URLs are `<base>/<registry id>/resolve/main/<file>`.
pub const DEFAULT_REGISTRY_URL: &str = "https://huggingface.co";

/// Models with a known registry location and characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    /// DistilBERT fine-tuned on the Kaggle "Real or Not? NLP with Disaster Tweets" data.
    DistilBertDisasterTweets,
}

/// Static properties of a model that the classifier relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCharacteristics {
    /// Width of the logits row produced per input
    pub num_labels: usize,
    /// Maximum number of tokens the model accepts; longer inputs are truncated
    pub max_sequence_length: usize,
    /// Approximate size of the ONNX export on disk
    pub model_size_mb: usize,
}

/// Where a model's artifacts live and how to check them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Directory name inside the local model cache
    pub name: String,
    /// Identifier of the model in the registry (`owner/name`)
    pub registry_id: String,
    pub model_url: String,
    pub tokenizer_url: String,
    /// Pinned SHA-256 of `model.onnx`; `None` means presence is the only check
    pub model_hash: Option<String>,
    /// Pinned SHA-256 of `tokenizer.json`; `None` means presence is the only check
    pub tokenizer_hash: Option<String>,
}

impl BuiltinModel {
    /// Local cache directory name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DistilBertDisasterTweets => "distilbert-disaster-tweets",
        }
    }

    /// Registry identifier the artifacts are published under.
    pub fn registry_id(&self) -> &'static str {
        match self {
            Self::DistilBertDisasterTweets => "BilallaliB/distilbert-disaster-tweet-classification",
        }
    }

    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            Self::DistilBertDisasterTweets => ModelCharacteristics {
                num_labels: 2,
                max_sequence_length: 512,
                model_size_mb: 256,
            },
        }
    }

    /// Model info resolved against the default registry.
    pub fn get_model_info(&self) -> ModelInfo {
        self.get_model_info_from(DEFAULT_REGISTRY_URL)
    }

    /// Model info resolved against a specific registry base URL.
    ///
    /// The upstream repository publishes PyTorch weights; the ONNX export is
    /// expected under `onnx/model.onnx` (the layout `optimum-cli export onnx`
    /// produces when pushed back to the hub).
    pub fn get_model_info_from(&self, registry_url: &str) -> ModelInfo {
        let base = format!(
            "{}/{}/resolve/main",
            registry_url.trim_end_matches('/'),
            self.registry_id()
        );
        match self {
            Self::DistilBertDisasterTweets => ModelInfo {
                name: self.name().to_string(),
                registry_id: self.registry_id().to_string(),
                model_url: format!("{}/onnx/model.onnx", base),
                tokenizer_url: format!("{}/tokenizer.json", base),
                model_hash: None,
                tokenizer_hash: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_info_urls() {
        let info = BuiltinModel::DistilBertDisasterTweets.get_model_info();
        assert_eq!(info.name, "distilbert-disaster-tweets");
        assert_eq!(
            info.tokenizer_url,
            "https://huggingface.co/BilallaliB/distilbert-disaster-tweet-classification/resolve/main/tokenizer.json"
        );
        assert!(info.model_url.ends_with("/resolve/main/onnx/model.onnx"));
    }

    #[test]
    fn test_custom_registry_trailing_slash() {
        let info = BuiltinModel::DistilBertDisasterTweets.get_model_info_from("http://mirror.local/");
        assert!(info.model_url.starts_with("http://mirror.local/BilallaliB/"));
        assert!(!info.model_url.contains("local//"));
    }

    #[test]
    fn test_characteristics() {
        let characteristics = BuiltinModel::DistilBertDisasterTweets.characteristics();
        assert_eq!(characteristics.num_labels, 2);
        assert_eq!(characteristics.max_sequence_length, 512);
    }
}
