use std::path::{Path, PathBuf};
use std::fs;
use std::io;
use std::sync::Arc;
use std::env;
use tokio::sync::Mutex;
use sha2::{Sha256, Digest};

use crate::models::ModelInfo;

/// Environment variable overriding the cache root; models go to `<root>/models`.
pub const CACHE_ENV_VAR: &str = "DISASTER_API_CACHE";

const MODEL_FILE: &str = "model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("Registry returned {status} for {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Model verification failed")]
    VerificationFailed,
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

/// Keeps model artifacts in a local cache directory, fetching them from the
/// registry on demand.
#[derive(Clone, Debug)]
pub struct ModelManager {
    models_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

impl ModelManager {
    /// Creates a new ModelManager with the default models directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        if let Ok(path) = env::var(CACHE_ENV_VAR) {
            return PathBuf::from(path).join("models");
        }

        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("disaster-api").join("models");
        }

        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("disaster-api").join("models");
        }

        env::temp_dir().join("disaster-api").join("models")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> io::Result<Self> {
        let models_dir = models_dir.as_ref().to_path_buf();
        fs::create_dir_all(&models_dir)?;
        Ok(Self {
            models_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn get_model_path(&self, name: &str) -> PathBuf {
        self.models_dir.join(name).join(MODEL_FILE)
    }

    pub fn get_tokenizer_path(&self, name: &str) -> PathBuf {
        self.models_dir.join(name).join(TOKENIZER_FILE)
    }

    pub fn is_model_downloaded(&self, name: &str) -> bool {
        let model_path = self.get_model_path(name);
        let tokenizer_path = self.get_tokenizer_path(name);
        log::debug!("Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::debug!("Tokenizer path: {:?} (exists: {})", tokenizer_path, tokenizer_path.exists());
        model_path.is_file() && tokenizer_path.is_file()
    }

    /// Fetches any missing or corrupt artifact of `info`. On failure both
    /// files are removed so a half-written cache is never loaded.
    pub async fn download_model(&self, info: &ModelInfo) -> Result<(), ModelError> {
        let _lock = self.download_lock.lock().await;

        let model_dir = self.models_dir.join(&info.name);
        log::info!("Preparing model directory at {:?}", model_dir);
        fs::create_dir_all(&model_dir)?;

        let model_path = self.get_model_path(&info.name);
        let model_result = self
            .fetch_if_needed(&info.model_url, &model_path, info.model_hash.as_deref(), "model")
            .await;

        let tokenizer_path = self.get_tokenizer_path(&info.name);
        let tokenizer_result = match model_result {
            Ok(()) => self
                .fetch_if_needed(&info.tokenizer_url, &tokenizer_path, info.tokenizer_hash.as_deref(), "tokenizer")
                .await,
            Err(e) => Err(e),
        };

        match tokenizer_result {
            Ok(()) => {
                log::info!("Model and tokenizer for '{}' ready to use", info.name);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to set up '{}': {}", info.name, e);
                if let Err(cleanup) = self.remove_download(&info.name) {
                    log::warn!("Failed to clean up '{}' after error: {}", info.name, cleanup);
                }
                Err(e)
            }
        }
    }

    async fn fetch_if_needed(
        &self,
        url: &str,
        path: &Path,
        expected_hash: Option<&str>,
        file_type: &str,
    ) -> Result<(), ModelError> {
        if path.exists() {
            if self.verify_file(path, expected_hash)? {
                log::info!("Existing {} file verified at {:?}", file_type, path);
                return Ok(());
            }
            log::warn!("{} file at {:?} failed verification, redownloading", file_type, path);
        }
        self.download_and_verify_file(url, path, expected_hash, file_type).await
    }

    fn verify_file(&self, path: &Path, expected_hash: Option<&str>) -> Result<bool, ModelError> {
        let Some(expected) = expected_hash else {
            log::warn!("No pinned hash for {:?}, checking presence only", path);
            return Ok(path.is_file());
        };
        let bytes = fs::read(path)?;
        let hash = sha256_hex(&bytes);
        log::debug!("Calculated hash {} for {:?} (expected {})", hash, path, expected);
        Ok(hash == expected)
    }

    pub fn verify_model(&self, info: &ModelInfo) -> Result<bool, ModelError> {
        let model_path = self.get_model_path(&info.name);
        let tokenizer_path = self.get_tokenizer_path(&info.name);

        if !model_path.exists() || !tokenizer_path.exists() {
            log::info!("Model '{}' is incomplete in {:?}", info.name, self.models_dir);
            return Ok(false);
        }

        let model_ok = self.verify_file(&model_path, info.model_hash.as_deref())?;
        let tokenizer_ok = self.verify_file(&tokenizer_path, info.tokenizer_hash.as_deref())?;
        log::info!(
            "Verification of '{}': model={}, tokenizer={}",
            info.name, model_ok, tokenizer_ok
        );

        Ok(model_ok && tokenizer_ok)
    }

    async fn download_and_verify_file(
        &self,
        url: &str,
        path: &Path,
        expected_hash: Option<&str>,
        file_type: &str,
    ) -> Result<(), ModelError> {
        log::info!("Downloading {} file from {} to {:?}", file_type, url, path);
        let response = reqwest::get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        if let Some(expected) = expected_hash {
            let hash = sha256_hex(&bytes);
            if hash != expected {
                log::error!("{} hash mismatch: expected {}, got {}", file_type, expected, hash);
                return Err(ModelError::HashMismatch {
                    file_type: file_type.to_string(),
                    expected: expected.to_string(),
                    actual: hash,
                });
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &bytes)?;

        if !self.verify_file(path, expected_hash)? {
            return Err(ModelError::VerificationFailed);
        }

        log::info!("{} file downloaded and verified", file_type);
        Ok(())
    }

    pub fn remove_download(&self, name: &str) -> Result<(), ModelError> {
        let model_path = self.get_model_path(name);
        let tokenizer_path = self.get_tokenizer_path(name);

        if model_path.exists() {
            fs::remove_file(&model_path)?;
        }
        if tokenizer_path.exists() {
            fs::remove_file(&tokenizer_path)?;
        }
        Ok(())
    }

    /// Ensures that a model is downloaded and verified.
    /// If the model doesn't exist, it will be downloaded.
    /// If verification fails, it will be re-downloaded.
    pub async fn ensure_model_downloaded(&self, info: &ModelInfo) -> Result<(), ModelError> {
        if !self.is_model_downloaded(&info.name) {
            log::info!("Model '{}' not found in cache, downloading...", info.name);
            return self.download_model(info).await;
        }
        if !self.verify_model(info)? {
            log::info!("Model '{}' failed verification, re-downloading...", info.name);
            self.remove_download(&info.name)?;
            self.download_model(info).await?;
        }
        Ok(())
    }
}
