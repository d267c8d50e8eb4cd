use std::path::PathBuf;
use clap::Parser;

use crate::models::DEFAULT_REGISTRY_URL;
use crate::runtime::RuntimeConfig;

/// Serve the disaster tweet classifier and its front-end over HTTP
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "DISASTER_API_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "DISASTER_API_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory holding the built front-end (must contain index.html)
    #[arg(long, env = "DISASTER_API_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Number of HTTP worker threads (defaults to the number of CPUs)
    #[arg(long, env = "DISASTER_API_WORKERS")]
    pub workers: Option<usize>,

    /// Load this ONNX export instead of the built-in model
    #[arg(long, requires = "tokenizer_path")]
    pub model_path: Option<PathBuf>,

    /// Tokenizer matching --model-path
    #[arg(long, requires = "model_path")]
    pub tokenizer_path: Option<PathBuf>,

    /// Registry the built-in model is downloaded from
    #[arg(long, env = "DISASTER_API_REGISTRY", default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: String,

    /// Maximum number of tokens fed to the model; longer inputs are truncated
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(3..))]
    pub max_sequence_length: u32,

    /// Intra-op threads for ONNX Runtime (0 lets the runtime decide)
    #[arg(long, default_value_t = 0)]
    pub intra_threads: usize,

    /// Force a fresh download of the model files
    #[arg(short, long)]
    pub fresh: bool,
}

impl Config {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig::default().with_intra_threads(self.intra_threads)
    }

    /// Custom model and tokenizer paths, when both were given.
    pub fn custom_model(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.model_path.as_ref().zip(self.tokenizer_path.as_ref())
    }
}
