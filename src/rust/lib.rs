//! Disaster tweet classification served over HTTP.
//!
//! A DistilBERT sequence classifier, exported to ONNX, is loaded once at
//! startup and shared read-only by every request. `POST /api/predict` returns
//! the top class and its probability; every other `GET` path serves the
//! front-end with a single-page-application fallback.
//!
//! # Basic Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use disaster_api::{BuiltinModel, Classifier, DisasterLabel, ModelManager};
//!
//! let model = BuiltinModel::DistilBertDisasterTweets;
//! let manager = ModelManager::new_default()?;
//! manager.ensure_model_downloaded(&model.get_model_info()).await?;
//!
//! let classifier = Classifier::builder()
//!     .with_model_manager(&manager, model)?
//!     .build()?;
//!
//! let prediction = classifier.classify("Forest fire spreading rapidly near town")?;
//! assert_eq!(prediction.label, DisasterLabel::Disaster);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
mod runtime;
pub mod model_manager;
pub mod models;
pub mod server;

pub use classifier::{
    Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, DisasterLabel, OnnxScorer, Prediction, Scorer,
};
pub use config::Config;
pub use runtime::{RuntimeConfig, create_session_builder};
pub use model_manager::{ModelManager, ModelError};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo};

/// Initializes `env_logger` at `info` unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
