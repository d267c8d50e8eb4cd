use anyhow::Context;
use clap::Parser;
use disaster_api::{server, BuiltinModel, Classifier, Config, ModelManager};
use log::info;
use std::time::Instant;

async fn ensure_model_downloaded(manager: &ModelManager, config: &Config) -> anyhow::Result<()> {
    let model = BuiltinModel::DistilBertDisasterTweets;
    let info = model.get_model_info_from(&config.registry_url);

    if config.fresh {
        info!("Fresh download requested - removing any existing model files...");
        manager.remove_download(&info.name)?;
    }

    manager
        .ensure_model_downloaded(&info)
        .await
        .with_context(|| format!("Failed to fetch {} from {}", info.registry_id, config.registry_url))
}

async fn load_classifier(config: &Config) -> anyhow::Result<Classifier> {
    let builder = Classifier::builder()
        .with_runtime_config(config.runtime_config())
        .with_max_sequence_length(config.max_sequence_length as usize);

    let builder = match config.custom_model() {
        Some((model_path, tokenizer_path)) => {
            info!("Loading custom model from {}", model_path.display());
            builder.with_custom_model(&model_path.to_string_lossy(), &tokenizer_path.to_string_lossy())?
        }
        None => {
            let manager = ModelManager::new_default().context("Failed to create model cache")?;
            ensure_model_downloaded(&manager, config).await?;
            builder.with_model_manager(&manager, BuiltinModel::DistilBertDisasterTweets)?
        }
    };

    Ok(builder.build()?)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    disaster_api::init_logger();
    let config = Config::parse();

    info!("=== Starting disaster tweet classifier ===");
    let start_time = Instant::now();
    let classifier = load_classifier(&config).await?;
    info!("Model ready (took {:.2?})", start_time.elapsed());

    server::run(&config, classifier).await?;
    Ok(())
}
