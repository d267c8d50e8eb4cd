//! HTTP surface: the prediction endpoint and the static front-end.

mod error;
mod predict;
mod static_files;

pub use error::ApiError;
pub use predict::{predict, PredictionRequest, PredictionResponse};
pub use static_files::{serve, StaticRoot, ENTRY_DOCUMENT};

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::{Classifier, Config};

pub const PREDICT_PATH: &str = "/api/predict";

/// Registers all routes. Expects `web::Data<Classifier>` and
/// `web::Data<StaticRoot>` to be provided as app data.
///
/// The prediction resource is registered first so the catch-all static
/// route never shadows it. A `GET` on the prediction path is a front-end
/// route like any other and gets the entry document.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(PREDICT_PATH)
            .route(web::post().to(predict))
            .route(web::get().to(serve)),
    )
    .route("/{path:.*}", web::get().to(serve));
}

/// Binds and runs the HTTP server until shutdown.
pub async fn run(config: &Config, classifier: Classifier) -> std::io::Result<()> {
    let classifier = web::Data::new(classifier);
    let static_root = web::Data::new(StaticRoot::new(&config.static_dir));

    if !static_root.entry_document().is_file() {
        log::warn!(
            "Entry document {:?} not found; front-end routes will return 404",
            static_root.entry_document()
        );
    }

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(classifier.clone())
            .app_data(static_root.clone())
            .configure(routes)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let bind_address = (config.host.as_str(), config.port);
    let server = server.bind(bind_address)?;
    info!("Serving on http://{}:{}", config.host, config.port);
    info!("  POST {}  - classify a tweet", PREDICT_PATH);
    info!("  GET  /*           - front-end from {}", config.static_dir.display());

    server.run().await
}
