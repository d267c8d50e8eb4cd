use actix_web::web;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::{Classifier, DisasterLabel, Prediction};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionResponse {
    pub prediction: DisasterLabel,
    pub confidence: f32,
}

impl From<Prediction> for PredictionResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            prediction: prediction.label,
            confidence: prediction.confidence,
        }
    }
}

/// `POST /api/predict`
///
/// A body that is not JSON or lacks a string `text` field is rejected by the
/// `Json` extractor with 400 before this handler runs.
pub async fn predict(
    classifier: web::Data<Classifier>,
    request: web::Json<PredictionRequest>,
) -> Result<web::Json<PredictionResponse>, ApiError> {
    let PredictionRequest { text } = request.into_inner();
    let classifier = classifier.into_inner();

    // Inference is CPU bound; keep it off the async workers
    let result = web::block(move || classifier.classify(&text)).await;

    let prediction = match result {
        Ok(Ok(prediction)) => prediction,
        Ok(Err(e)) => {
            if e.is_client_error() {
                debug!("Rejected prediction request: {}", e);
            } else {
                error!("Prediction failed: {}", e);
            }
            return Err(e.into());
        }
        Err(e) => {
            error!("Prediction task did not complete: {}", e);
            return Err(e.into());
        }
    };

    debug!("Predicted {} ({:.3})", prediction.label, prediction.confidence);
    Ok(web::Json(prediction.into()))
}
