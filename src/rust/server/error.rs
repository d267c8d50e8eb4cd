use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::ResponseError;

use crate::ClassifierError;

/// Failure of a prediction request. Rendered with actix's default
/// plain-text body; only the status code is chosen here.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("Inference task was canceled: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Classifier(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
