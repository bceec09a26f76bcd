use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use media_processors::EngineError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub(crate) struct HttpError(#[from] pub(crate) EngineError);

impl ResponseError for HttpError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            EngineError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            EngineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EngineError::BackendUnavailable(_)
            | EngineError::BackendError(_)
            | EngineError::ExtractionFailed(_)
            | EngineError::IntegrityFailed(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
