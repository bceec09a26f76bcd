use crate::traits::BackendError;
use std::path::PathBuf;

pub const INVALID_LINK_MESSAGE: &str = "the provided URL is invalid or the platform is not supported";
pub const EMPTY_QUERY_MESSAGE: &str = "the query is empty";
pub const NO_RESULTS_MESSAGE: &str = "no video results were found";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("Backend error: {0}")]
    BackendError(String),
    #[error("Timed out: {0}")]
    Timeout(String),
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("The file was not found at the reported path: {}", .0.display())]
    IntegrityFailed(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid_link() -> Self {
        EngineError::InvalidInput(INVALID_LINK_MESSAGE.into())
    }

    pub(crate) fn empty_query() -> Self {
        EngineError::InvalidInput(EMPTY_QUERY_MESSAGE.into())
    }

    pub(crate) fn no_results() -> Self {
        EngineError::NotFound(NO_RESULTS_MESSAGE.into())
    }
}

impl From<BackendError> for EngineError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NotConfigured => {
                EngineError::BackendUnavailable("backend is not configured".into())
            }
            BackendError::Unavailable(source) => EngineError::BackendUnavailable(source.to_string()),
            BackendError::Rejected(message) => EngineError::BackendError(message),
            BackendError::Timeout(message) => EngineError::Timeout(message),
            BackendError::Cancelled => EngineError::Cancelled,
            BackendError::ExtractionFailed(message) => EngineError::ExtractionFailed(message),
            BackendError::Io(error) => EngineError::Io(error),
        }
    }
}
