use hangman_core::GameError;
use hangman_persistence::PersistenceError;
use hangman_types::{ApiError, ErrorKind};
use thiserror::Error;
use warp::http::StatusCode;

/// Failure of one `GameManager` operation. Every variant except `Storage`
/// is caused by the request and can be corrected by the caller.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Storage failure: {0}")]
    Storage(PersistenceError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::InvalidInput(_) => ErrorKind::InvalidInput,
            ServiceError::Storage(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to clients; storage details stay in the server log
    pub fn to_api_error(&self) -> ApiError {
        match self {
            ServiceError::Storage(_) => ApiError::new(self.kind(), "Internal server error"),
            other => ApiError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<PersistenceError> for ServiceError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DuplicateUser { .. } => {
                ServiceError::Conflict("A User with that name already exists!".to_string())
            }
            PersistenceError::StaleGame { .. } => ServiceError::Conflict(
                "The game was changed by another move, fetch it and try again".to_string(),
            ),
            other => ServiceError::Storage(other),
        }
    }
}

impl From<GameError> for ServiceError {
    fn from(err: GameError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}
