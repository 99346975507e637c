use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// HTTP status behind this error, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::BadRequest(_) => Some(400),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Serialization(_) => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
