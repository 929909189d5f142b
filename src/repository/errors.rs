use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Human-readable message supplied by the server, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            StoreError::Unauthorized { message } | StoreError::NotFound { message } => {
                Some(message.as_str())
            }
            StoreError::Api { message, .. } => message.as_deref(),
            StoreError::Transport(_) | StoreError::Decode(_) | StoreError::InvalidUrl(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, StoreError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else if err.is_builder() {
            StoreError::InvalidUrl(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}
