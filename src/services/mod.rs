use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::StoreError;

pub mod auth;
pub mod leads;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: StoreError,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Wraps a remote failure, preferring the server's message over `fallback`.
    pub fn store(source: StoreError, fallback: &str) -> Self {
        let message = source.message().unwrap_or(fallback).to_string();
        ServiceError::Store { message, source }
    }

    /// Message shown to the user for this failure.
    pub fn message(&self) -> String {
        match self {
            ServiceError::Form(err) => err.to_string(),
            ServiceError::Store { message, .. } => message.clone(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Store { source, .. } if source.is_unauthorized())
    }
}
