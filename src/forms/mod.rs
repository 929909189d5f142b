//! Form definitions backing the lead and auth dialogs.

use std::borrow::Cow;
use std::collections::BTreeMap;

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::filter::FilterError;
use crate::domain::types::{TypeConstraintError, is_basic_email};

pub mod auth;
pub mod filters;
pub mod lead;

/// Inline messages keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl FormError {
    /// Messages to display next to each offending field.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            FormError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .map(|(field, errors)| {
                    let messages = errors
                        .iter()
                        .map(|error| {
                            error
                                .message
                                .as_ref()
                                .map(|message| message.to_string())
                                .unwrap_or_else(|| error.code.to_string())
                        })
                        .collect();
                    (field.to_string(), messages)
                })
                .collect(),
            FormError::Constraint(err) => {
                BTreeMap::from([("form".to_string(), vec![err.to_string()])])
            }
            FormError::Filter(err) => {
                BTreeMap::from([("filters".to_string(), vec![err.to_string()])])
            }
        }
    }
}

pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

pub(crate) fn email_address(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid("required", "Email is required"));
    }
    if !is_basic_email(value) {
        return Err(invalid("email", "Invalid email address"));
    }
    Ok(())
}

pub(crate) fn password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(invalid("required", "Password is required"));
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(invalid(
            "length",
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_messages() {
        let err = email_address("  ").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Email is required"));
        let err = email_address("jane.example.com").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Invalid email address"));
        assert!(email_address("jane@example.com").is_ok());
    }

    #[test]
    fn password_messages() {
        let err = password("").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Password is required"));
        let err = password("12345").unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert!(password("123456").is_ok());
    }
}
