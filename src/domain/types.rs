//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., non-empty identifiers,
//! validated email, bounded score) so that once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page sizes offered by the leads grid.
pub const PAGINATION_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Page size used until the user picks another one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Highest score a lead can carry.
pub const MAX_LEAD_SCORE: i64 = 100;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TypeConstraintError {
    /// Provided identifier contained no non-whitespace characters.
    #[error("id cannot be empty")]
    EmptyId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Score fell outside the inclusive `0..=100` range.
    #[error("score must be between 0 and {MAX_LEAD_SCORE}")]
    ScoreOutOfRange,
    /// Monetary value was negative or not a finite number.
    #[error("lead value must be a non-negative amount")]
    InvalidLeadValue,
    /// Page size is not one of [`PAGINATION_SIZES`].
    #[error("page size {0} is not supported")]
    InvalidPageSize(usize),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Returns `true` for strings shaped like `local@domain` without whitespace.
///
/// Matches the panel's loose `\S+@\S+` pattern, not full RFC syntax.
pub fn is_basic_email(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let last = value.len() - 1;
    value
        .char_indices()
        .any(|(idx, ch)| ch == '@' && idx > 0 && idx < last)
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if is_basic_email(&normalized) {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Opaque identifier assigned to a lead by the remote store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeadId(String);

impl LeadId {
    /// Wraps a server-assigned identifier, rejecting blank values.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TypeConstraintError::EmptyId);
        }
        Ok(Self(value))
    }

    /// Borrow the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LeadId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for LeadId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_empty_string_newtype!(PersonName, "First or last name enforcing non-empty values.");

non_empty_string_newtype!(PhoneNumber, "Contact phone enforcing non-empty values.");

non_empty_string_newtype!(CompanyName, "Company name enforcing non-empty values.");

non_empty_string_newtype!(PlaceName, "City or state enforcing non-empty values.");

/// Lead score constrained to `0..=100`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeadScore(u8);

impl LeadScore {
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if (0..=MAX_LEAD_SCORE).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(TypeConstraintError::ScoreOutOfRange)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Monetary value of a lead; finite and never negative.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct LeadValue(f64);

impl LeadValue {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidLeadValue)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Number of leads requested per page, restricted to [`PAGINATION_SIZES`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a page size ensuring it is one of the supported choices.
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        if PAGINATION_SIZES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidPageSize(value))
        }
    }

    /// Returns the raw number of items per page.
    pub const fn get(self) -> usize {
        self.0
    }

    /// All selectable page sizes in ascending order.
    pub fn choices() -> impl Iterator<Item = PageSize> {
        PAGINATION_SIZES.into_iter().map(PageSize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_email_pattern() {
        assert!(is_basic_email("a@b"));
        assert!(is_basic_email("jane.doe@example.com"));
        assert!(!is_basic_email("@example.com"));
        assert!(!is_basic_email("jane@"));
        assert!(!is_basic_email("jane doe@example.com"));
        assert!(!is_basic_email("plain"));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = EmailAddress::new("  Jane@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "jane@example.com");
    }

    #[test]
    fn score_bounds_are_inclusive() {
        assert_eq!(LeadScore::new(0).unwrap().get(), 0);
        assert_eq!(LeadScore::new(100).unwrap().get(), 100);
        assert_eq!(LeadScore::new(101), Err(TypeConstraintError::ScoreOutOfRange));
        assert_eq!(LeadScore::new(-1), Err(TypeConstraintError::ScoreOutOfRange));
    }

    #[test]
    fn lead_value_rejects_negative_and_nan() {
        assert!(LeadValue::new(0.0).is_ok());
        assert!(LeadValue::new(1250.5).is_ok());
        assert_eq!(LeadValue::new(-0.01), Err(TypeConstraintError::InvalidLeadValue));
        assert_eq!(LeadValue::new(f64::NAN), Err(TypeConstraintError::InvalidLeadValue));
    }

    #[test]
    fn page_size_only_accepts_listed_choices() {
        assert_eq!(PageSize::default().get(), 20);
        assert!(PageSize::new(50).is_ok());
        assert_eq!(PageSize::new(25), Err(TypeConstraintError::InvalidPageSize(25)));
        let sizes: Vec<usize> = PageSize::choices().map(PageSize::get).collect();
        assert_eq!(sizes, vec![10, 20, 50, 100]);
    }

    #[test]
    fn page_size_deserializes_through_validation() {
        let size: PageSize = serde_json::from_str("100").unwrap();
        assert_eq!(size.get(), 100);
        assert!(serde_json::from_str::<PageSize>("7").is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(PersonName::new("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(CompanyName::new(" Acme ").unwrap().as_str(), "Acme");
        assert_eq!(LeadId::new(""), Err(TypeConstraintError::EmptyId));
    }
}
