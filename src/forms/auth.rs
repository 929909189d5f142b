use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{EmailAddress, PersonName};
use crate::domain::user::{Credentials, NewUser};
use crate::forms::{FormError, email_address, not_blank, password};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Sign-in form.
pub struct LoginForm {
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[validate(custom(function = "password"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Account registration form.
pub struct RegisterForm {
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[validate(custom(function = "password"))]
    pub password: String,
    #[validate(
        custom(function = "not_blank", message = "Please confirm your password"),
        must_match(other = "password", message = "Passwords do not match")
    )]
    pub confirm_password: String,
}

impl TryFrom<&LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: &LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Credentials {
            email: EmailAddress::new(form.email.as_str())?,
            password: form.password.clone(),
        })
    }
}

impl TryFrom<&RegisterForm> for NewUser {
    type Error = FormError;

    /// Validates the form and drops the password confirmation.
    fn try_from(form: &RegisterForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewUser {
            first_name: PersonName::new(form.first_name.as_str())?,
            last_name: PersonName::new(form.last_name.as_str())?,
            email: EmailAddress::new(form.email.as_str())?,
            password: form.password.clone(),
        })
    }
}
