use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, PersonName};

/// Authenticated panel user as reported by the auth endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

/// Registration payload; the password confirmation never leaves the form.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: String,
}
