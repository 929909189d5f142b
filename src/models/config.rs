//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::types::PageSize;

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the leads console client.
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub page_size: PageSize,
    /// Credentials used when no session can be restored.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Restricts the listing to one lead status.
    #[serde(default)]
    pub status: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: PageSize::default(),
            email: None,
            password: None,
            status: None,
        }
    }
}
