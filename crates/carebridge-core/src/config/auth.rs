//! Bearer token storage configuration.

use serde::{Deserialize, Serialize};

/// Where the bearer token is kept between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path of the file holding the raw bearer token.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

fn default_token_file() -> String {
    "data/token".to_string()
}
