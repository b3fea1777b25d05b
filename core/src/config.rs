//! Construction parameters that can be loaded from any serde source.

use std::time::Duration;

use serde::Deserialize;

use crate::auth::{Auth, DEFAULT_CREDENTIAL_HEADER};

/// Timeout applied to every call until `ApiClient::set_timeout` changes it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// Client settings, e.g. deserialized from a TOML or JSON file.
///
/// Setting `api_key` selects fixed-credential auth; `credential_header`
/// renames the header it is sent in.
/// A `timeout_secs` of 0 means no time limit.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub credential_header: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            credential_header: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn auth(&self) -> Auth {
        match &self.api_key {
            Some(key) => Auth::FixedCredentialHeader {
                header: self
                    .credential_header
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CREDENTIAL_HEADER.to_string()),
                credential: key.clone(),
            },
            None => Auth::StaticHeaderList,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
