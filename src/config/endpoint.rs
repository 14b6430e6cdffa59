//! Endpoint Configuration
//!
//! Defines the configuration schema for the inference endpoint.

use crate::api::completion::SamplingDefaults;
use serde::{Deserialize, Serialize};

/// Configuration for the inference API endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL for the API
    pub base_url: String,

    /// Environment variable name for the API credential
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Known models (for documentation; the live list comes from the service)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,

    /// Fallback sampling parameters applied to unset request fields
    #[serde(default)]
    pub defaults: SamplingDefaults,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cerebras.ai/v1".to_string(),
            api_key_env: Some("CEREBRAS_API_KEY".to_string()),
            models: Vec::new(),
            defaults: SamplingDefaults::default(),
        }
    }
}

impl EndpointConfig {
    /// Build a full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Read the credential from the configured environment variable, if any.
    pub fn credential_from_env(&self) -> Option<String> {
        self.api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty())
    }
}
