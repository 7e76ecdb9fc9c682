// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::types::{LLMError, LLMResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the bearer token.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}
fn default_model() -> String {
    "llama3-8b-8192".to_string()
}
fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}
fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl ProviderConfig {
    /// Reads the API key from the configured environment variable.
    pub fn resolve_api_key(&self) -> LLMResult<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(LLMError::Configuration(format!(
                "API key is missing: set {} in the environment or a .env file",
                self.api_key_env
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_groq() {
        let config = ProviderConfig::default();
        assert!(config.endpoint.contains("api.groq.com"));
        assert_eq!(config.model, "llama3-8b-8192");
        assert_eq!(config.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ProviderConfig =
            serde_json::from_value(serde_json::json!({"model": "mixtral"})).unwrap();
        assert_eq!(config.model, "mixtral");
        assert_eq!(config.endpoint, default_endpoint());
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let config = ProviderConfig {
            api_key_env: "LLM_CONTRACTS_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..ProviderConfig::default()
        };
        assert!(matches!(
            config.resolve_api_key(),
            Err(LLMError::Configuration(_))
        ));
    }
}
