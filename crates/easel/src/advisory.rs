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

//! Free-text chart suggestions from a chat-completions service.
//!
//! The reply is shown as-is and never parsed into chart choices. A failure
//! here is reported as a notice and leaves dispatch untouched.

use crate::summary::describe;
use crate::table::Table;
use llm_contracts::{LLMError, LLMResult, Message, ProviderConfig, ProviderRequest, ProviderResponse};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const SYSTEM_PROMPT: &str = "You are an AI data visualization expert. Given a dataset, recommend the most suitable chart types for visualization.";

pub trait AdvisoryClient {
    fn advise(&self, summary_text: &str) -> LLMResult<String>;
}
pub fn advisory_messages(summary_text: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(format!(
            "Here is a preview of the dataset:\n{summary_text}\nWhich charts would best visualize this data?"
        )),
    ]
}
#[derive(Debug, Clone)]
pub struct ChatAdvisoryClient {
    client: Client,
    api_key: String,
    config: ProviderConfig,
}
impl ChatAdvisoryClient {
    /// Fails with `LLMError::Configuration` when the key variable is unset.
    pub fn new(config: ProviderConfig) -> LLMResult<Self> {
        let api_key = config.resolve_api_key()?;
        Self::with_api_key(config, api_key)
    }
    pub fn with_api_key(config: ProviderConfig, api_key: impl Into<String>) -> LLMResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LLMError::Configuration(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }
    fn request(&self, summary_text: &str) -> ProviderRequest {
        ProviderRequest::new(&self.config.model, advisory_messages(summary_text))
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature)
    }
    pub fn send(&self, request: &ProviderRequest) -> LLMResult<ProviderResponse> {
        debug!(endpoint = %self.config.endpoint, model = %request.model, "requesting chart advisory");
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LLMError::Timeout
                } else {
                    LLMError::Network(format!("Request failed: {e}"))
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LLMError::from_status(status.as_u16(), &body));
        }
        let body: serde_json::Value = response
            .json()
            .map_err(|e| LLMError::Serialisation(format!("Failed to parse response: {e}")))?;
        let parsed = ProviderResponse::from_chat_completion(body, &request.model)?;
        info!(
            model = %parsed.model,
            total_tokens = parsed.usage.total_tokens,
            "received chart advisory"
        );
        Ok(parsed)
    }
}
impl AdvisoryClient for ChatAdvisoryClient {
    fn advise(&self, summary_text: &str) -> LLMResult<String> {
        self.send(&self.request(summary_text))
            .map(|response| response.content)
    }
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    Text(String),
    /// Non-fatal notice explaining why no suggestion is available.
    Unavailable(String),
}
impl Advisory {
    pub fn text(&self) -> Option<&str> {
        match self {
            Advisory::Text(text) => Some(text),
            Advisory::Unavailable(_) => None,
        }
    }
}
/// Summarises `table` and asks `client` for suggestions, degrading on failure.
pub fn request_advisory(client: &dyn AdvisoryClient, table: &Table) -> Advisory {
    let summary = match describe(table) {
        Ok(summary) => summary.to_text(),
        Err(e) => {
            warn!(error = %e, "could not summarise table for advisory");
            return Advisory::Unavailable(format!("AI chart recommendations are unavailable: {e}"));
        }
    };
    match client.advise(&summary) {
        Ok(text) => Advisory::Text(text),
        Err(e) => {
            warn!(error = %e, "chart advisory unavailable");
            Advisory::Unavailable(format!("AI chart recommendations are unavailable: {e}"))
        }
    }
}
