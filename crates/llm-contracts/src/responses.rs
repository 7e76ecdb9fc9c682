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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub content: String,
    pub model: String,
    pub usage: Usage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ProviderResponse {
    /// Reads the first choice of a `chat/completions` response body.
    pub fn from_chat_completion(body: serde_json::Value, requested_model: &str) -> LLMResult<Self> {
        let completion: ChatCompletion = serde_json::from_value(body)
            .map_err(|e| LLMError::Serialisation(format!("Failed to parse response: {e}")))?;
        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            LLMError::Serialisation("Response contained no choices".to_string())
        })?;
        let content = choice.message.content.ok_or_else(|| {
            LLMError::Serialisation("Failed to extract content from response".to_string())
        })?;
        Ok(Self {
            content,
            model: completion
                .model
                .unwrap_or_else(|| requested_model.to_string()),
            usage: completion.usage.unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }
}
