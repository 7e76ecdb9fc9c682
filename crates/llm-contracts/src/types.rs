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

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialisation error: {0}")]
    Serialisation(String),

    #[error("Timeout error")]
    Timeout,
}

pub type LLMResult<T> = Result<T, LLMError>;

impl LLMError {
    /// Maps a non-success HTTP status and its body onto the error taxonomy.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => LLMError::Authentication(format!("status {status}: {body}")),
            429 => LLMError::RateLimit,
            _ => LLMError::Provider(format!("status {status}: {body}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            LLMError::from_status(401, "bad key"),
            LLMError::Authentication(_)
        ));
        assert!(matches!(
            LLMError::from_status(403, ""),
            LLMError::Authentication(_)
        ));
        assert!(matches!(LLMError::from_status(429, ""), LLMError::RateLimit));
        match LLMError::from_status(500, "boom") {
            LLMError::Provider(msg) => assert!(msg.contains("500") && msg.contains("boom")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
