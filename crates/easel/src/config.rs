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

use crate::dispatch::DispatchConfig;
use crate::error::{ConfigError, ConfigResult};
use llm_contracts::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EaselConfig {
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub histogram_bins: usize,
    /// Evaluation points per density curve.
    pub density_points: usize,
}
impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            density_points: 100,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub provider: ProviderConfig,
}
fn default_enabled() -> bool {
    true
}
impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: ProviderConfig::default(),
        }
    }
}
impl EaselConfig {
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: EaselConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileError {
                path: path.display().to_string(),
                source,
            })?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_yaml_str(&content)
    }
    pub fn validate(&self) -> ConfigResult<()> {
        if self.render.histogram_bins == 0 {
            return Err(invalid("render.histogram_bins", self.render.histogram_bins));
        }
        if self.render.density_points < 2 {
            return Err(invalid("render.density_points", self.render.density_points));
        }
        let provider = &self.advisory.provider;
        if provider.timeout_seconds == 0 {
            return Err(invalid("advisory.timeout_seconds", provider.timeout_seconds));
        }
        if provider.model.trim().is_empty() {
            return Err(ConfigError::MissingRequiredConfig {
                field: "advisory.model".to_string(),
            });
        }
        if provider.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingRequiredConfig {
                field: "advisory.endpoint".to_string(),
            });
        }
        Ok(())
    }
}
fn invalid(field: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::NumericGuard;

    #[test]
    fn test_default_config_is_valid() {
        let config = EaselConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.render.histogram_bins, 30);
        assert_eq!(config.render.density_points, 100);
        assert_eq!(config.dispatch.numeric_guard, NumericGuard::Global);
        assert!(config.advisory.enabled);
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
dispatch:
  numeric_guard: per_chart
render:
  histogram_bins: 12
advisory:
  enabled: false
  model: mixtral-8x7b-32768
  timeout_seconds: 5
"#;
        let config = EaselConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.dispatch.numeric_guard, NumericGuard::PerChart);
        assert_eq!(config.render.histogram_bins, 12);
        assert_eq!(config.render.density_points, 100);
        assert!(!config.advisory.enabled);
        assert_eq!(config.advisory.provider.model, "mixtral-8x7b-32768");
        assert_eq!(config.advisory.provider.timeout_seconds, 5);
        assert_eq!(config.advisory.provider.api_key_env, "GROQ_API_KEY");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(EaselConfig::from_yaml_str("{}").unwrap(), EaselConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = EaselConfig::default();
        config.render.histogram_bins = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "render.histogram_bins"
        ));

        let mut config = EaselConfig::default();
        config.render.density_points = 1;
        assert!(config.validate().is_err());

        let mut config = EaselConfig::default();
        config.advisory.provider.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = EaselConfig::default();
        config.advisory.provider.model = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRequiredConfig { .. })
        ));
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        assert!(matches!(
            EaselConfig::from_yaml_str("render: [1, 2"),
            Err(ConfigError::YamlParseError { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EaselConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ConfigFileError { .. }));
    }
}
