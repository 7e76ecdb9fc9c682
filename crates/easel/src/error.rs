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

use crate::catalog::ChartKind;
use crate::schema::ColumnRole;
use llm_contracts::LLMError;
use thiserror::Error;
#[derive(Error, Debug)]
pub enum EaselError {
    #[error("Table error: {0}")]
    Table(#[from] TableError),
    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchFailure),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Advisory error: {0}")]
    Advisory(#[from] LLMError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Table has no columns")]
    Empty,
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Duplicate column name: '{name}'")]
    DuplicateColumn { name: String },
    #[error("Unsupported data format: {format}")]
    UnsupportedFormat { format: String },
    #[error("Failed to open data file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read data file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: polars::error::PolarsError,
    },
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
/// Reason a single dispatch produced no figure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchFailure {
    #[error("Unknown chart type: '{name}'")]
    UnknownChart { name: String },
    #[error("No numerical data found for visualization")]
    NoNumericalData,
    #[error("{chart} needs {need} {role} column(s), the table has {have}")]
    InsufficientColumns {
        chart: ChartKind,
        role: ColumnRole,
        have: usize,
        need: usize,
    },
    #[error("{chart} could not aggregate its columns: {reason}")]
    Aggregation { chart: ChartKind, reason: String },
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}
impl DispatchFailure {
    pub fn unknown(name: &str) -> Self {
        DispatchFailure::UnknownChart {
            name: name.to_string(),
        }
    }
    pub fn severity(&self) -> Severity {
        match self {
            DispatchFailure::UnknownChart { .. } | DispatchFailure::Aggregation { .. } => {
                Severity::Error
            }
            DispatchFailure::NoNumericalData | DispatchFailure::InsufficientColumns { .. } => {
                Severity::Warning
            }
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            DispatchFailure::UnknownChart { name } => format!(
                "'{name}' is not a supported chart type. Choose one of: {}.",
                ChartKind::ALL
                    .iter()
                    .map(|kind| kind.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            DispatchFailure::NoNumericalData => {
                "No numerical data found for visualization!".to_string()
            }
            DispatchFailure::InsufficientColumns {
                chart,
                role,
                have,
                need,
            } => format!(
                "{} needs at least {need} {role} column(s) but the dataset has {have}. Pick another chart type.",
                chart.label()
            ),
            DispatchFailure::Aggregation { chart, reason } => {
                format!("{} could not be drawn: {reason}", chart.label())
            }
        }
    }
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidValue { field: String, value: String },
    #[error("Missing required configuration: {field}")]
    MissingRequiredConfig { field: String },
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML configuration: {source}")]
    YamlParseError {
        #[from]
        source: serde_yaml::Error,
    },
}
pub type Result<T> = std::result::Result<T, EaselError>;
pub type TableResult<T> = std::result::Result<T, TableError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
impl EaselError {
    pub fn category(&self) -> &'static str {
        match self {
            EaselError::Table(_) => "Table",
            EaselError::Dispatch(_) => "Dispatch",
            EaselError::Config(_) => "Configuration",
            EaselError::Advisory(_) => "Advisory",
            EaselError::Io(_) => "I/O",
            EaselError::Serialisation(_) => "Serialisation",
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            EaselError::Dispatch(failure) => failure.user_message(),
            EaselError::Table(TableError::Empty) => {
                "The dataset appears to be empty. Please provide data with at least one column."
                    .to_string()
            }
            EaselError::Table(TableError::UnsupportedFormat { format }) => format!(
                "Files of type '{format}' are not supported. Use CSV, Parquet or JSON."
            ),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_split() {
        assert_eq!(
            DispatchFailure::unknown("Radar").severity(),
            Severity::Error
        );
        assert_eq!(DispatchFailure::NoNumericalData.severity(), Severity::Warning);
        let insufficient = DispatchFailure::InsufficientColumns {
            chart: ChartKind::Bubble,
            role: ColumnRole::Numerical,
            have: 1,
            need: 3,
        };
        assert_eq!(insufficient.severity(), Severity::Warning);
    }

    #[test]
    fn test_insufficient_columns_message() {
        let failure = DispatchFailure::InsufficientColumns {
            chart: ChartKind::Bubble,
            role: ColumnRole::Numerical,
            have: 1,
            need: 3,
        };
        assert_eq!(
            failure.to_string(),
            "Bubble needs 3 numerical column(s), the table has 1"
        );
        assert!(failure.user_message().starts_with("Bubble Chart needs at least 3"));
    }

    #[test]
    fn test_aggregation_failure_is_an_error() {
        let failure = DispatchFailure::Aggregation {
            chart: ChartKind::Pie,
            reason: "column not found".to_string(),
        };
        assert_eq!(failure.severity(), Severity::Error);
        assert_eq!(failure.user_message(), "Pie Chart could not be drawn: column not found");
    }

    #[test]
    fn test_unknown_chart_lists_choices() {
        let message = DispatchFailure::unknown("NotARealChart").user_message();
        assert!(message.contains("NotARealChart"));
        assert!(message.contains("Correlation Matrix"));
    }

    #[test]
    fn test_error_category() {
        let err = EaselError::from(DispatchFailure::NoNumericalData);
        assert_eq!(err.category(), "Dispatch");
        assert_eq!(err.user_message(), "No numerical data found for visualization!");
        let err = EaselError::from(TableError::UnsupportedFormat {
            format: "xlsx".to_string(),
        });
        assert_eq!(err.category(), "Table");
        assert!(err.user_message().contains("xlsx"));
    }
}
