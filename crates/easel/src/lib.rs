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

pub mod advisory;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod figure;
pub mod io;
pub mod render;
pub mod schema;
pub mod stats;
pub mod summary;
pub mod table;

pub use advisory::{request_advisory, Advisory, AdvisoryClient, ChatAdvisoryClient};
pub use catalog::{catalog, lookup, ChartKind, ChartSpec, NumericalUsage};
pub use config::{AdvisoryConfig, EaselConfig, RenderConfig};
pub use dispatch::{
    dispatch, ClassifiedTable, DispatchConfig, Dispatcher, Eligibility, NumericGuard,
    RenderResult,
};
pub use error::{
    ConfigError, DispatchFailure, EaselError, Result, Severity, TableError, TableResult,
};
pub use figure::{Figure, FigureBody};
pub use io::{load_dataframe, load_table, DataFormat};
pub use schema::{classify, Classification, ColumnRole};
pub use summary::{describe, DatasetSummary};
pub use table::{Column, ColumnValues, ScalarKind, Table};
use std::path::Path;
use tracing::{info, warn};

/// Load, classify, advise and dispatch behind one configuration.
#[derive(Debug, Clone, Default)]
pub struct Easel {
    config: EaselConfig,
    dispatcher: Dispatcher,
}
impl Easel {
    pub fn new(config: EaselConfig) -> Result<Self> {
        config.validate()?;
        let dispatcher = Dispatcher::from_config(&config);
        Ok(Self { config, dispatcher })
    }
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(EaselConfig::from_yaml_file(path)?)
    }
    pub fn config(&self) -> &EaselConfig {
        &self.config
    }
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Table> {
        let table = load_table(path)?;
        info!(
            rows = table.height(),
            columns = table.width(),
            "loaded table"
        );
        Ok(table)
    }
    pub fn dispatch(&self, table: &Table, chart_name: &str) -> RenderResult {
        self.dispatcher.dispatch(table, chart_name)
    }
    pub fn eligible_charts(&self, table: &Table) -> Vec<Eligibility> {
        self.dispatcher.eligible_charts(table)
    }
    /// Advisory text from the configured service, or the reason there is none.
    pub fn advise(&self, table: &Table) -> Advisory {
        if !self.config.advisory.enabled {
            return Advisory::Unavailable("AI chart recommendations are disabled.".to_string());
        }
        match ChatAdvisoryClient::new(self.config.advisory.provider.clone()) {
            Ok(client) => request_advisory(&client, table),
            Err(e) => {
                warn!(error = %e, "advisory client not configured");
                Advisory::Unavailable(format!("AI chart recommendations are unavailable: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = EaselConfig::default();
        config.render.histogram_bins = 0;
        assert!(matches!(
            Easel::new(config),
            Err(EaselError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_disabled_advisory() {
        let mut config = EaselConfig::default();
        config.advisory.enabled = false;
        let easel = Easel::new(config).unwrap();
        let table = Table::new(vec![Column::float("x", [1.0])]).unwrap();
        assert!(matches!(easel.advise(&table), Advisory::Unavailable(_)));
    }

    #[test]
    fn test_missing_key_degrades() {
        let mut config = EaselConfig::default();
        config.advisory.provider.api_key_env = "EASEL_FACADE_KEY_NEVER_SET".to_string();
        let easel = Easel::new(config).unwrap();
        let table = Table::new(vec![Column::float("x", [1.0])]).unwrap();
        let Advisory::Unavailable(notice) = easel.advise(&table) else {
            panic!("expected notice");
        };
        assert!(notice.contains("EASEL_FACADE_KEY_NEVER_SET"));
    }
}
