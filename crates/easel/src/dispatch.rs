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

use crate::catalog::{self, ChartKind, ChartSpec, NumericalUsage};
use crate::config::{EaselConfig, RenderConfig};
use crate::error::DispatchFailure;
use crate::figure::Figure;
use crate::render::{CategoricalSeries, NumericSeries, RenderInput};
use crate::schema::{classify, Classification, ColumnRole};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

pub type RenderResult = Result<Figure, DispatchFailure>;

/// When a table without numerical columns is turned away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericGuard {
    /// Every chart fails with `NoNumericalData`, Pie included.
    #[default]
    Global,
    /// Only the chart's own minimums apply.
    PerChart,
}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub numeric_guard: NumericGuard,
}
/// A table paired with the roles derived from it once, at load time.
#[derive(Debug, Clone)]
pub struct ClassifiedTable<'a> {
    table: &'a Table,
    classification: Classification,
}
impl<'a> ClassifiedTable<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            classification: classify(table),
        }
    }
    pub fn table(&self) -> &'a Table {
        self.table
    }
    pub fn classification(&self) -> &Classification {
        &self.classification
    }
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub chart: ChartKind,
    /// What dispatch would report; `None` when the chart can be drawn.
    pub failure: Option<DispatchFailure>,
}
impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        self.failure.is_none()
    }
}
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
    render: RenderConfig,
}
impl Dispatcher {
    pub fn new(config: DispatchConfig, render: RenderConfig) -> Self {
        Self { config, render }
    }
    pub fn from_config(config: &EaselConfig) -> Self {
        Self::new(config.dispatch.clone(), config.render.clone())
    }
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }
    pub fn dispatch(&self, table: &Table, chart_name: &str) -> RenderResult {
        self.dispatch_classified(&ClassifiedTable::new(table), chart_name)
    }
    #[instrument(level = "info", skip(self, classified), fields(chart = %chart_name))]
    pub fn dispatch_classified(
        &self,
        classified: &ClassifiedTable<'_>,
        chart_name: &str,
    ) -> RenderResult {
        let spec = catalog::lookup(chart_name).inspect_err(|failure| {
            warn!(%failure, "chart lookup failed");
        })?;
        self.dispatch_kind(classified, spec.kind)
    }
    pub fn dispatch_kind(&self, classified: &ClassifiedTable<'_>, kind: ChartKind) -> RenderResult {
        let spec = kind.spec();
        if let Err(failure) = self.check(classified.classification(), spec) {
            warn!(chart = %kind, %failure, "chart preconditions not met");
            return Err(failure);
        }
        let input = select(classified, spec, &self.render);
        debug!(
            chart = %kind,
            numerical = input.numerical().len(),
            categorical = input.categorical().len(),
            "selected columns"
        );
        let figure = (spec.renderer)(&input)?;
        info!(chart = %kind, title = %figure.title, "rendered chart");
        Ok(figure)
    }
    /// Applies the numeric guard, then the chart's minimums, numerical first.
    pub fn check(
        &self,
        classification: &Classification,
        spec: &ChartSpec,
    ) -> Result<(), DispatchFailure> {
        if self.config.numeric_guard == NumericGuard::Global && !classification.has_numerical() {
            return Err(DispatchFailure::NoNumericalData);
        }
        for role in [ColumnRole::Numerical, ColumnRole::Categorical] {
            let have = classification.count(role);
            let need = spec.minimum(role);
            if have < need {
                return Err(DispatchFailure::InsufficientColumns {
                    chart: spec.kind,
                    role,
                    have,
                    need,
                });
            }
        }
        Ok(())
    }
    /// Every catalog entry in catalog order with the failure dispatch would report.
    pub fn eligible_charts(&self, table: &Table) -> Vec<Eligibility> {
        self.eligibility(&ClassifiedTable::new(table))
    }
    pub fn eligibility(&self, classified: &ClassifiedTable<'_>) -> Vec<Eligibility> {
        catalog::catalog()
            .iter()
            .map(|spec| Eligibility {
                chart: spec.kind,
                failure: self.check(classified.classification(), spec).err(),
            })
            .collect()
    }
}
/// Positional selection: the first columns of each role in table order.
fn select<'a>(
    classified: &ClassifiedTable<'a>,
    spec: &ChartSpec,
    render: &'a RenderConfig,
) -> RenderInput<'a> {
    let table = classified.table();
    let classification = classified.classification();
    let numerical_names = classification.numerical();
    let numerical_take = match spec.numerical_usage {
        NumericalUsage::Prefix => spec.min_numerical,
        NumericalUsage::All => numerical_names.len(),
    };
    let numerical = numerical_names
        .iter()
        .take(numerical_take)
        .filter_map(|name| table.column(name))
        .filter_map(|column| {
            Some(NumericSeries {
                name: column.name(),
                values: column.as_numeric()?,
            })
        })
        .collect();
    let categorical = classification
        .categorical()
        .iter()
        .take(spec.min_categorical)
        .filter_map(|name| table.column(name))
        .filter_map(|column| {
            Some(CategoricalSeries {
                name: column.name(),
                values: column.as_text()?,
            })
        })
        .collect();
    RenderInput::new(spec.kind, numerical, categorical, render)
}
/// Dispatches with the default configuration.
pub fn dispatch(table: &Table, chart_name: &str) -> RenderResult {
    Dispatcher::default().dispatch(table, chart_name)
}
