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

//! One pure function per chart category.
//!
//! Renderers receive the columns the dispatcher selected, positionally, and
//! build a [`Figure`] without touching the table. They trust the catalog's
//! preconditions; the accessors below still report a missing column as
//! [`DispatchFailure::InsufficientColumns`] instead of panicking.

mod categorical;
mod distribution;
mod matrix;
mod relational;

pub use categorical::{bar, pie, stacked_bar, swarmplot};
pub use distribution::{boxplot, density, histogram, violin};
pub use matrix::{correlation_matrix, heatmap, pairplot};
pub use relational::{area, bubble, line, scatter};

use crate::catalog::ChartKind;
use crate::config::RenderConfig;
use crate::error::DispatchFailure;
use crate::figure::Figure;
use crate::schema::ColumnRole;
use polars::error::PolarsError;

pub type Renderer = fn(&RenderInput<'_>) -> Result<Figure, DispatchFailure>;

#[derive(Debug, Clone, Copy)]
pub struct NumericSeries<'a> {
    pub name: &'a str,
    pub values: &'a [Option<f64>],
}
#[derive(Debug, Clone, Copy)]
pub struct CategoricalSeries<'a> {
    pub name: &'a str,
    pub values: &'a [Option<String>],
}
#[derive(Debug, Clone)]
pub struct RenderInput<'a> {
    chart: ChartKind,
    numerical: Vec<NumericSeries<'a>>,
    categorical: Vec<CategoricalSeries<'a>>,
    options: &'a RenderConfig,
}
impl<'a> RenderInput<'a> {
    pub fn new(
        chart: ChartKind,
        numerical: Vec<NumericSeries<'a>>,
        categorical: Vec<CategoricalSeries<'a>>,
        options: &'a RenderConfig,
    ) -> Self {
        Self {
            chart,
            numerical,
            categorical,
            options,
        }
    }
    pub fn chart(&self) -> ChartKind {
        self.chart
    }
    pub fn numerical(&self) -> &[NumericSeries<'a>] {
        &self.numerical
    }
    pub fn categorical(&self) -> &[CategoricalSeries<'a>] {
        &self.categorical
    }
    pub fn options(&self) -> &RenderConfig {
        self.options
    }
    pub fn numeric(&self, index: usize) -> Result<NumericSeries<'a>, DispatchFailure> {
        self.numerical
            .get(index)
            .copied()
            .ok_or_else(|| self.shortfall(ColumnRole::Numerical, self.numerical.len(), index))
    }
    pub fn category(&self, index: usize) -> Result<CategoricalSeries<'a>, DispatchFailure> {
        self.categorical
            .get(index)
            .copied()
            .ok_or_else(|| self.shortfall(ColumnRole::Categorical, self.categorical.len(), index))
    }
    pub(crate) fn aggregation_failed(&self, error: &PolarsError) -> DispatchFailure {
        DispatchFailure::Aggregation {
            chart: self.chart,
            reason: error.to_string(),
        }
    }
    fn shortfall(&self, role: ColumnRole, have: usize, index: usize) -> DispatchFailure {
        DispatchFailure::InsufficientColumns {
            chart: self.chart,
            role,
            have,
            need: index + 1,
        }
    }
}
/// Distinct present values in order of first appearance.
pub(crate) fn distinct_in_order(values: &[Option<String>]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    values
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|v| seen.insert(*v))
        .collect()
}
