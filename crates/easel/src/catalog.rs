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

use crate::error::DispatchFailure;
use crate::render::{self, Renderer};
use crate::schema::ColumnRole;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fifteen chart categories, in selection-list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    Line,
    Scatter,
    Heatmap,
    Boxplot,
    Pairplot,
    Swarmplot,
    Histogram,
    Violin,
    Density,
    Area,
    Pie,
    CorrelationMatrix,
    Bubble,
}
impl ChartKind {
    pub const ALL: [ChartKind; 15] = [
        ChartKind::Bar,
        ChartKind::StackedBar,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Heatmap,
        ChartKind::Boxplot,
        ChartKind::Pairplot,
        ChartKind::Swarmplot,
        ChartKind::Histogram,
        ChartKind::Violin,
        ChartKind::Density,
        ChartKind::Area,
        ChartKind::Pie,
        ChartKind::CorrelationMatrix,
        ChartKind::Bubble,
    ];
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::StackedBar => "Stacked Bar",
            ChartKind::Line => "Line",
            ChartKind::Scatter => "Scatter",
            ChartKind::Heatmap => "Heatmap",
            ChartKind::Boxplot => "Boxplot",
            ChartKind::Pairplot => "Pairplot",
            ChartKind::Swarmplot => "Swarmplot",
            ChartKind::Histogram => "Histogram",
            ChartKind::Violin => "Violin",
            ChartKind::Density => "Density",
            ChartKind::Area => "Area",
            ChartKind::Pie => "Pie",
            ChartKind::CorrelationMatrix => "Correlation Matrix",
            ChartKind::Bubble => "Bubble",
        }
    }
    /// Label shown in the chart picker.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::StackedBar => "Stacked Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Heatmap => "Heatmap",
            ChartKind::Boxplot => "Boxplot",
            ChartKind::Pairplot => "Pairplot",
            ChartKind::Swarmplot => "Swarmplot",
            ChartKind::Histogram => "Histogram",
            ChartKind::Violin => "Violin Plot",
            ChartKind::Density => "Density Plot",
            ChartKind::Area => "Area Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::CorrelationMatrix => "Correlation Matrix",
            ChartKind::Bubble => "Bubble Chart",
        }
    }
    pub fn spec(self) -> &'static ChartSpec {
        &CATALOG[self as usize]
    }
}
impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
fn normalise(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
impl FromStr for ChartKind {
    type Err = DispatchFailure;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        ChartKind::ALL
            .into_iter()
            .find(|kind| {
                normalise(kind.name()) == wanted || normalise(kind.label()) == wanted
            })
            .ok_or_else(|| DispatchFailure::unknown(s))
    }
}
/// How many numerical columns a renderer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericalUsage {
    /// The first `n` numerical columns, where `n` is the chart's minimum.
    Prefix,
    /// Every numerical column, in table order.
    All,
}
pub struct ChartSpec {
    pub kind: ChartKind,
    pub min_numerical: usize,
    pub min_categorical: usize,
    pub numerical_usage: NumericalUsage,
    pub renderer: Renderer,
}
impl fmt::Debug for ChartSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartSpec")
            .field("kind", &self.kind)
            .field("min_numerical", &self.min_numerical)
            .field("min_categorical", &self.min_categorical)
            .field("numerical_usage", &self.numerical_usage)
            .finish_non_exhaustive()
    }
}
impl ChartSpec {
    pub fn minimum(&self, role: ColumnRole) -> usize {
        match role {
            ColumnRole::Numerical => self.min_numerical,
            ColumnRole::Categorical => self.min_categorical,
        }
    }
}
const fn entry(
    kind: ChartKind,
    min_numerical: usize,
    min_categorical: usize,
    numerical_usage: NumericalUsage,
    renderer: Renderer,
) -> ChartSpec {
    ChartSpec {
        kind,
        min_numerical,
        min_categorical,
        numerical_usage,
        renderer,
    }
}
/// Indexed by `ChartKind as usize`.
static CATALOG: [ChartSpec; 15] = [
    entry(ChartKind::Bar, 1, 1, NumericalUsage::Prefix, render::bar),
    entry(ChartKind::StackedBar, 1, 1, NumericalUsage::All, render::stacked_bar),
    entry(ChartKind::Line, 1, 0, NumericalUsage::All, render::line),
    entry(ChartKind::Scatter, 2, 0, NumericalUsage::Prefix, render::scatter),
    entry(ChartKind::Heatmap, 2, 0, NumericalUsage::All, render::heatmap),
    entry(ChartKind::Boxplot, 1, 0, NumericalUsage::All, render::boxplot),
    entry(ChartKind::Pairplot, 1, 0, NumericalUsage::All, render::pairplot),
    entry(ChartKind::Swarmplot, 1, 1, NumericalUsage::Prefix, render::swarmplot),
    entry(ChartKind::Histogram, 1, 0, NumericalUsage::Prefix, render::histogram),
    entry(ChartKind::Violin, 1, 0, NumericalUsage::All, render::violin),
    entry(ChartKind::Density, 1, 0, NumericalUsage::All, render::density),
    entry(ChartKind::Area, 1, 0, NumericalUsage::All, render::area),
    entry(ChartKind::Pie, 0, 1, NumericalUsage::Prefix, render::pie),
    entry(
        ChartKind::CorrelationMatrix,
        2,
        0,
        NumericalUsage::All,
        render::correlation_matrix,
    ),
    entry(ChartKind::Bubble, 3, 0, NumericalUsage::Prefix, render::bubble),
];
pub fn catalog() -> &'static [ChartSpec] {
    &CATALOG
}
pub fn lookup(chart_name: &str) -> Result<&'static ChartSpec, DispatchFailure> {
    chart_name.parse::<ChartKind>().map(ChartKind::spec)
}
