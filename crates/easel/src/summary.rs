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

use crate::error::TableResult;
use crate::schema::ColumnRole;
use crate::stats;
use crate::table::{Column, ColumnValues, Table};
use polars::prelude::{ChunkAgg, ChunkVar};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ColumnStats {
    Numerical(NumericStats),
    Categorical(CategoricalStats),
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Present (non-missing) values.
    pub count: usize,
    pub stats: ColumnStats,
}
impl ColumnSummary {
    pub fn role(&self) -> ColumnRole {
        match self.stats {
            ColumnStats::Numerical(_) => ColumnRole::Numerical,
            ColumnStats::Categorical(_) => ColumnRole::Categorical,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}
pub fn describe(table: &Table) -> TableResult<DatasetSummary> {
    Ok(DatasetSummary {
        rows: table.height(),
        columns: table
            .columns()
            .iter()
            .map(describe_column)
            .collect::<TableResult<_>>()?,
    })
}
fn describe_column(column: &Column) -> TableResult<ColumnSummary> {
    let stats = match column.values() {
        ColumnValues::Numeric(values) => {
            let ca = stats::float_column(column.name(), values);
            ColumnStats::Numerical(NumericStats {
                mean: ca.mean(),
                std: ca.std(1),
                min: ca.min(),
                q25: stats::quantile(&ca, 0.25),
                q50: stats::quantile(&ca, 0.5),
                q75: stats::quantile(&ca, 0.75),
                max: ca.max(),
            })
        }
        ColumnValues::Text(values) => {
            let counts = stats::value_counts(values)?;
            let top = counts.first();
            ColumnStats::Categorical(CategoricalStats {
                unique: counts.len(),
                top: top.map(|(value, _)| value.clone()),
                freq: top.map(|(_, freq)| *freq).unwrap_or_default(),
            })
        }
    };
    Ok(ColumnSummary {
        name: column.name().to_string(),
        count: column.len() - column.null_count(),
        stats,
    })
}
const STAT_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];
fn format_number(value: f64) -> String {
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
fn cell(summary: &ColumnSummary, stat: &str) -> String {
    let number = |v: Option<f64>| v.map(format_number).unwrap_or_else(|| "NaN".to_string());
    match (&summary.stats, stat) {
        (_, "count") => summary.count.to_string(),
        (ColumnStats::Categorical(c), "unique") => c.unique.to_string(),
        (ColumnStats::Categorical(c), "top") => c.top.clone().unwrap_or_else(|| "NaN".to_string()),
        (ColumnStats::Categorical(c), "freq") => c.freq.to_string(),
        (ColumnStats::Numerical(n), "mean") => number(n.mean),
        (ColumnStats::Numerical(n), "std") => number(n.std),
        (ColumnStats::Numerical(n), "min") => number(n.min),
        (ColumnStats::Numerical(n), "25%") => number(n.q25),
        (ColumnStats::Numerical(n), "50%") => number(n.q50),
        (ColumnStats::Numerical(n), "75%") => number(n.q75),
        (ColumnStats::Numerical(n), "max") => number(n.max),
        _ => "NaN".to_string(),
    }
}
impl DatasetSummary {
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
    /// Statistics as rows and columns as columns, like a dataframe `describe`.
    pub fn to_text(&self) -> String {
        let has_numerical = self.columns.iter().any(|c| c.role() == ColumnRole::Numerical);
        let has_categorical = self.columns.iter().any(|c| c.role() == ColumnRole::Categorical);
        let stats: Vec<&str> = STAT_ROWS
            .into_iter()
            .filter(|stat| match *stat {
                "count" => true,
                "unique" | "top" | "freq" => has_categorical,
                _ => has_numerical,
            })
            .collect();
        let grid: Vec<Vec<String>> = stats
            .iter()
            .map(|stat| self.columns.iter().map(|c| cell(c, stat)).collect())
            .collect();
        let label_width = stats.iter().map(|s| s.len()).max().unwrap_or_default();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                grid.iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(c.name.len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();
        let mut out = format!("{:label_width$}", "");
        for (column, width) in self.columns.iter().zip(&widths) {
            out.push_str(&format!("  {:>width$}", column.name));
        }
        for (stat, row) in stats.iter().zip(&grid) {
            out.push('\n');
            out.push_str(&format!("{stat:<label_width$}"));
            for (value, width) in row.iter().zip(&widths) {
                out.push_str(&format!("  {value:>width$}"));
            }
        }
        out
    }
}
impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
