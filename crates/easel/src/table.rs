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

use crate::error::{TableError, TableResult};
use polars::prelude::{DataFrame, DataType as PolarsType, Series};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scalar kind reported by the host representation when the table was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Integer,
    Float,
    Boolean,
    Temporal,
    Text,
}
impl ScalarKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ScalarKind::Integer | ScalarKind::Float)
    }
}
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}
impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(values) => values.len(),
            ColumnValues::Text(values) => values.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn head(&self, n: usize) -> Self {
        match self {
            ColumnValues::Numeric(values) => {
                ColumnValues::Numeric(values.iter().take(n).copied().collect())
            }
            ColumnValues::Text(values) => {
                ColumnValues::Text(values.iter().take(n).cloned().collect())
            }
        }
    }
    fn display_at(&self, row: usize) -> String {
        match self {
            ColumnValues::Numeric(values) => match values.get(row).copied().flatten() {
                Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
                Some(v) => format!("{v}"),
                None => "null".to_string(),
            },
            ColumnValues::Text(values) => values
                .get(row)
                .and_then(|v| v.clone())
                .unwrap_or_else(|| "null".to_string()),
        }
    }
}
/// A named column. Numeric kinds hold `f64` cells, every other kind holds text.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ScalarKind,
    values: ColumnValues,
}
impl Column {
    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::float_opt(name, values.into_iter().map(Some))
    }
    pub fn float_opt(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ScalarKind::Float,
            values: ColumnValues::Numeric(
                values.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect(),
            ),
        }
    }
    pub fn integer(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            name: name.into(),
            kind: ScalarKind::Integer,
            values: ColumnValues::Numeric(values.into_iter().map(|v| Some(v as f64)).collect()),
        }
    }
    pub fn text<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::text_opt(name, values.into_iter().map(Some))
    }
    pub fn text_opt<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        Self::with_text_kind(name, ScalarKind::Text, values)
    }
    pub fn boolean(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self::with_text_kind(
            name,
            ScalarKind::Boolean,
            values.into_iter().map(|b| Some(b.to_string())),
        )
    }
    pub fn temporal<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::with_text_kind(name, ScalarKind::Temporal, values.into_iter().map(Some))
    }
    fn with_text_kind<S: Into<String>>(
        name: impl Into<String>,
        kind: ScalarKind,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            values: ColumnValues::Text(values.into_iter().map(|v| v.map(Into::into)).collect()),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            ColumnValues::Numeric(values) => Some(values),
            ColumnValues::Text(_) => None,
        }
    }
    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match &self.values {
            ColumnValues::Text(values) => Some(values),
            ColumnValues::Numeric(_) => None,
        }
    }
    pub fn null_count(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnValues::Text(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }
    fn from_series(series: &Series) -> TableResult<Self> {
        let name = series.name().to_string();
        let dtype = series.dtype();
        if dtype.is_primitive_numeric() {
            let kind = if dtype.is_integer() {
                ScalarKind::Integer
            } else {
                ScalarKind::Float
            };
            let s_float = series.cast(&PolarsType::Float64)?;
            let values = s_float
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect();
            return Ok(Self {
                name,
                kind,
                values: ColumnValues::Numeric(values),
            });
        }
        let kind = if dtype.is_bool() {
            ScalarKind::Boolean
        } else if dtype.is_temporal() {
            ScalarKind::Temporal
        } else {
            ScalarKind::Text
        };
        let values = match series.cast(&PolarsType::String) {
            Ok(s_str) => s_str
                .str()?
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect(),
            Err(_) => (0..series.len())
                .map(|i| {
                    series
                        .get(i)
                        .ok()
                        .filter(|v| !v.is_null())
                        .map(|v| v.to_string())
                })
                .collect(),
        };
        Ok(Self {
            name,
            kind,
            values: ColumnValues::Text(values),
        })
    }
}
/// Ordered, equal-length, uniquely named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}
impl Table {
    pub fn new(columns: Vec<Column>) -> TableResult<Self> {
        let first = columns.first().ok_or(TableError::Empty)?;
        let height = first.len();
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(TableError::DuplicateColumn {
                    name: column.name().to_string(),
                });
            }
            if column.len() != height {
                return Err(TableError::LengthMismatch {
                    column: column.name().to_string(),
                    expected: height,
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns, height })
    }
    pub fn from_dataframe(df: &DataFrame) -> TableResult<Self> {
        let columns = df
            .get_columns()
            .iter()
            .map(|column| Column::from_series(column.as_materialized_series()))
            .collect::<TableResult<Vec<_>>>()?;
        Self::new(columns)
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn width(&self) -> usize {
        self.columns.len()
    }
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    kind: c.kind,
                    values: c.values.head(n),
                })
                .collect(),
            height: self.height.min(n),
        }
    }
    /// Renders the first `n` rows as an aligned text grid.
    pub fn preview(&self, n: usize) -> String {
        let rows = self.height.min(n);
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| {
                std::iter::once(c.name.clone())
                    .chain((0..rows).map(|r| c.values.display_at(r)))
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = cells
            .iter()
            .map(|col| col.iter().map(|s| s.chars().count()).max().unwrap_or(0))
            .collect();
        let mut out = String::new();
        for line in 0..=rows {
            let row: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(col, width)| format!("{:>width$}", col[line], width = *width))
                .collect();
            out.push_str(row.join("  ").trim_end());
            out.push('\n');
        }
        if self.height > rows {
            out.push_str(&format!("... {} more row(s)\n", self.height - rows));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> Table {
        Table::new(vec![
            Column::text("region", ["east", "west", "east"]),
            Column::float("revenue", [10.0, 20.0, 30.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(Table::new(vec![]), Err(TableError::Empty)));
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Table::new(vec![
            Column::float("a", [1.0, 2.0]),
            Column::float("b", [1.0]),
        ])
        .unwrap_err();
        match err {
            TableError::LengthMismatch {
                column,
                expected,
                found,
            } => {
                assert_eq!(column, "b");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::float("a", [1.0]),
            Column::text("a", ["x"]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { name } if name == "a"));
    }

    #[test]
    fn test_nan_is_missing() {
        let column = Column::float("x", [1.0, f64::NAN]);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_head_and_preview() {
        let table = sales();
        let head = table.head(2);
        assert_eq!(head.height(), 2);
        assert_eq!(head.width(), 2);
        let preview = table.preview(2);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines[0], "region  revenue");
        assert_eq!(lines[1], "  east       10");
        assert_eq!(lines[3], "... 1 more row(s)");
    }

    #[test]
    fn test_from_dataframe_maps_kinds() {
        let df = polars::df!(
            "id" => [1i64, 2, 3],
            "score" => [0.5f64, 1.5, 2.5],
            "flag" => [true, false, true],
            "label" => ["a", "b", "a"]
        )
        .unwrap();
        let table = Table::from_dataframe(&df).unwrap();
        let kinds: Vec<ScalarKind> = table.columns().iter().map(Column::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScalarKind::Integer,
                ScalarKind::Float,
                ScalarKind::Boolean,
                ScalarKind::Text
            ]
        );
        assert_eq!(
            table.column("id").unwrap().as_numeric().unwrap(),
            &[Some(1.0), Some(2.0), Some(3.0)]
        );
        assert_eq!(
            table.column("flag").unwrap().as_text().unwrap()[1].as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_from_dataframe_keeps_nulls() {
        let df = polars::df!(
            "x" => [Some(1.0f64), None, Some(3.0)],
            "c" => [Some("a"), Some("b"), None]
        )
        .unwrap();
        let table = Table::from_dataframe(&df).unwrap();
        assert_eq!(table.column("x").unwrap().null_count(), 1);
        assert_eq!(table.column("c").unwrap().null_count(), 1);
    }
}
