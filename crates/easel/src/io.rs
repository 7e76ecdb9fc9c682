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
use crate::table::Table;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Parquet,
    Json,
}
impl DataFormat {
    pub fn from_path(path: &Path) -> TableResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(DataFormat::Csv),
            "parquet" => Ok(DataFormat::Parquet),
            "json" => Ok(DataFormat::Json),
            _ => Err(TableError::UnsupportedFormat { format: ext }),
        }
    }
}
pub fn load_dataframe<P: AsRef<Path>>(path: P) -> TableResult<DataFrame> {
    let path = path.as_ref();
    let format = DataFormat::from_path(path)?;
    let path_display = path.display().to_string();
    let file = File::open(path).map_err(|source| TableError::Open {
        path: path_display.clone(),
        source,
    })?;
    let result = match format {
        DataFormat::Csv => CsvReader::new(file).finish(),
        DataFormat::Parquet => ParquetReader::new(file).finish(),
        DataFormat::Json => JsonReader::new(file).finish(),
    };
    let df = result.map_err(|source| TableError::Read {
        path: path_display.clone(),
        source,
    })?;
    debug!(path = %path_display, rows = df.height(), columns = df.width(), "loaded dataframe");
    Ok(df)
}
/// Reads a CSV, Parquet or JSON file into a [`Table`], choosing the reader by extension.
pub fn load_table<P: AsRef<Path>>(path: P) -> TableResult<Table> {
    let df = load_dataframe(path)?;
    Table::from_dataframe(&df)
}
