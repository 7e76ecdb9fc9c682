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

use crate::table::{ScalarKind, Table};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Numerical,
    Categorical,
}
impl ColumnRole {
    /// Booleans and temporals are categorical; only integer and float kinds are numerical.
    pub fn of(kind: ScalarKind) -> Self {
        if kind.is_numeric() {
            ColumnRole::Numerical
        } else {
            ColumnRole::Categorical
        }
    }
}
impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Numerical => write!(f, "numerical"),
            ColumnRole::Categorical => write!(f, "categorical"),
        }
    }
}
/// Column names per role, each in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    numerical: Vec<String>,
    categorical: Vec<String>,
}
impl Classification {
    pub fn numerical(&self) -> &[String] {
        &self.numerical
    }
    pub fn categorical(&self) -> &[String] {
        &self.categorical
    }
    pub fn columns(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Numerical => &self.numerical,
            ColumnRole::Categorical => &self.categorical,
        }
    }
    pub fn count(&self, role: ColumnRole) -> usize {
        self.columns(role).len()
    }
    pub fn has_numerical(&self) -> bool {
        !self.numerical.is_empty()
    }
}
pub fn classify(table: &Table) -> Classification {
    let mut classification = Classification::default();
    for column in table.columns() {
        let name = column.name().to_string();
        match ColumnRole::of(column.kind()) {
            ColumnRole::Numerical => classification.numerical.push(name),
            ColumnRole::Categorical => classification.categorical.push(name),
        }
    }
    debug!(
        numerical = ?classification.numerical,
        categorical = ?classification.categorical,
        "classified columns"
    );
    classification
}
