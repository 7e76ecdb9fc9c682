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
use serde::{Deserialize, Serialize};

/// A rendered chart: the computed marks plus the labels that go with them.
///
/// Every dispatch builds a fresh value; nothing is shared between figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub chart: ChartKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub body: FigureBody,
}
impl Figure {
    pub fn new(chart: ChartKind, title: impl Into<String>, body: FigureBody) -> Self {
        Self {
            chart,
            title: title.into(),
            x_label: None,
            y_label: None,
            body,
        }
    }
    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mark", rename_all = "snake_case")]
pub enum FigureBody {
    Bars { bars: Vec<Bar> },
    StackedBars {
        categories: Vec<String>,
        segments: Vec<Segment>,
    },
    Lines { series: Vec<NamedPoints> },
    Points { points: Vec<Point> },
    Bubbles {
        size_label: String,
        bubbles: Vec<Bubble>,
    },
    Matrix {
        labels: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    },
    Boxes { boxes: Vec<BoxSummary> },
    PairGrid {
        labels: Vec<String>,
        cells: Vec<PairCell>,
    },
    Swarm { groups: Vec<SwarmGroup> },
    Histogram { bins: Vec<Bin>, density: Vec<Point> },
    Violins { violins: Vec<Violin> },
    Densities { curves: Vec<NamedPoints> },
    StackedAreas { layers: Vec<AreaLayer> },
    Pie { slices: Vec<Slice> },
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoints {
    pub name: String,
    pub points: Vec<Point>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub category: String,
    /// `None` when the category has no numerical values.
    pub value: Option<f64>,
}
/// One numerical column's contribution to every stack, aligned with `categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub values: Vec<f64>,
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub name: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCell {
    pub row: usize,
    pub col: usize,
    pub content: PairContent,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairContent {
    Histogram { bins: Vec<Bin> },
    Scatter { points: Vec<Point> },
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmGroup {
    pub category: String,
    pub values: Vec<f64>,
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violin {
    pub name: String,
    pub curve: Vec<Point>,
    pub quartiles: Option<Quartiles>,
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaPoint {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLayer {
    pub name: String,
    pub points: Vec<AreaPoint>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    /// Percentage of all counted rows.
    pub share: f64,
}
