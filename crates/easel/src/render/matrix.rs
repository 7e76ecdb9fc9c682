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

use super::RenderInput;
use crate::error::DispatchFailure;
use crate::figure::{Figure, FigureBody, PairCell, PairContent, Point};
use crate::stats;

fn correlation_body(input: &RenderInput<'_>) -> Result<FigureBody, DispatchFailure> {
    input.numeric(1)?;
    let columns = input.numerical();
    let series: Vec<_> = columns
        .iter()
        .map(|c| stats::float_column(c.name, c.values))
        .collect();
    let values = series
        .iter()
        .map(|row| series.iter().map(|col| stats::pearson(row, col)).collect())
        .collect();
    Ok(FigureBody::Matrix {
        labels: columns.iter().map(|c| c.name.to_string()).collect(),
        values,
    })
}
pub fn heatmap(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    Ok(Figure::new(
        input.chart(),
        "Heatmap of Numerical Data Correlations",
        correlation_body(input)?,
    ))
}
pub fn correlation_matrix(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    Ok(Figure::new(
        input.chart(),
        "Correlation Matrix",
        correlation_body(input)?,
    ))
}
/// k×k grid: histograms on the diagonal, `(col_j, col_i)` scatter elsewhere.
pub fn pairplot(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    input.numeric(0)?;
    let columns = input.numerical();
    let bins = input.options().histogram_bins;
    let mut cells = Vec::with_capacity(columns.len() * columns.len());
    for (row, y) in columns.iter().enumerate() {
        for (col, x) in columns.iter().enumerate() {
            let content = if row == col {
                PairContent::Histogram {
                    bins: stats::histogram(&stats::float_column(y.name, y.values), bins),
                }
            } else {
                PairContent::Scatter {
                    points: x
                        .values
                        .iter()
                        .zip(y.values)
                        .filter_map(|(x, y)| Some(Point { x: (*x)?, y: (*y)? }))
                        .collect(),
                }
            };
            cells.push(PairCell { row, col, content });
        }
    }
    Ok(Figure::new(
        input.chart(),
        "Pairplot of Numerical Data",
        FigureBody::PairGrid {
            labels: columns.iter().map(|c| c.name.to_string()).collect(),
            cells,
        },
    ))
}
