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
use crate::figure::{AreaLayer, AreaPoint, Bubble, Figure, FigureBody, NamedPoints, Point};

/// One series per numerical column against the row index.
pub fn line(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    input.numeric(0)?;
    let series = input
        .numerical()
        .iter()
        .map(|column| NamedPoints {
            name: column.name.to_string(),
            points: column
                .values
                .iter()
                .enumerate()
                .filter_map(|(row, v)| v.map(|y| Point { x: row as f64, y }))
                .collect(),
        })
        .collect();
    Ok(Figure::new(
        input.chart(),
        "Line Chart of Numerical Data Over Time",
        FigureBody::Lines { series },
    )
    .with_axes("Index", "Value"))
}
pub fn scatter(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    let x = input.numeric(0)?;
    let y = input.numeric(1)?;
    let points = x
        .values
        .iter()
        .zip(y.values)
        .filter_map(|(x, y)| Some(Point { x: (*x)?, y: (*y)? }))
        .collect();
    Ok(Figure::new(
        input.chart(),
        format!("Scatter Plot: {} vs {}", x.name, y.name),
        FigureBody::Points { points },
    )
    .with_axes(x.name, y.name))
}
/// Scatter of the first two numerical columns sized by the third.
pub fn bubble(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    let x = input.numeric(0)?;
    let y = input.numeric(1)?;
    let size = input.numeric(2)?;
    let bubbles = x
        .values
        .iter()
        .zip(y.values)
        .zip(size.values)
        .filter_map(|((x, y), size)| {
            Some(Bubble {
                x: (*x)?,
                y: (*y)?,
                size: (*size)?,
            })
        })
        .collect();
    Ok(Figure::new(
        input.chart(),
        format!("Bubble Chart: {} vs {} (Sized by {})", x.name, y.name, size.name),
        FigureBody::Bubbles {
            size_label: size.name.to_string(),
            bubbles,
        },
    )
    .with_axes(x.name, y.name))
}
/// Stacked areas in column order; a missing cell contributes nothing to its stack.
pub fn area(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    input.numeric(0)?;
    let rows = input
        .numerical()
        .iter()
        .map(|column| column.values.len())
        .max()
        .unwrap_or_default();
    let mut baseline = vec![0.0; rows];
    let layers = input
        .numerical()
        .iter()
        .map(|column| {
            let points = baseline
                .iter_mut()
                .enumerate()
                .map(|(row, base)| {
                    let value = column.values.get(row).copied().flatten().unwrap_or(0.0);
                    let y0 = *base;
                    *base += value;
                    AreaPoint {
                        x: row as f64,
                        y0,
                        y1: *base,
                    }
                })
                .collect();
            AreaLayer {
                name: column.name.to_string(),
                points,
            }
        })
        .collect();
    Ok(Figure::new(
        input.chart(),
        "Area Chart of Numerical Data",
        FigureBody::StackedAreas { layers },
    )
    .with_axes("Index", "Value"))
}
