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

use super::{NumericSeries, RenderInput};
use crate::error::DispatchFailure;
use crate::figure::{BoxSummary, Figure, FigureBody, NamedPoints, Point, Violin};
use crate::stats;
use polars::prelude::*;

const WHISKER_IQR: f64 = 1.5;

fn box_summary(series: &NumericSeries<'_>) -> Option<BoxSummary> {
    let values = stats::float_column(series.name, series.values).sort(false);
    let quartiles = stats::quartiles(&values)?;
    let iqr = quartiles.q3 - quartiles.q1;
    let low_fence = quartiles.q1 - WHISKER_IQR * iqr;
    let high_fence = quartiles.q3 + WHISKER_IQR * iqr;
    let within = &values.gt_eq(low_fence) & &values.lt_eq(high_fence);
    let inside = values.filter(&within).ok()?;
    let outliers = values.filter(&!&within).ok()?;
    Some(BoxSummary {
        name: series.name.to_string(),
        count: stats::present_count(&values),
        q1: quartiles.q1,
        median: quartiles.median,
        q3: quartiles.q3,
        whisker_low: inside.min().unwrap_or(quartiles.q1),
        whisker_high: inside.max().unwrap_or(quartiles.q3),
        outliers: outliers.into_iter().flatten().collect(),
    })
}
/// Columns without any present value are left out of the figure.
pub fn boxplot(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    input.numeric(0)?;
    let boxes = input.numerical().iter().filter_map(box_summary).collect();
    Ok(Figure::new(
        input.chart(),
        "Boxplot of Numerical Data",
        FigureBody::Boxes { boxes },
    ))
}
/// Binned first numerical column with a density curve scaled to counts.
pub fn histogram(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    let numeric = input.numeric(0)?;
    let options = input.options();
    let values = stats::float_column(numeric.name, numeric.values);
    let bins = stats::histogram(&values, options.histogram_bins);
    let bin_width = bins.first().map(|b| b.end - b.start).unwrap_or_default();
    let scale = stats::present_count(&values) as f64 * bin_width;
    let density = stats::kde(&values, options.density_points)
        .into_iter()
        .map(|p| Point {
            x: p.x,
            y: p.y * scale,
        })
        .collect();
    Ok(Figure::new(
        input.chart(),
        format!("Histogram of {}", numeric.name),
        FigureBody::Histogram { bins, density },
    )
    .with_axes(numeric.name, "Count"))
}
pub fn violin(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    input.numeric(0)?;
    let points = input.options().density_points;
    let violins = input
        .numerical()
        .iter()
        .map(|series| {
            let values = stats::float_column(series.name, series.values);
            Violin {
                name: series.name.to_string(),
                curve: stats::kde(&values, points),
                quartiles: stats::quartiles(&values),
            }
        })
        .collect();
    Ok(Figure::new(
        input.chart(),
        "Violin Plot of Numerical Data",
        FigureBody::Violins { violins },
    ))
}
pub fn density(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    input.numeric(0)?;
    let points = input.options().density_points;
    let curves = input
        .numerical()
        .iter()
        .map(|series| NamedPoints {
            name: series.name.to_string(),
            points: stats::kde(&stats::float_column(series.name, series.values), points),
        })
        .collect();
    Ok(Figure::new(
        input.chart(),
        "Density Plot of Numerical Data",
        FigureBody::Densities { curves },
    )
    .with_axes("Value", "Density"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ChartKind;
    use crate::config::RenderConfig;

    fn input<'a>(
        chart: ChartKind,
        columns: Vec<NumericSeries<'a>>,
        options: &'a RenderConfig,
    ) -> RenderInput<'a> {
        RenderInput::new(chart, columns, vec![], options)
    }

    #[test]
    fn test_boxplot_flags_outliers() {
        let values: Vec<Option<f64>> = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0].into_iter().map(Some).collect();
        let empty = vec![None, None, None, None, None, None];
        let options = RenderConfig::default();
        let input = input(
            ChartKind::Boxplot,
            vec![
                NumericSeries { name: "v", values: &values },
                NumericSeries { name: "gone", values: &empty },
            ],
            &options,
        );
        let FigureBody::Boxes { boxes } = boxplot(&input).unwrap().body else {
            panic!("expected boxes");
        };
        assert_eq!(boxes.len(), 1);
        let summary = &boxes[0];
        assert_eq!(summary.count, 6);
        assert!((summary.q1 - 2.25).abs() < 1e-9);
        assert!((summary.median - 3.5).abs() < 1e-9);
        assert!((summary.q3 - 4.75).abs() < 1e-9);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 5.0);
        assert_eq!(summary.outliers, vec![100.0]);
    }

    #[test]
    fn test_boxplot_skips_missing_and_sorts_outliers() {
        let values = vec![Some(-50.0), Some(3.0), None, Some(2.0), Some(4.0), Some(90.0), Some(1.0), Some(5.0)];
        let options = RenderConfig::default();
        let input = input(
            ChartKind::Boxplot,
            vec![NumericSeries { name: "v", values: &values }],
            &options,
        );
        let FigureBody::Boxes { boxes } = boxplot(&input).unwrap().body else {
            panic!("expected boxes");
        };
        assert_eq!(boxes[0].count, 7);
        assert_eq!(boxes[0].median, 3.0);
        assert_eq!(boxes[0].outliers, vec![-50.0, 90.0]);
        assert_eq!((boxes[0].whisker_low, boxes[0].whisker_high), (1.0, 5.0));
    }

    #[test]
    fn test_histogram_uses_configured_bins() {
        let values: Vec<Option<f64>> = (0..50).map(|v| Some(v as f64)).collect();
        let options = RenderConfig {
            histogram_bins: 10,
            density_points: 25,
        };
        let input = input(
            ChartKind::Histogram,
            vec![NumericSeries { name: "v", values: &values }],
            &options,
        );
        let figure = histogram(&input).unwrap();
        assert_eq!(figure.title, "Histogram of v");
        let FigureBody::Histogram { bins, density } = figure.body else {
            panic!("expected histogram");
        };
        assert_eq!(bins.len(), 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 50);
        assert_eq!(density.len(), 25);
        let peak = density.iter().map(|p| p.y).fold(0.0, f64::max);
        assert!(peak > 1.0 && peak < 10.0, "peak was {peak}");
    }

    #[test]
    fn test_violin_and_density_tolerate_constant_columns() {
        let flat = vec![Some(2.0), Some(2.0), Some(2.0)];
        let options = RenderConfig::default();
        let input = input(
            ChartKind::Violin,
            vec![NumericSeries { name: "flat", values: &flat }],
            &options,
        );
        let FigureBody::Violins { violins } = violin(&input).unwrap().body else {
            panic!("expected violins");
        };
        assert!(violins[0].curve.is_empty());
        assert_eq!(violins[0].quartiles.map(|q| q.median), Some(2.0));
        let FigureBody::Densities { curves } = density(&input).unwrap().body else {
            panic!("expected densities");
        };
        assert!(curves[0].points.is_empty());
    }
}
