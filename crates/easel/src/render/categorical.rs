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

use super::{distinct_in_order, CategoricalSeries, NumericSeries, RenderInput};
use crate::error::DispatchFailure;
use crate::figure::{Bar, Figure, FigureBody, Segment, Slice, SwarmGroup};
use crate::stats;
use polars::prelude::*;
use std::collections::HashMap;

/// The category column beside each numerical column, under their own names.
fn frame(category: &CategoricalSeries<'_>, numerical: &[NumericSeries<'_>]) -> PolarsResult<DataFrame> {
    let mut columns = vec![Series::new(category.name.into(), category.values).into_column()];
    columns.extend(
        numerical
            .iter()
            .map(|series| stats::float_column(series.name, series.values).into_series().into_column()),
    );
    DataFrame::new(columns)
}
fn group_means(category: &CategoricalSeries<'_>, numeric: &NumericSeries<'_>) -> PolarsResult<Vec<Bar>> {
    let grouped = frame(category, &[*numeric])?
        .lazy()
        .filter(col(category.name).is_not_null())
        .group_by_stable([col(category.name)])
        .agg([col(numeric.name).mean()])
        .collect()?;
    let labels = grouped.column(category.name)?.as_materialized_series().str()?;
    let means = grouped.column(numeric.name)?.as_materialized_series().f64()?;
    Ok(labels
        .into_iter()
        .zip(means)
        .filter_map(|(label, value)| {
            Some(Bar {
                category: label?.to_string(),
                value,
            })
        })
        .collect())
}
fn group_sums(
    category: &CategoricalSeries<'_>,
    numerical: &[NumericSeries<'_>],
) -> PolarsResult<(Vec<String>, Vec<Segment>)> {
    let sums: Vec<Expr> = numerical.iter().map(|series| col(series.name).sum()).collect();
    let grouped = frame(category, numerical)?
        .lazy()
        .filter(col(category.name).is_not_null())
        .group_by([col(category.name)])
        .agg(sums)
        .sort_by_exprs([col(category.name)], SortMultipleOptions::default())
        .collect()?;
    let categories = grouped
        .column(category.name)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    let segments = numerical
        .iter()
        .map(|series| {
            let summed = grouped
                .column(series.name)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            Ok(Segment {
                name: series.name.to_string(),
                values: summed.f64()?.into_iter().map(Option::unwrap_or_default).collect(),
            })
        })
        .collect::<PolarsResult<Vec<_>>>()?;
    Ok((categories, segments))
}
/// Mean of the first numerical column per category, in first-appearance order.
pub fn bar(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    let category = input.category(0)?;
    let numeric = input.numeric(0)?;
    let bars = group_means(&category, &numeric).map_err(|e| input.aggregation_failed(&e))?;
    Ok(Figure::new(
        input.chart(),
        format!("Bar Chart: {} vs {}", category.name, numeric.name),
        FigureBody::Bars { bars },
    )
    .with_axes(category.name, numeric.name))
}
/// Per-category sums of every numerical column, categories sorted.
pub fn stacked_bar(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    let category = input.category(0)?;
    let (categories, segments) =
        group_sums(&category, input.numerical()).map_err(|e| input.aggregation_failed(&e))?;
    Ok(Figure::new(
        input.chart(),
        format!("Stacked Bar Chart: {}", category.name),
        FigureBody::StackedBars {
            categories,
            segments,
        },
    )
    .with_axes(category.name, "Sum"))
}
pub fn swarmplot(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    let category = input.category(0)?;
    let numeric = input.numeric(0)?;
    let mut groups: Vec<SwarmGroup> = distinct_in_order(category.values)
        .into_iter()
        .map(|label| SwarmGroup {
            category: label.to_string(),
            values: Vec::new(),
        })
        .collect();
    let slots: HashMap<String, usize> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| (g.category.clone(), i))
        .collect();
    for (label, value) in category.values.iter().zip(numeric.values) {
        if let (Some(label), Some(value)) = (label, value) {
            if let Some(&slot) = slots.get(label) {
                groups[slot].values.push(*value);
            }
        }
    }
    Ok(Figure::new(
        input.chart(),
        format!("Swarmplot: {} vs {}", category.name, numeric.name),
        FigureBody::Swarm { groups },
    )
    .with_axes(category.name, numeric.name))
}
/// Value counts of the first categorical column, largest first.
pub fn pie(input: &RenderInput<'_>) -> Result<Figure, DispatchFailure> {
    let category = input.category(0)?;
    let counts =
        stats::value_counts(category.values).map_err(|e| input.aggregation_failed(&e))?;
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    let slices = counts
        .into_iter()
        .map(|(label, count)| Slice {
            label,
            count,
            share: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect();
    Ok(Figure::new(
        input.chart(),
        format!("Pie Chart: {}", category.name),
        FigureBody::Pie { slices },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ChartKind;
    use crate::config::RenderConfig;
    use crate::render::{CategoricalSeries, NumericSeries};

    fn labels(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn test_bar_means_in_first_appearance_order() {
        let region = labels(&["west", "east", "west"]);
        let revenue = vec![Some(10.0), Some(20.0), Some(30.0)];
        let options = RenderConfig::default();
        let input = RenderInput::new(
            ChartKind::Bar,
            vec![NumericSeries { name: "revenue", values: &revenue }],
            vec![CategoricalSeries { name: "region", values: &region }],
            &options,
        );
        let figure = bar(&input).unwrap();
        assert_eq!(figure.title, "Bar Chart: region vs revenue");
        let FigureBody::Bars { bars } = figure.body else {
            panic!("expected bars");
        };
        assert_eq!(bars[0].category, "west");
        assert_eq!(bars[0].value, Some(20.0));
        assert_eq!(bars[1].category, "east");
        assert_eq!(bars[1].value, Some(20.0));
    }

    #[test]
    fn test_bar_category_without_values() {
        let region = labels(&["east", "west"]);
        let revenue = vec![Some(5.0), None];
        let options = RenderConfig::default();
        let input = RenderInput::new(
            ChartKind::Bar,
            vec![NumericSeries { name: "revenue", values: &revenue }],
            vec![CategoricalSeries { name: "region", values: &region }],
            &options,
        );
        let FigureBody::Bars { bars } = bar(&input).unwrap().body else {
            panic!("expected bars");
        };
        assert_eq!(bars[1].value, None);
    }

    #[test]
    fn test_stacked_bar_sums_sorted_groups() {
        let region = labels(&["west", "east", "west"]);
        let a = vec![Some(1.0), Some(2.0), Some(3.0)];
        let b = vec![Some(10.0), None, Some(30.0)];
        let options = RenderConfig::default();
        let input = RenderInput::new(
            ChartKind::StackedBar,
            vec![
                NumericSeries { name: "a", values: &a },
                NumericSeries { name: "b", values: &b },
            ],
            vec![CategoricalSeries { name: "region", values: &region }],
            &options,
        );
        let FigureBody::StackedBars { categories, segments } = stacked_bar(&input).unwrap().body
        else {
            panic!("expected stacked bars");
        };
        assert_eq!(categories, vec!["east", "west"]);
        assert_eq!(segments[0].values, vec![2.0, 4.0]);
        assert_eq!(segments[1].values, vec![0.0, 40.0]);
    }

    #[test]
    fn test_rows_without_category_are_left_out() {
        let region = vec![Some("north".to_string()), None, Some("north".to_string())];
        let revenue = vec![Some(4.0), Some(100.0), Some(8.0)];
        let options = RenderConfig::default();
        let bar_input = RenderInput::new(
            ChartKind::Bar,
            vec![NumericSeries { name: "revenue", values: &revenue }],
            vec![CategoricalSeries { name: "region", values: &region }],
            &options,
        );
        let FigureBody::Bars { bars } = bar(&bar_input).unwrap().body else {
            panic!("expected bars");
        };
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].value, Some(6.0));
        let stacked_input = RenderInput::new(
            ChartKind::StackedBar,
            vec![NumericSeries { name: "revenue", values: &revenue }],
            vec![CategoricalSeries { name: "region", values: &region }],
            &options,
        );
        let FigureBody::StackedBars { categories, segments } =
            stacked_bar(&stacked_input).unwrap().body
        else {
            panic!("expected stacked bars");
        };
        assert_eq!(categories, vec!["north"]);
        assert_eq!(segments[0].values, vec![12.0]);
    }

    #[test]
    fn test_swarm_groups_values() {
        let region = vec![Some("a".to_string()), None, Some("b".to_string()), Some("a".to_string())];
        let value = vec![Some(1.0), Some(2.0), Some(3.0), None];
        let options = RenderConfig::default();
        let input = RenderInput::new(
            ChartKind::Swarmplot,
            vec![NumericSeries { name: "value", values: &value }],
            vec![CategoricalSeries { name: "region", values: &region }],
            &options,
        );
        let FigureBody::Swarm { groups } = swarmplot(&input).unwrap().body else {
            panic!("expected swarm");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].values, vec![1.0]);
        assert_eq!(groups[1].values, vec![3.0]);
    }

    #[test]
    fn test_pie_counts_descending() {
        let fruit = labels(&["pear", "apple", "apple", "fig", "pear", "apple"]);
        let options = RenderConfig::default();
        let input = RenderInput::new(
            ChartKind::Pie,
            vec![],
            vec![CategoricalSeries { name: "fruit", values: &fruit }],
            &options,
        );
        let figure = pie(&input).unwrap();
        assert_eq!(figure.title, "Pie Chart: fruit");
        let FigureBody::Pie { slices } = figure.body else {
            panic!("expected pie");
        };
        let order: Vec<(&str, usize)> = slices.iter().map(|s| (s.label.as_str(), s.count)).collect();
        assert_eq!(order, vec![("apple", 3), ("pear", 2), ("fig", 1)]);
        assert!((slices[0].share - 50.0).abs() < 1e-9);
        assert!((slices.iter().map(|s| s.share).sum::<f64>() - 100.0).abs() < 1e-9);
    }
}
