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

use crate::figure::{Bin, Point, Quartiles};
use polars::prelude::cov::pearson_corr;
use polars::prelude::*;
use std::collections::HashMap;
use std::f64::consts::PI;

const VARIANCE_EPSILON: f64 = 1e-12;
const VALUE: &str = "value";
const COUNT: &str = "count";

/// Missing entries become nulls, which every aggregation below skips.
pub fn float_column(name: &str, values: &[Option<f64>]) -> Float64Chunked {
    Float64Chunked::from_iter_options(name.into(), values.iter().copied())
}
pub fn present_count(ca: &Float64Chunked) -> usize {
    ca.len() - ca.null_count()
}
pub fn quantile(ca: &Float64Chunked, q: f64) -> Option<f64> {
    ca.quantile(q, QuantileMethod::Linear).ok().flatten()
}
pub fn quartiles(ca: &Float64Chunked) -> Option<Quartiles> {
    Some(Quartiles {
        q1: quantile(ca, 0.25)?,
        median: quantile(ca, 0.5)?,
        q3: quantile(ca, 0.75)?,
    })
}
/// Pearson correlation over the rows where both inputs are present.
pub fn pearson(xs: &Float64Chunked, ys: &Float64Chunked) -> Option<f64> {
    let both = &xs.is_not_null() & &ys.is_not_null();
    let xs = xs.filter(&both).ok()?;
    let ys = ys.filter(&both).ok()?;
    if xs.len() < 2 {
        return None;
    }
    let flat = |ca: &Float64Chunked| ca.var(1).map_or(true, |v| v <= VARIANCE_EPSILON);
    if flat(&xs) || flat(&ys) {
        return None;
    }
    pearson_corr(&xs, &ys)
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(-1.0, 1.0))
}
/// Equal-width bins; the last bin is closed on the right.
pub fn histogram(ca: &Float64Chunked, bins: usize) -> Vec<Bin> {
    let (Some(lo), Some(hi)) = (ca.min(), ca.max()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in ca.into_iter().flatten() {
        let index = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}
/// Scott's rule bandwidth, `σ · n^(-1/5)`.
pub fn scott_bandwidth(ca: &Float64Chunked) -> Option<f64> {
    let sigma = ca.std(1)?;
    if sigma <= VARIANCE_EPSILON {
        return None;
    }
    Some(sigma * (present_count(ca) as f64).powf(-0.2))
}
/// Gaussian kernel density estimate on `points` evenly spaced positions.
///
/// Columns with fewer than two values or no spread give an empty curve.
pub fn kde(ca: &Float64Chunked, points: usize) -> Vec<Point> {
    let Some(h) = scott_bandwidth(ca) else {
        return Vec::new();
    };
    let (Some(lo), Some(hi)) = (ca.min(), ca.max()) else {
        return Vec::new();
    };
    if points < 2 {
        return Vec::new();
    }
    let values: Vec<f64> = ca.into_iter().flatten().collect();
    let start = lo - 3.0 * h;
    let step = (hi - lo + 6.0 * h) / (points - 1) as f64;
    let norm = 1.0 / (values.len() as f64 * h * (2.0 * PI).sqrt());
    (0..points)
        .map(|i| {
            let x = start + step * i as f64;
            let y = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / h).powi(2)).exp())
                .sum::<f64>()
                * norm;
            Point { x, y }
        })
        .collect()
}
/// Present labels with their frequency, most frequent first.
///
/// Ties keep the order in which the labels first appear.
pub fn value_counts(values: &[Option<String>]) -> PolarsResult<Vec<(String, usize)>> {
    let series = Series::new(VALUE.into(), values).drop_nulls();
    let first_seen = series.unique_stable()?;
    let rank: HashMap<&str, usize> = first_seen
        .str()?
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(i, label)| (label, i))
        .collect();
    let counted = series.value_counts(true, false, COUNT.into(), false)?;
    let labels = counted.column(VALUE)?.as_materialized_series().str()?;
    let counts = counted
        .column(COUNT)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;
    let mut out: Vec<(String, usize)> = labels
        .into_iter()
        .zip(counts.u64()?)
        .filter_map(|(label, count)| Some((label?.to_string(), count? as usize)))
        .collect();
    out.sort_by_key(|(label, count)| {
        (
            std::cmp::Reverse(*count),
            rank.get(label.as_str()).copied().unwrap_or(usize::MAX),
        )
    });
    Ok(out)
}
