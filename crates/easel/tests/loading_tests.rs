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

use easel::figure::FigureBody;
use easel::{describe, ChartKind, Easel, EaselConfig, EaselError, ScalarKind, TableError};
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_csv_to_figure() {
    let file = csv_file("region,revenue,units\neast,10.5,1\nwest,20.0,3\neast,30.25,2\n");
    let easel = Easel::default();
    let table = easel.load(file.path()).unwrap();
    assert_eq!(table.height(), 3);
    assert_eq!(table.column("region").unwrap().kind(), ScalarKind::Text);
    assert_eq!(table.column("units").unwrap().kind(), ScalarKind::Integer);

    let figure = easel.dispatch(&table, "Stacked Bar Chart").unwrap();
    assert_eq!(figure.chart, ChartKind::StackedBar);
    let FigureBody::StackedBars { categories, segments } = figure.body else {
        panic!("expected stacked bars");
    };
    assert_eq!(categories, vec!["east", "west"]);
    assert_eq!(segments[0].name, "revenue");
    assert_eq!(segments[0].values, vec![40.75, 20.0]);
    assert_eq!(segments[1].values, vec![3.0, 3.0]);
}

#[test]
fn test_summary_of_loaded_csv() {
    let file = csv_file("city,temp\nOslo,3\nRome,18\nOslo,5\n");
    let table = Easel::default().load(file.path()).unwrap();
    let text = describe(&table).unwrap().to_text();
    assert!(text.contains("city"));
    assert!(text.contains("Oslo"));
    assert!(text.lines().any(|l| l.starts_with("max") && l.trim_end().ends_with("18")));
}

#[test]
fn test_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let err = Easel::default().load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        EaselError::Table(TableError::UnsupportedFormat { ref format }) if format == "xlsx"
    ));
    assert!(err.user_message().contains("CSV"));
}

#[test]
fn test_config_file_drives_rendering() {
    let mut config_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(config_file, "render:\n  histogram_bins: 5\nadvisory:\n  enabled: false").unwrap();
    let easel = Easel::from_config_file(config_file.path()).unwrap();
    assert_eq!(easel.config().render.histogram_bins, 5);
    assert_ne!(easel.config(), &EaselConfig::default());

    let data = csv_file("v\n1\n2\n3\n4\n5\n6\n7\n");
    let table = easel.load(data.path()).unwrap();
    let FigureBody::Histogram { bins, .. } = easel.dispatch(&table, "Histogram").unwrap().body
    else {
        panic!("expected histogram");
    };
    assert_eq!(bins.len(), 5);
}
