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

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use easel::{Advisory, DispatchFailure, Easel, EaselConfig, EaselError, Figure, Severity, Table};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn,hyper_util=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let args = Cli::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Cli) -> Result<ExitCode> {
    let easel = match &args.config {
        Some(path) => Easel::from_config_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Easel::new(EaselConfig::default())?,
    };
    let table = easel
        .load(&args.file)
        .map_err(explain)
        .with_context(|| format!("loading {}", args.file.display()))?;
    println!("Dataset Preview:");
    println!("{}\n", table.preview(args.rows));

    if !args.no_advisory {
        print_advisory(&easel, &table);
    }
    if args.list {
        print_eligibility(&easel, &table);
    }
    let Some(chart) = &args.chart else {
        return Ok(ExitCode::SUCCESS);
    };
    match easel.dispatch(&table, chart) {
        Ok(figure) => {
            write_figure(args, &figure)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            report_failure(&failure);
            Ok(ExitCode::from(2))
        }
    }
}

/// Puts the user-facing wording over the typed error, which stays the source.
fn explain(error: EaselError) -> anyhow::Error {
    let message = error.user_message();
    if message == error.to_string() {
        anyhow::Error::new(error)
    } else {
        anyhow::Error::new(error).context(message)
    }
}

fn print_advisory(easel: &Easel, table: &Table) {
    match easel.advise(table) {
        Advisory::Text(text) => {
            println!("AI Recommended Charts:");
            println!("{text}\n");
        }
        Advisory::Unavailable(notice) => {
            warn!("{notice}");
            eprintln!("Note: {notice}\n");
        }
    }
}

fn print_eligibility(easel: &Easel, table: &Table) {
    println!("Charts:");
    for entry in easel.eligible_charts(table) {
        match &entry.failure {
            None => println!("  [x] {}", entry.chart.label()),
            Some(failure) => println!("  [ ] {} ({failure})", entry.chart.label()),
        }
    }
    println!();
}

fn write_figure(args: &Cli, figure: &Figure) -> Result<()> {
    let json = figure.to_json().context("serialising figure")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("writing figure to {}", path.display()))?;
            info!(path = %path.display(), title = %figure.title, "figure written");
            println!("Wrote {} to {}", figure.title, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn report_failure(failure: &DispatchFailure) {
    match failure.severity() {
        Severity::Warning => eprintln!("Warning: {}", failure.user_message()),
        Severity::Error => eprintln!("Error: {}", failure.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel::TableError;

    #[test]
    fn test_explain_keeps_typed_source() {
        let err = explain(EaselError::from(TableError::UnsupportedFormat {
            format: "xlsx".to_string(),
        }));
        assert!(err.to_string().starts_with("Files of type 'xlsx'"));
        assert_eq!(
            err.chain().nth(1).map(|e| e.to_string()),
            Some("Table error: Unsupported data format: xlsx".to_string())
        );
        assert!(matches!(
            err.downcast_ref::<EaselError>(),
            Some(EaselError::Table(TableError::UnsupportedFormat { .. }))
        ));
    }

    #[test]
    fn test_explain_does_not_repeat_plain_messages() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err = explain(EaselError::from(io));
        assert_eq!(err.to_string(), "I/O error: missing.csv");
        assert!(err.downcast_ref::<EaselError>().is_some());
    }
}
