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

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "easel",
    version,
    about = "Preview a dataset, get chart suggestions and render the chart you pick"
)]
pub struct Cli {
    #[arg(help = "CSV, Parquet or JSON file to load")]
    pub file: PathBuf,
    #[arg(long, short = 'c', help = "Chart to render, e.g. \"Bar\" or \"Scatter Plot\"")]
    pub chart: Option<String>,
    #[arg(long, short = 'o', help = "Write the figure JSON here instead of stdout")]
    pub out: Option<PathBuf>,
    #[arg(long, help = "YAML configuration file")]
    pub config: Option<PathBuf>,
    #[arg(long, default_value_t = 5, help = "Rows shown in the preview")]
    pub rows: usize,
    #[arg(long, action, help = "Skip the AI chart recommendations")]
    pub no_advisory: bool,
    #[arg(long, action, help = "List every chart and whether this dataset can draw it")]
    pub list: bool,
}
