// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! The shipped chart passes and output routing.
//!
//! Three independent passes run over one directory scan: a throughput
//! comparison, a line-length sweep and a latency comparison. A pass
//! with no matching documents renders a human-readable placeholder
//! rather than failing, so partially-populated results directories are
//! fine.

use crate::chart::{self, format_value};
use crate::dataset::{self, DiscoveredFile};
use crate::{ChartError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Target total width of every shipped chart.
pub const CHART_WIDTH: usize = 70;

/// Bar width of the line-length sweep rows.
const SWEEP_BAR_WIDTH: usize = 40;

/// The shipped chart passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Lines-per-second comparison across all scenarios.
    Throughput,
    /// Throughput as a function of generated line length.
    LineLength,
    /// P95 latency comparison across scenarios.
    Latency,
}

impl ChartKind {
    /// All passes, in rendering order.
    pub fn all() -> Vec<ChartKind> {
        vec![
            ChartKind::Throughput,
            ChartKind::LineLength,
            ChartKind::Latency,
        ]
    }

    /// Filename used when the chart is written to an output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::Throughput => "throughput_comparison.txt",
            ChartKind::LineLength => "throughput_by_line_length.txt",
            ChartKind::Latency => "latency_comparison.txt",
        }
    }
}

/// One rendered chart, ready to print or persist.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    /// Which pass produced this chart.
    pub kind: ChartKind,
    /// The chart text, without a trailing newline.
    pub text: String,
}

/// Render the requested charts from a directory of result documents.
///
/// The directory is scanned once and each requested pass runs over the
/// same discovery. Fails only on environment errors; missing or
/// malformed documents never do.
pub fn render_charts(results_dir: &Path, kinds: &[ChartKind]) -> Result<Vec<RenderedChart>> {
    if !results_dir.is_dir() {
        return Err(ChartError::MissingResultsDir(results_dir.to_path_buf()));
    }
    let files = dataset::scan(results_dir)?;

    Ok(kinds
        .iter()
        .map(|kind| RenderedChart {
            kind: *kind,
            text: match kind {
                ChartKind::Throughput => throughput_chart(&files),
                ChartKind::LineLength => line_length_chart(&files),
                ChartKind::Latency => latency_chart(&files),
            },
        })
        .collect())
}

/// Write each chart to its own file under `output_dir`, creating the
/// directory if needed. Returns the written paths in chart order.
pub fn write_charts(charts: &[RenderedChart], output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|source| ChartError::WriteChart {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(charts.len());
    for chart in charts {
        let path = output_dir.join(chart.kind.file_name());
        fs::write(&path, &chart.text).map_err(|source| ChartError::WriteChart {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Throughput comparison across every document with a line rate.
pub fn throughput_chart(files: &[DiscoveredFile]) -> String {
    chart::horizontal_bar_chart(
        &dataset::throughput_dataset(files),
        "Throughput Comparison",
        " lines/s",
        CHART_WIDTH,
    )
}

/// Throughput against generated line length, ascending by length.
///
/// Uses a fixed bar width and annotates each row with the matching
/// megabyte rate, since the two rates rank buckets differently.
pub fn line_length_chart(files: &[DiscoveredFile]) -> String {
    let entries = dataset::line_length_dataset(files);
    if entries.is_empty() {
        return "No line length data found".to_string();
    }

    let max_rate = entries
        .iter()
        .map(|entry| entry.lines_per_second)
        .fold(0.0, f64::max);

    let mut lines = vec![
        "Throughput vs Line Length".to_string(),
        "─".repeat(CHART_WIDTH),
    ];
    for entry in &entries {
        let rate = format_value(entry.lines_per_second, " lines/s");
        lines.push(format!(
            "{label:>6} {bar} {rate:>15} ({mb:.1} MB/s)",
            label = entry.label(),
            bar = chart::bar(entry.lines_per_second, max_rate, SWEEP_BAR_WIDTH),
            mb = entry.megabytes_per_second,
        ));
    }
    lines.join("\n")
}

/// P95 latency comparison across latency-named documents.
pub fn latency_chart(files: &[DiscoveredFile]) -> String {
    let data = dataset::latency_dataset(files);
    if data.is_empty() {
        return "No latency data found".to_string();
    }
    chart::horizontal_bar_chart(&data, "Latency Comparison (P95)", " ms", CHART_WIDTH)
}
