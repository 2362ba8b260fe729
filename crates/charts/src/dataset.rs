// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result-file discovery and filename-convention parsing.
//!
//! A chart dataset is built fresh per invocation by scanning a results
//! directory for `*.json` documents. Files that do not match a pass's
//! naming convention, or that cannot be read or parsed, are skipped
//! silently; discovery never fails on individual files.

use crate::{ChartError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Filename stems ending in `_<N>b` denote a line-length bucket.
static LINE_LENGTH_STEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+_(\d+)b$").expect("static regex"));

/// Parsed form of one result filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    /// Filename without directory or `.json` extension.
    pub stem: String,
    /// Line length in bytes when the stem matches `<prefix>_<N>b`.
    pub line_length: Option<u64>,
    /// Scenario name when the stem contains `latency`, with the
    /// `_latency` suffix convention stripped.
    pub latency_scenario: Option<String>,
}

/// Parse a result filename against the naming conventions.
///
/// Returns `None` for anything that is not a `.json` file; the caller
/// skips it. A parsed name records which conventions the stem matched,
/// independent of the document's contents.
pub fn parse_file_name(path: &Path) -> Option<FileName> {
    if !path.extension().is_some_and(|ext| ext == "json") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?.to_string();

    let line_length = LINE_LENGTH_STEM
        .captures(&stem)
        .and_then(|captures| captures[1].parse().ok());
    let latency_scenario = stem
        .contains("latency")
        .then(|| stem.replace("_latency", ""));

    Some(FileName {
        stem,
        line_length,
        latency_scenario,
    })
}

/// A discovered result document together with its parsed filename.
pub type DiscoveredFile = (FileName, Value);

/// Scan a results directory for result documents.
///
/// Files are visited in ascending filename order so downstream charts
/// are deterministic. Unreadable or unparseable documents are skipped.
pub fn scan(results_dir: &Path) -> Result<Vec<DiscoveredFile>> {
    let entries = std::fs::read_dir(results_dir).map_err(|source| ChartError::Scan {
        path: results_dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ChartError::Scan {
            path: results_dir.to_path_buf(),
            source,
        })?;
        paths.push(entry.path());
    }
    paths.sort();

    let mut files = Vec::new();
    for path in paths {
        let Some(name) = parse_file_name(&path) else {
            continue;
        };
        match linebench_core::io::read_document(&path) {
            Ok(document) => files.push((name, document)),
            Err(err) => debug!("skipping unreadable result document: {err}"),
        }
    }
    Ok(files)
}

/// One row of the line-length sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLengthEntry {
    /// Line length in bytes.
    pub length: u64,
    /// Lines per second at that length.
    pub lines_per_second: f64,
    /// Megabytes per second at that length.
    pub megabytes_per_second: f64,
}

impl LineLengthEntry {
    /// Display label for this bucket, e.g. `50B`.
    pub fn label(&self) -> String {
        format!("{}B", self.length)
    }
}

fn numeric_field(document: &Value, field: &str) -> Option<f64> {
    document.get(field).and_then(Value::as_f64)
}

/// Throughput comparison dataset: every document exposing a
/// `lines_per_second` field contributes its filename stem and rate.
pub fn throughput_dataset(files: &[DiscoveredFile]) -> Vec<(String, f64)> {
    files
        .iter()
        .filter_map(|(name, document)| {
            let rate = numeric_field(document, "lines_per_second")?;
            Some((name.stem.clone(), rate))
        })
        .collect()
}

/// Line-length sweep dataset, ascending by length.
///
/// Only files whose stem matches the `<prefix>_<N>b` convention and
/// whose document exposes both rates contribute; when two files share
/// a bucket, the later filename wins.
pub fn line_length_dataset(files: &[DiscoveredFile]) -> Vec<LineLengthEntry> {
    let mut buckets: BTreeMap<u64, (f64, f64)> = BTreeMap::new();
    for (name, document) in files {
        let Some(length) = name.line_length else {
            continue;
        };
        let Some(lines_per_second) = numeric_field(document, "lines_per_second") else {
            continue;
        };
        let Some(megabytes_per_second) = numeric_field(document, "megabytes_per_second") else {
            continue;
        };
        buckets.insert(length, (lines_per_second, megabytes_per_second));
    }
    buckets
        .into_iter()
        .map(|(length, (lines_per_second, megabytes_per_second))| LineLengthEntry {
            length,
            lines_per_second,
            megabytes_per_second,
        })
        .collect()
}

/// Latency comparison dataset: scenario name to p95 milliseconds.
pub fn latency_dataset(files: &[DiscoveredFile]) -> Vec<(String, f64)> {
    files
        .iter()
        .filter_map(|(name, document)| {
            let scenario = name.latency_scenario.clone()?;
            let p95 = document
                .get("latency_milliseconds")
                .and_then(|group| group.get("p95"))
                .and_then(Value::as_f64)?;
            Some((scenario, p95))
        })
        .collect()
}
