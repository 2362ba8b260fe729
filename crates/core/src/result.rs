// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result document types.
//!
//! A result document is the persisted output of one measurement run,
//! created once at completion and immutable thereafter. The empty
//! latency run is a distinct type rather than a zero-filled
//! [`LatencyResult`], so callers cannot mistake "nothing measured" for
//! "measured zero".

use crate::stats;
use serde::{Deserialize, Serialize};

/// Marker carried in the `error` field of an [`EmptyResult`].
pub const EMPTY_RESULT_MARKER: &str = "No valid latency measurements";

/// Result document of a throughput run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputResult {
    /// Total lines read.
    pub line_count: u64,
    /// Total payload bytes read, excluding newline delimiters.
    pub byte_count: u64,
    /// Wall-clock seconds from first read attempt to loop termination.
    pub duration_seconds: f64,
    /// Lines per second over the whole run.
    pub lines_per_second: f64,
    /// Bytes per second over the whole run.
    pub bytes_per_second: f64,
    /// Megabytes per second over the whole run.
    pub megabytes_per_second: f64,
    /// Mean payload length in bytes.
    pub avg_line_length: f64,
}

impl ThroughputResult {
    /// Derive the final rates from raw counters.
    ///
    /// Every rate is guarded to 0 when the duration or the line count
    /// is 0, so an empty or instantaneous run yields a well-formed
    /// document.
    pub fn from_counts(line_count: u64, byte_count: u64, duration_seconds: f64) -> Self {
        let lines_per_second = if duration_seconds > 0.0 {
            line_count as f64 / duration_seconds
        } else {
            0.0
        };
        let bytes_per_second = if duration_seconds > 0.0 {
            byte_count as f64 / duration_seconds
        } else {
            0.0
        };
        let avg_line_length = if line_count > 0 {
            byte_count as f64 / line_count as f64
        } else {
            0.0
        };
        Self {
            line_count,
            byte_count,
            duration_seconds,
            lines_per_second,
            bytes_per_second,
            megabytes_per_second: bytes_per_second / 1024.0 / 1024.0,
            avg_line_length,
        }
    }
}

/// One statistics group of a latency result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (average of the two middle elements for even counts).
    pub median: f64,
    /// 95th percentile, nearest-rank.
    pub p95: f64,
    /// 99th percentile, nearest-rank.
    pub p99: f64,
    /// Sample standard deviation; 0 when fewer than two samples.
    pub stddev: f64,
}

impl LatencyStats {
    /// Compute the statistics group over an ascending-sorted,
    /// non-empty sample.
    pub fn from_sorted(sorted: &[f64]) -> Self {
        Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean: stats::mean(sorted),
            median: stats::median_sorted(sorted),
            p95: stats::percentile_sorted(sorted, 0.95),
            p99: stats::percentile_sorted(sorted, 0.99),
            stddev: stats::sample_stddev(sorted),
        }
    }

    /// Copy of this group with every statistic multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
            mean: self.mean * factor,
            median: self.median * factor,
            p95: self.p95 * factor,
            p99: self.p99 * factor,
            stddev: self.stddev * factor,
        }
    }
}

/// Result document of a latency run with at least one valid sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyResult {
    /// Total lines read, including unparseable ones.
    pub line_count: u64,
    /// Lines that parsed into a latency sample.
    pub valid_measurements: u64,
    /// Lines skipped because they failed to parse.
    pub error_count: u64,
    /// Statistics in seconds.
    pub latency_seconds: LatencyStats,
    /// The same statistics in milliseconds.
    pub latency_milliseconds: LatencyStats,
}

/// Result document of a latency run that produced no valid sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyResult {
    /// Human-readable marker distinguishing this from a statistics
    /// document.
    pub error: String,
    /// Total lines read.
    pub line_count: u64,
    /// Lines skipped because they failed to parse.
    pub error_count: u64,
}

impl EmptyResult {
    /// Build the empty-result document for the given counters.
    pub fn new(line_count: u64, error_count: u64) -> Self {
        Self {
            error: EMPTY_RESULT_MARKER.to_string(),
            line_count,
            error_count,
        }
    }
}

/// Outcome of one latency run: statistics, or the distinct empty case.
#[derive(Debug, Clone, PartialEq)]
pub enum LatencyOutcome {
    /// At least one line parsed; full statistics are available.
    Stats(LatencyResult),
    /// No line parsed; only the counters are available.
    Empty(EmptyResult),
}
