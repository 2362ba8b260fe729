// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! ASCII chart rendering for linebench.
//!
//! The renderer scans a directory of result documents, groups them by
//! filename convention, and renders comparative ASCII bar charts. Every
//! chart is derived fresh from the directory contents on each call, so
//! rendering an unchanged directory is byte-for-byte reproducible.
//!
//! # Modules
//!
//! - [`dataset`] - result-file discovery and filename parsing
//! - [`chart`] - bar-chart layout and number formatting
//! - [`render`] - the shipped chart passes and output routing

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod chart;
pub mod dataset;
pub mod render;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use render::{render_charts, write_charts, ChartKind, RenderedChart};

/// Errors that can occur while rendering charts.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The results directory does not exist.
    #[error("results directory not found: {}", .0.display())]
    MissingResultsDir(PathBuf),

    /// The results directory could not be scanned.
    #[error("failed to scan results directory {}: {source}", .path.display())]
    Scan {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A chart file could not be written.
    #[error("failed to write chart {}: {source}", .path.display())]
    WriteChart {
        /// Path of the chart file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Result type for chart rendering.
pub type Result<T> = std::result::Result<T, ChartError>;
