// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for result document I/O.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing result documents.
#[derive(Debug, Error)]
pub enum Error {
    /// A result document could not be read from disk.
    #[error("failed to read result document {}: {source}", .path.display())]
    ReadDocument {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A result document could not be written to disk.
    #[error("failed to write result document {}: {source}", .path.display())]
    WriteDocument {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A result document did not contain valid JSON.
    #[error("failed to parse result document {}: {source}", .path.display())]
    ParseDocument {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A result document could not be serialized.
    #[error("failed to encode result document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for result document I/O.
pub type Result<T> = std::result::Result<T, Error>;
