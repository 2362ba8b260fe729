// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reading and writing result documents.
//!
//! Documents are persisted as JSON with 2-space indentation. Reading
//! goes through [`serde_json::Value`] because the chart renderer probes
//! foreign files for individual fields rather than requiring a
//! particular document shape.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Render a document as pretty-printed JSON.
pub fn to_pretty_json<T: Serialize>(document: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Persist a document to `path` as pretty-printed JSON.
pub fn write_document<T: Serialize>(document: &T, path: &Path) -> Result<()> {
    let json = to_pretty_json(document)?;
    fs::write(path, json).map_err(|source| Error::WriteDocument {
        path: path.to_path_buf(),
        source,
    })
}

/// Read an arbitrary result document back as loosely-typed JSON.
pub fn read_document(path: &Path) -> Result<serde_json::Value> {
    let content = fs::read_to_string(path).map_err(|source| Error::ReadDocument {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::ParseDocument {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ThroughputResult;
    use tempfile::TempDir;

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let result = ThroughputResult::from_counts(2, 20, 1.0);
        let json = to_pretty_json(&result).unwrap();
        assert!(json.starts_with("{\n  \"line_count\": 2"));
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("baseline.json");
        let result = ThroughputResult::from_counts(100, 20_000, 2.0);

        write_document(&result, &path).unwrap();
        let value = read_document(&path).unwrap();
        assert_eq!(value["line_count"], 100);
        assert_eq!(value["lines_per_second"], 50.0);
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = read_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_read_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(read_document(&path).is_err());
    }
}
