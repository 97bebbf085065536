// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! JSON persistence helpers.
//!
//! Every persisted document (manifest, workflow state, per-artifact
//! metadata) is pretty-printed JSON written in full on each save. There is
//! no temp-file dance and no lock; the writer of a project directory is
//! expected to be its only writer.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Serialize a value to pretty-printed JSON at `path`, replacing any
/// previous contents.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Deserialize a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&json)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let doc = Doc {
            name: "clip".to_string(),
            count: 3,
        };

        write_json(&path, &doc).unwrap();
        let loaded: Doc = read_json(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn write_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        write_json(&path, &Doc { name: "a".into(), count: 1 }).unwrap();
        write_json(&path, &Doc { name: "b".into(), count: 2 }).unwrap();

        let loaded: Doc = read_json(&path).unwrap();
        assert_eq!(loaded.name, "b");
        assert_eq!(loaded.count, 2);
    }

    #[test]
    fn read_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Doc> = read_json(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }
}
