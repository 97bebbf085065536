// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crate configuration.
//!
//! Passed explicitly to [`crate::store::ArtifactStore::create`]; no global
//! state, and no directories are touched until a store is created.

use std::path::PathBuf;

/// Configuration for artifact storage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory under which every project directory is created.
    pub artifacts_root: PathBuf,
}

impl Config {
    /// Create a configuration with the given artifacts root.
    pub fn new(artifacts_root: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_root: artifacts_root.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifacts_root: PathBuf::from("output/artifacts"),
        }
    }
}
