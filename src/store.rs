// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project-scoped artifact store.
//!
//! Owns one project directory and a manifest recording which artifact
//! kinds currently have a materialized file. The store never invokes any
//! processing itself; callers run external tools and hand the finished
//! files to [`ArtifactStore::put`].
//!
//! One file per kind: a repeated `put` for the same kind overwrites the
//! previous file (last write wins, no versioning). The manifest is
//! rewritten in full on every mutation. There is no internal locking;
//! callers must serialize access to a given project's store.

use crate::config::Config;
use crate::error::Result;
use crate::io::serialization;
use crate::models::artifact::{ArtifactCategory, ArtifactInfo, ArtifactKind, Manifest};
use crate::util::naming;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Durable record of "what intermediate files exist for this project".
#[derive(Debug)]
pub struct ArtifactStore {
    project_name: String,
    project_id: String,
    created: String,
    project_dir: PathBuf,
    manifest_path: PathBuf,
    artifacts: BTreeMap<ArtifactKind, Option<PathBuf>>,
}

impl ArtifactStore {
    /// Create a new project under `config.artifacts_root`.
    ///
    /// The human-provided name is sanitized and suffixed with a creation
    /// timestamp to form the project id, so repeated imports of the same
    /// title get distinct directories. Creates the six fixed
    /// subdirectories (pre-existing ones are fine) and writes the initial
    /// manifest with every kind absent.
    pub fn create(project_name: &str, config: &Config) -> Result<Self> {
        let sanitized = naming::sanitize_project_name(project_name);
        let created = naming::timestamp_now();
        let project_id = format!("{sanitized}_{created}");
        let project_dir = config.artifacts_root.join(&project_id);

        Self::create_layout(&project_dir)?;

        let store = Self {
            project_name: sanitized,
            project_id,
            created,
            manifest_path: project_dir.join("manifest.json"),
            project_dir,
            artifacts: ArtifactKind::ALL.into_iter().map(|k| (k, None)).collect(),
        };
        store.write_manifest()?;

        log::info!("created project {}", store.project_id);
        Ok(store)
    }

    /// Store a file as the current artifact for `kind`.
    ///
    /// Copies the file into the kind's subdirectory as
    /// `{kind}{original_suffix}` (the source's base name is deliberately
    /// discarded: one file per kind). The source is left in place. Any
    /// previous file for the kind at that destination is overwritten.
    /// Optional metadata is written as `{kind}_metadata.json` in the
    /// metadata directory; if that write fails after the copy, the path
    /// record is already updated (accepted inconsistency window).
    ///
    /// Returns the destination path.
    pub fn put(
        &mut self,
        kind: ArtifactKind,
        source: &Path,
        metadata: Option<&serde_json::Value>,
    ) -> Result<PathBuf> {
        let mut destination = self.category_dir(kind.category()).join(kind.name());
        if let Some(suffix) = source.extension() {
            destination.set_extension(suffix);
        }

        fs::copy(source, &destination)?;
        self.artifacts.insert(kind, Some(destination.clone()));

        if let Some(metadata) = metadata {
            let metadata_path = self
                .category_dir(ArtifactCategory::Metadata)
                .join(format!("{}_metadata.json", kind.name()));
            serialization::write_json(&metadata_path, metadata)?;
        }

        self.write_manifest()?;
        log::debug!("stored {} at {}", kind, destination.display());
        Ok(destination)
    }

    /// Path of the current file for `kind`, if one exists on disk right now.
    ///
    /// A recorded path whose backing file was deleted out-of-band reads as
    /// absent; the record itself is not mutated.
    pub fn get(&self, kind: ArtifactKind) -> Option<PathBuf> {
        match self.artifacts.get(&kind) {
            Some(Some(path)) if path.exists() => Some(path.clone()),
            _ => None,
        }
    }

    /// Whether `kind` currently has a materialized file.
    pub fn has(&self, kind: ArtifactKind) -> bool {
        self.get(kind).is_some()
    }

    /// All present artifacts, in kind enumeration order.
    ///
    /// Size and creation time are read live from the filesystem; kinds
    /// whose backing file disappeared are omitted.
    pub fn list(&self) -> Vec<ArtifactInfo> {
        let mut infos = Vec::new();
        for (kind, path) in &self.artifacts {
            let Some(path) = path else { continue };
            let Ok(meta) = fs::metadata(path) else { continue };
            let created = meta
                .created()
                .or_else(|_| meta.modified())
                .ok()
                .map(DateTime::<Local>::from);
            infos.push(ArtifactInfo {
                kind: *kind,
                display_name: kind.display_name(),
                path: path.clone(),
                size: meta.len(),
                created,
            });
        }
        infos
    }

    /// Remove the artifact for `kind`, returning whether anything was
    /// deleted.
    ///
    /// A file that disappears between the presence check and the unlink is
    /// treated as already gone; any other unlink failure propagates.
    pub fn delete(&mut self, kind: ArtifactKind) -> Result<bool> {
        let Some(path) = self.get(kind) else {
            return Ok(false);
        };
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.artifacts.insert(kind, None);
        self.write_manifest()?;
        log::debug!("deleted {}", kind);
        Ok(true)
    }

    /// Human-readable project summary with one line per present artifact.
    pub fn export_summary(&self) -> String {
        let mut lines = vec![
            format!("Project: {}", self.project_name),
            format!("ID: {}", self.project_id),
            format!("Location: {}", self.project_dir.display()),
            String::new(),
            "Artifacts:".to_string(),
        ];

        let artifacts = self.list();
        if artifacts.is_empty() {
            lines.push("  (no artifacts yet)".to_string());
        } else {
            for artifact in artifacts {
                let size_mb = artifact.size as f64 / (1024.0 * 1024.0);
                lines.push(format!("  ✓ {}: {:.2} MB", artifact.display_name, size_mb));
            }
        }

        lines.join("\n")
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Create the six fixed subdirectories; pre-existing ones are fine.
    fn create_layout(project_dir: &Path) -> Result<()> {
        for category in ArtifactCategory::ALL {
            fs::create_dir_all(project_dir.join(category.dir_name()))?;
        }
        Ok(())
    }

    fn category_dir(&self, category: ArtifactCategory) -> PathBuf {
        self.project_dir.join(category.dir_name())
    }

    fn write_manifest(&self) -> Result<()> {
        let manifest = Manifest {
            project_name: self.project_name.clone(),
            project_id: self.project_id.clone(),
            created: self.created.clone(),
            updated: Local::now().to_rfc3339(),
            artifacts: self.artifacts.clone(),
        };
        serialization::write_json(&self.manifest_path, &manifest)
    }
}
