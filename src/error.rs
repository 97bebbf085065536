// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the artifact store and workflow tracker.
//!
//! Filesystem and serialization failures are wrapped transparently so
//! callers see the underlying error unmodified; the core performs no
//! retries and no rollback.

use thiserror::Error;

/// Errors produced by the store and workflow core.
#[derive(Debug, Error)]
pub enum Error {
    /// A kind name outside the fixed artifact enumeration.
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),

    /// A step name outside the fixed workflow enumeration.
    #[error("unknown workflow step: {0}")]
    UnknownStep(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
