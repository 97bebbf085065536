// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VIDFORGE - Video Forge
//!
//! The orchestration core of a desktop video-publishing assistant: a
//! project-scoped artifact store plus a resumable workflow-state tracker.
//! External processing (transcoding, transcription, title/thumbnail
//! generation, upload) happens outside this crate; callers hand finished
//! files to the [`store::ArtifactStore`] and record progress in the
//! [`workflow::WorkflowState`].

pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod store;
pub mod util;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
pub use models::artifact::{ArtifactCategory, ArtifactInfo, ArtifactKind, Manifest};
pub use models::workflow::{StepStatus, WorkflowStep};
pub use store::ArtifactStore;
pub use workflow::WorkflowState;
