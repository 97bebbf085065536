// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Workflow step enumeration and per-step status.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed, ordered stages of the publishing pipeline.
///
/// Declaration order is the execution order scanned by
/// [`crate::workflow::WorkflowState::next_step`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    ImportVideo,
    EditTrim,
    Transcribe,
    CleanAudio,
    GenerateTitles,
    CreateThumbnail,
    Preview,
    UploadYoutube,
}

impl WorkflowStep {
    /// All steps, in pipeline order.
    pub const ALL: [WorkflowStep; 8] = [
        WorkflowStep::ImportVideo,
        WorkflowStep::EditTrim,
        WorkflowStep::Transcribe,
        WorkflowStep::CleanAudio,
        WorkflowStep::GenerateTitles,
        WorkflowStep::CreateThumbnail,
        WorkflowStep::Preview,
        WorkflowStep::UploadYoutube,
    ];

    /// Stable snake_case name, used as the key in `workflow_state.json`.
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowStep::ImportVideo => "import_video",
            WorkflowStep::EditTrim => "edit_trim",
            WorkflowStep::Transcribe => "transcribe",
            WorkflowStep::CleanAudio => "clean_audio",
            WorkflowStep::GenerateTitles => "generate_titles",
            WorkflowStep::CreateThumbnail => "create_thumbnail",
            WorkflowStep::Preview => "preview",
            WorkflowStep::UploadYoutube => "upload_youtube",
        }
    }

    /// Human-readable label for summaries and UI display.
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowStep::ImportVideo => "Import Video",
            WorkflowStep::EditTrim => "Edit Trim",
            WorkflowStep::Transcribe => "Transcribe",
            WorkflowStep::CleanAudio => "Clean Audio",
            WorkflowStep::GenerateTitles => "Generate Titles",
            WorkflowStep::CreateThumbnail => "Create Thumbnail",
            WorkflowStep::Preview => "Preview",
            WorkflowStep::UploadYoutube => "Upload Youtube",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkflowStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.name() == s)
            .ok_or_else(|| Error::UnknownStep(s.to_string()))
    }
}

/// Status flags for one workflow step.
///
/// `skipped` is mechanically the negation of `enabled`; it is kept as a
/// separate explicit field because the persisted file and display layers
/// treat it as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub enabled: bool,
    pub completed: bool,
    pub skipped: bool,
    pub error: Option<String>,
}

impl Default for StepStatus {
    fn default() -> Self {
        Self {
            enabled: true,
            completed: false,
            skipped: false,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_starts_with_import_and_ends_with_upload() {
        assert_eq!(WorkflowStep::ALL[0], WorkflowStep::ImportVideo);
        assert_eq!(WorkflowStep::ALL[7], WorkflowStep::UploadYoutube);
    }

    #[test]
    fn parses_every_canonical_name() {
        for step in WorkflowStep::ALL {
            assert_eq!(step.name().parse::<WorkflowStep>().unwrap(), step);
        }
    }

    #[test]
    fn rejects_unknown_step_name() {
        let err = "color_grade".parse::<WorkflowStep>().unwrap_err();
        assert!(matches!(err, Error::UnknownStep(_)));
    }

    #[test]
    fn default_status_is_enabled_and_pending() {
        let status = StepStatus::default();
        assert!(status.enabled);
        assert!(!status.completed);
        assert!(!status.skipped);
        assert!(status.error.is_none());
    }
}
