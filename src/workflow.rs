// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted workflow checklist for a project.
//!
//! A passive ledger over the fixed pipeline steps: it never invokes
//! processing itself. Driving logic (UI handlers, scripts) performs the
//! work, then records completion or failure here and asks
//! [`WorkflowState::next_step`] what to do next. Every mutation rewrites
//! the whole state file, so a project can be resumed after a restart.

use crate::error::Result;
use crate::io::serialization;
use crate::models::workflow::{StepStatus, WorkflowStep};
use crate::store::ArtifactStore;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

const STATE_FILE: &str = "workflow_state.json";

/// On-disk shape of `workflow_state.json`.
///
/// Steps are keyed by name when loading so that entries from older or
/// newer versions of the step set are tolerated and ignored.
#[derive(Debug, Serialize)]
struct StateDocument<'a> {
    steps: &'a BTreeMap<WorkflowStep, StepStatus>,
    updated: String,
}

#[derive(Debug, Deserialize)]
struct SavedStateDocument {
    #[serde(default)]
    steps: HashMap<String, StepStatus>,
}

/// Checklist of pipeline steps for one project.
#[derive(Debug)]
pub struct WorkflowState {
    state_path: PathBuf,
    steps: BTreeMap<WorkflowStep, StepStatus>,
}

impl WorkflowState {
    /// Bind a workflow state to the given store's project directory.
    ///
    /// All steps start enabled and incomplete. If a state file already
    /// exists in the project directory, its entries replace the defaults
    /// step-by-step; steps missing from the file keep the default and
    /// unknown step names are ignored.
    pub fn new(store: &ArtifactStore) -> Result<Self> {
        let state_path = store.project_dir().join(STATE_FILE);
        let mut steps: BTreeMap<WorkflowStep, StepStatus> = WorkflowStep::ALL
            .into_iter()
            .map(|step| (step, StepStatus::default()))
            .collect();

        if state_path.exists() {
            let saved: SavedStateDocument = serialization::read_json(&state_path)?;
            for (name, status) in saved.steps {
                if let Ok(step) = name.parse::<WorkflowStep>() {
                    steps.insert(step, status);
                }
            }
        }

        Ok(Self { state_path, steps })
    }

    /// Re-enable a step so `next_step` considers it again.
    pub fn enable(&mut self, step: WorkflowStep) -> Result<()> {
        let status = self.status_mut(step);
        status.enabled = true;
        status.skipped = false;
        self.save()
    }

    /// Disable a step; `next_step` skips over it.
    pub fn disable(&mut self, step: WorkflowStep) -> Result<()> {
        let status = self.status_mut(step);
        status.enabled = false;
        status.skipped = true;
        self.save()
    }

    /// Record that a step finished successfully, clearing any earlier error.
    pub fn mark_completed(&mut self, step: WorkflowStep) -> Result<()> {
        let status = self.status_mut(step);
        status.completed = true;
        status.error = None;
        log::debug!("workflow step {step} completed");
        self.save()
    }

    /// Record a failure message for a step.
    ///
    /// Deliberately does not clear `completed`: a step completed on an
    /// earlier run keeps that flag even if a retry later fails. The
    /// summary's display precedence decides what the user sees.
    pub fn mark_error(&mut self, step: WorkflowStep, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        log::debug!("workflow step {step} failed: {message}");
        self.status_mut(step).error = Some(message);
        self.save()
    }

    pub fn is_enabled(&self, step: WorkflowStep) -> bool {
        self.steps[&step].enabled
    }

    pub fn is_completed(&self, step: WorkflowStep) -> bool {
        self.steps[&step].completed
    }

    /// Full status flags for one step.
    pub fn status(&self, step: WorkflowStep) -> &StepStatus {
        &self.steps[&step]
    }

    /// First step in pipeline order that is enabled and not yet completed,
    /// or `None` when every enabled step is done.
    pub fn next_step(&self) -> Option<WorkflowStep> {
        WorkflowStep::ALL
            .into_iter()
            .find(|step| self.is_enabled(*step) && !self.is_completed(*step))
    }

    /// Clear `completed` and `error` on every step, preserving which steps
    /// are enabled or skipped.
    pub fn reset(&mut self) -> Result<()> {
        for status in self.steps.values_mut() {
            status.completed = false;
            status.error = None;
        }
        self.save()
    }

    /// Progress counts plus one status line per step.
    ///
    /// Display precedence per step: disabled, then completed, then error,
    /// then pending. A disabled step never shows as done or failed, and a
    /// completed step shows as done even if an error was recorded later.
    pub fn summary(&self) -> String {
        let completed = self.steps.values().filter(|s| s.completed).count();
        let enabled = self.steps.values().filter(|s| s.enabled).count();

        let mut lines = vec![
            format!("Workflow Progress: {completed}/{enabled} steps completed"),
            String::new(),
        ];

        for step in WorkflowStep::ALL {
            let status = &self.steps[&step];
            let (icon, text) = if !status.enabled {
                ("⊗", "Disabled".to_string())
            } else if status.completed {
                ("✓", "Completed".to_string())
            } else if let Some(error) = &status.error {
                ("✗", format!("Error: {error}"))
            } else {
                ("○", "Pending".to_string())
            };
            lines.push(format!("  {icon} {}: {text}", step.label()));
        }

        lines.join("\n")
    }

    fn status_mut(&mut self, step: WorkflowStep) -> &mut StepStatus {
        self.steps.entry(step).or_default()
    }

    fn save(&self) -> Result<()> {
        let document = StateDocument {
            steps: &self.steps,
            updated: Local::now().to_rfc3339(),
        };
        serialization::write_json(&self.state_path, &document)
    }
}
