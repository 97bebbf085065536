// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data structures for artifacts and workflow steps.

pub mod artifact;
pub mod workflow;
