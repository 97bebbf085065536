// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: JSON persistence and ffmpeg glue.

pub mod media;
pub mod serialization;
