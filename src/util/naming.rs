// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project naming helpers.
//!
//! Project identifiers are built from a sanitized human-provided name plus
//! a creation timestamp, so two projects created from the same title never
//! collide on disk.

use chrono::Local;

/// Maximum length of the sanitized name portion of a project id.
const MAX_NAME_LEN: usize = 50;

/// Sanitize a human-provided project name for use in a directory name.
///
/// Keeps letters, digits and underscores; runs of whitespace and hyphens
/// collapse to a single underscore; everything else is dropped. The result
/// is truncated to 50 characters.
pub fn sanitize_project_name(name: &str) -> String {
    let mut out = String::new();
    let mut in_separator = false;
    for c in name.chars() {
        if c.is_whitespace() || c == '-' {
            if !in_separator {
                out.push('_');
                in_separator = true;
            }
        } else if c.is_alphanumeric() || c == '_' {
            out.push(c);
            in_separator = false;
        }
        // anything else: dropped, does not break a separator run
    }
    out.chars().take(MAX_NAME_LEN).collect()
}

/// Current local time formatted as a project-id suffix (`YYYYMMDD_HHMMSS`).
pub fn timestamp_now() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}
