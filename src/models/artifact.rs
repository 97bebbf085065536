// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Artifact taxonomy and manifest data structures.
//!
//! Every intermediate file a project produces belongs to exactly one
//! [`ArtifactKind`], and every kind resolves to exactly one project
//! subdirectory via [`ArtifactKind::category`].

use crate::error::Error;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The fixed set of artifact kinds a project can hold.
///
/// Declaration order is the canonical enumeration order: it drives the
/// ordering of [`crate::store::ArtifactStore::list`] and of manifest maps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    OriginalVideo,
    IntroVideo,
    OutroVideo,
    MergedVideo,
    VideoNoAudio,
    OriginalAudio,
    CleanedAudio,
    AuphonicAudio,
    FinalAudio,
    RawTranscription,
    FixedTranscription,
    Timecodes,
    KeyMoments,
    TitlesList,
    TitlesCritique,
    SelectedTitle,
    #[serde(rename = "thumbnail_1")]
    Thumbnail1,
    #[serde(rename = "thumbnail_2")]
    Thumbnail2,
    #[serde(rename = "thumbnail_3")]
    Thumbnail3,
    #[serde(rename = "thumbnail_4")]
    Thumbnail4,
    SelectedThumbnail,
    FinalVideo,
    YoutubeMetadata,
}

impl ArtifactKind {
    /// All kinds, in enumeration order.
    pub const ALL: [ArtifactKind; 23] = [
        ArtifactKind::OriginalVideo,
        ArtifactKind::IntroVideo,
        ArtifactKind::OutroVideo,
        ArtifactKind::MergedVideo,
        ArtifactKind::VideoNoAudio,
        ArtifactKind::OriginalAudio,
        ArtifactKind::CleanedAudio,
        ArtifactKind::AuphonicAudio,
        ArtifactKind::FinalAudio,
        ArtifactKind::RawTranscription,
        ArtifactKind::FixedTranscription,
        ArtifactKind::Timecodes,
        ArtifactKind::KeyMoments,
        ArtifactKind::TitlesList,
        ArtifactKind::TitlesCritique,
        ArtifactKind::SelectedTitle,
        ArtifactKind::Thumbnail1,
        ArtifactKind::Thumbnail2,
        ArtifactKind::Thumbnail3,
        ArtifactKind::Thumbnail4,
        ArtifactKind::SelectedThumbnail,
        ArtifactKind::FinalVideo,
        ArtifactKind::YoutubeMetadata,
    ];

    /// Stable snake_case name, used in filenames and manifest keys.
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::OriginalVideo => "original_video",
            ArtifactKind::IntroVideo => "intro_video",
            ArtifactKind::OutroVideo => "outro_video",
            ArtifactKind::MergedVideo => "merged_video",
            ArtifactKind::VideoNoAudio => "video_no_audio",
            ArtifactKind::OriginalAudio => "original_audio",
            ArtifactKind::CleanedAudio => "cleaned_audio",
            ArtifactKind::AuphonicAudio => "auphonic_audio",
            ArtifactKind::FinalAudio => "final_audio",
            ArtifactKind::RawTranscription => "raw_transcription",
            ArtifactKind::FixedTranscription => "fixed_transcription",
            ArtifactKind::Timecodes => "timecodes",
            ArtifactKind::KeyMoments => "key_moments",
            ArtifactKind::TitlesList => "titles_list",
            ArtifactKind::TitlesCritique => "titles_critique",
            ArtifactKind::SelectedTitle => "selected_title",
            ArtifactKind::Thumbnail1 => "thumbnail_1",
            ArtifactKind::Thumbnail2 => "thumbnail_2",
            ArtifactKind::Thumbnail3 => "thumbnail_3",
            ArtifactKind::Thumbnail4 => "thumbnail_4",
            ArtifactKind::SelectedThumbnail => "selected_thumbnail",
            ArtifactKind::FinalVideo => "final_video",
            ArtifactKind::YoutubeMetadata => "youtube_metadata",
        }
    }

    /// Human-readable label for display in listings and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactKind::OriginalVideo => "Original video",
            ArtifactKind::IntroVideo => "Intro video",
            ArtifactKind::OutroVideo => "Outro video",
            ArtifactKind::MergedVideo => "Merged video",
            ArtifactKind::VideoNoAudio => "Video without audio",
            ArtifactKind::OriginalAudio => "Original audio",
            ArtifactKind::CleanedAudio => "Cleaned audio (AI)",
            ArtifactKind::AuphonicAudio => "Processed audio (Auphonic)",
            ArtifactKind::FinalAudio => "Final audio",
            ArtifactKind::RawTranscription => "Raw transcription",
            ArtifactKind::FixedTranscription => "Fixed transcription",
            ArtifactKind::Timecodes => "Timecodes",
            ArtifactKind::KeyMoments => "Key moments",
            ArtifactKind::TitlesList => "Title candidates",
            ArtifactKind::TitlesCritique => "Title critique",
            ArtifactKind::SelectedTitle => "Selected title",
            ArtifactKind::Thumbnail1 => "Thumbnail 1",
            ArtifactKind::Thumbnail2 => "Thumbnail 2",
            ArtifactKind::Thumbnail3 => "Thumbnail 3",
            ArtifactKind::Thumbnail4 => "Thumbnail 4",
            ArtifactKind::SelectedThumbnail => "Selected thumbnail",
            ArtifactKind::FinalVideo => "Final video for upload",
            ArtifactKind::YoutubeMetadata => "YouTube metadata",
        }
    }

    /// Resolve the project subdirectory this kind is stored in.
    ///
    /// Substring match on the kind name, checked in a fixed priority order
    /// so kinds matching several words (e.g. `video_no_audio`) land in one
    /// directory deterministically.
    pub fn category(&self) -> ArtifactCategory {
        let name = self.name();
        if name.contains("video") {
            ArtifactCategory::Video
        } else if name.contains("audio") {
            ArtifactCategory::Audio
        } else if name.contains("transcription") || name.contains("timecodes") {
            ArtifactCategory::Transcription
        } else if name.contains("title") {
            ArtifactCategory::Titles
        } else if name.contains("thumbnail") {
            ArtifactCategory::Thumbnails
        } else {
            ArtifactCategory::Metadata
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArtifactKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// The six fixed per-project subdirectories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactCategory {
    Video,
    Audio,
    Transcription,
    Titles,
    Thumbnails,
    Metadata,
}

impl ArtifactCategory {
    /// All categories, one per fixed subdirectory.
    pub const ALL: [ArtifactCategory; 6] = [
        ArtifactCategory::Video,
        ArtifactCategory::Audio,
        ArtifactCategory::Transcription,
        ArtifactCategory::Titles,
        ArtifactCategory::Thumbnails,
        ArtifactCategory::Metadata,
    ];

    /// Directory name under the project root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ArtifactCategory::Video => "video",
            ArtifactCategory::Audio => "audio",
            ArtifactCategory::Transcription => "transcription",
            ArtifactCategory::Titles => "titles",
            ArtifactCategory::Thumbnails => "thumbnails",
            ArtifactCategory::Metadata => "metadata",
        }
    }
}

/// Persisted project manifest (`manifest.json`), rewritten whole on every
/// store mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project_name: String,
    pub project_id: String,
    /// Creation timestamp in `YYYYMMDD_HHMMSS` form (the project-id suffix).
    pub created: String,
    /// ISO-8601 time of the last manifest write.
    pub updated: String,
    /// Every kind, present or not; absent kinds map to null.
    pub artifacts: BTreeMap<ArtifactKind, Option<PathBuf>>,
}

/// A present artifact as reported by [`crate::store::ArtifactStore::list`].
///
/// Size and creation time are read live from the filesystem at call time.
#[derive(Debug, Clone)]
pub struct ArtifactInfo {
    pub kind: ArtifactKind,
    pub display_name: &'static str,
    pub path: PathBuf,
    pub size: u64,
    pub created: Option<DateTime<Local>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_category() {
        // Total function: no kind panics and each resolves to one directory.
        for kind in ArtifactKind::ALL {
            let _ = kind.category().dir_name();
        }
    }

    #[test]
    fn video_wins_over_audio_for_mixed_names() {
        assert_eq!(
            ArtifactKind::VideoNoAudio.category(),
            ArtifactCategory::Video
        );
    }

    #[test]
    fn classification_matches_taxonomy() {
        assert_eq!(
            ArtifactKind::CleanedAudio.category(),
            ArtifactCategory::Audio
        );
        assert_eq!(
            ArtifactKind::Timecodes.category(),
            ArtifactCategory::Transcription
        );
        assert_eq!(
            ArtifactKind::SelectedTitle.category(),
            ArtifactCategory::Titles
        );
        assert_eq!(
            ArtifactKind::Thumbnail3.category(),
            ArtifactCategory::Thumbnails
        );
        assert_eq!(
            ArtifactKind::KeyMoments.category(),
            ArtifactCategory::Metadata
        );
        assert_eq!(
            ArtifactKind::YoutubeMetadata.category(),
            ArtifactCategory::Metadata
        );
    }

    #[test]
    fn parses_every_canonical_name() {
        for kind in ArtifactKind::ALL {
            assert_eq!(kind.name().parse::<ArtifactKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_kind_name() {
        let err = "director_commentary".parse::<ArtifactKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownKind(_)));
    }

    #[test]
    fn serde_names_match_canonical_names() {
        for kind in ArtifactKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }
}
