// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media processing glue over the ffmpeg command-line tools.
//!
//! Each operation builds one `ffmpeg`/`ffprobe` invocation, runs it to
//! completion, and leaves the result at the caller-chosen output path. The
//! caller is responsible for handing finished files to the artifact store
//! and for recording step completion or failure in the workflow state.
//! There is no progress reporting and no retrying here.

use anyhow::{bail, ensure, Context, Result};
use std::path::Path;
use std::process::Command;

/// Basic stream information for a media file, as reported by ffprobe.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    /// Duration in seconds.
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub codec: String,
    pub fps: f64,
    pub has_audio: bool,
}

/// Verify that ffmpeg is installed and runnable.
pub fn check_ffmpeg() -> Result<()> {
    let output = Command::new("ffmpeg")
        .arg("-version")
        .output()
        .context("ffmpeg not found; install it (e.g. `sudo apt install ffmpeg`)")?;
    if !output.status.success() {
        bail!("ffmpeg is installed but not runnable");
    }
    Ok(())
}

/// Inspect a media file with ffprobe.
pub fn probe(input: &Path) -> Result<MediaInfo> {
    let args = probe_args(input);
    log::debug!("running ffprobe on {}", input.display());
    let output = Command::new("ffprobe")
        .args(&args)
        .output()
        .context("failed to spawn ffprobe")?;
    if !output.status.success() {
        bail!(
            "ffprobe failed for {}: {}",
            input.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let data: serde_json::Value = serde_json::from_slice(&output.stdout)
        .context("ffprobe produced unparseable JSON")?;
    parse_probe_output(&data).with_context(|| format!("probing {}", input.display()))
}

/// Concatenate videos into one file using the concat demuxer (stream copy).
pub fn concat(inputs: &[&Path], output: &Path) -> Result<()> {
    ensure!(!inputs.is_empty(), "no input videos to concatenate");

    // The concat demuxer reads its inputs from a list file; keep it next
    // to the output and remove it afterwards.
    let list_path = output.with_extension("concat_list.txt");
    let mut list = String::new();
    for input in inputs {
        let absolute = std::fs::canonicalize(input)
            .with_context(|| format!("input video not found: {}", input.display()))?;
        list.push_str(&format!("file '{}'\n", absolute.display()));
    }
    std::fs::write(&list_path, list)
        .with_context(|| format!("writing concat list {}", list_path.display()))?;

    let args = concat_args(&list_path, output);
    let result = run_ffmpeg(&args, "concat");
    let _ = std::fs::remove_file(&list_path);
    result
}

/// Cut `[start, end)` seconds out of a video (stream copy, no re-encode).
pub fn trim(input: &Path, start: f64, end: f64, output: &Path) -> Result<()> {
    ensure!(
        start >= 0.0 && start < end,
        "invalid trim range: start {start} must be non-negative and before end {end}"
    );
    run_ffmpeg(&trim_args(input, start, end, output), "trim")
}

/// Extract the audio track from a video. The audio codec is chosen from
/// the output extension (`mp3` uses libmp3lame).
pub fn extract_audio(input: &Path, output: &Path, bitrate: &str) -> Result<()> {
    run_ffmpeg(&extract_audio_args(input, output, bitrate), "extract audio")
}

/// Overlay one video on top of another at a pixel position, with an
/// optional scale for the overlay and an opacity (0.0 - 1.0; values below
/// 1.0 blend the overlay). Base audio is copied through.
pub fn overlay(
    base: &Path,
    overlay: &Path,
    position: (u32, u32),
    size: Option<(u32, u32)>,
    opacity: f64,
    output: &Path,
) -> Result<()> {
    run_ffmpeg(
        &overlay_args(base, overlay, position, size, opacity, output),
        "overlay video",
    )
}

/// Mix an overlay track into a base track at the given volume (0.0 - 1.0).
pub fn mix_audio(base: &Path, overlay: &Path, overlay_volume: f64, output: &Path) -> Result<()> {
    run_ffmpeg(
        &mix_audio_args(base, overlay, overlay_volume, output),
        "mix audio",
    )
}

/// Remux a video with a replacement audio track (video stream copied).
pub fn merge_video_audio(video: &Path, audio: &Path, output: &Path) -> Result<()> {
    run_ffmpeg(
        &merge_video_audio_args(video, audio, output),
        "merge video and audio",
    )
}

fn run_ffmpeg(args: &[String], operation: &str) -> Result<()> {
    log::info!("ffmpeg {operation}: ffmpeg {}", args.join(" "));
    let output = Command::new("ffmpeg")
        .args(args)
        .output()
        .context("failed to spawn ffmpeg")?;
    if !output.status.success() {
        bail!(
            "ffmpeg {operation} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

fn probe_args(input: &Path) -> Vec<String> {
    vec![
        "-v".into(),
        "error".into(),
        "-show_entries".into(),
        "stream=codec_type,codec_name,width,height,r_frame_rate".into(),
        "-show_entries".into(),
        "format=duration".into(),
        "-of".into(),
        "json".into(),
        input.display().to_string(),
    ]
}

fn concat_args(list_path: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        list_path.display().to_string(),
        "-c".into(),
        "copy".into(),
        output.display().to_string(),
    ]
}

fn trim_args(input: &Path, start: f64, end: f64, output: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-ss".into(),
        start.to_string(),
        "-i".into(),
        input.display().to_string(),
        "-t".into(),
        (end - start).to_string(),
        "-c".into(),
        "copy".into(),
        output.display().to_string(),
    ]
}

fn extract_audio_args(input: &Path, output: &Path, bitrate: &str) -> Vec<String> {
    vec![
        "-y".into(),
        "-i".into(),
        input.display().to_string(),
        "-vn".into(),
        "-acodec".into(),
        audio_codec_for(output),
        "-ab".into(),
        bitrate.to_string(),
        output.display().to_string(),
    ]
}

fn overlay_args(
    base: &Path,
    overlay: &Path,
    position: (u32, u32),
    size: Option<(u32, u32)>,
    opacity: f64,
    output: &Path,
) -> Vec<String> {
    let (x, y) = position;
    let mut filters = Vec::new();
    let mut overlay_input = "[1:v]".to_string();

    if let Some((w, h)) = size {
        filters.push(format!("{overlay_input}scale={w}:{h}[ovr]"));
        overlay_input = "[ovr]".to_string();
    }
    if opacity < 1.0 {
        filters.push(format!(
            "{overlay_input}format=rgba,colorchannelmixer=aa={opacity}[ovr_alpha]"
        ));
        overlay_input = "[ovr_alpha]".to_string();
    }
    filters.push(format!("[0:v]{overlay_input}overlay={x}:{y}"));

    vec![
        "-y".into(),
        "-i".into(),
        base.display().to_string(),
        "-i".into(),
        overlay.display().to_string(),
        "-filter_complex".into(),
        filters.join(";"),
        "-c:a".into(),
        "copy".into(),
        output.display().to_string(),
    ]
}

fn mix_audio_args(base: &Path, overlay: &Path, overlay_volume: f64, output: &Path) -> Vec<String> {
    let filter =
        format!("[1:a]volume={overlay_volume}[a1];[0:a][a1]amix=inputs=2:duration=longest");
    vec![
        "-y".into(),
        "-i".into(),
        base.display().to_string(),
        "-i".into(),
        overlay.display().to_string(),
        "-filter_complex".into(),
        filter,
        "-c:a".into(),
        audio_codec_for(output),
        output.display().to_string(),
    ]
}

fn merge_video_audio_args(video: &Path, audio: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-i".into(),
        video.display().to_string(),
        "-i".into(),
        audio.display().to_string(),
        "-map".into(),
        "0:v:0".into(),
        "-map".into(),
        "1:a:0".into(),
        "-c:v".into(),
        "copy".into(),
        "-shortest".into(),
        output.display().to_string(),
    ]
}

fn audio_codec_for(output: &Path) -> String {
    match output.extension().and_then(|e| e.to_str()) {
        Some("mp3") | None => "libmp3lame".to_string(),
        Some(other) => other.to_string(),
    }
}

fn parse_probe_output(data: &serde_json::Value) -> Result<MediaInfo> {
    let streams = data["streams"].as_array().cloned().unwrap_or_default();
    let video = streams
        .iter()
        .find(|s| s["codec_type"] == "video")
        .context("no video stream found")?;
    let has_audio = streams.iter().any(|s| s["codec_type"] == "audio");

    let duration = data["format"]["duration"]
        .as_str()
        .and_then(|d| d.parse::<f64>().ok())
        .context("missing or unparseable duration")?;

    // r_frame_rate comes back as a rational like "30000/1001".
    let fps = video["r_frame_rate"]
        .as_str()
        .and_then(parse_frame_rate)
        .unwrap_or(30.0);

    Ok(MediaInfo {
        duration,
        width: video["width"].as_u64().unwrap_or(0) as u32,
        height: video["height"].as_u64().unwrap_or(0) as u32,
        codec: video["codec_name"].as_str().unwrap_or("unknown").to_string(),
        fps,
        has_audio,
    })
}

fn parse_frame_rate(rational: &str) -> Option<f64> {
    let (num, den) = rational.split_once('/')?;
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if den == 0.0 {
        None
    } else {
        Some(num / den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn trim_args_use_start_and_duration() {
        let args = trim_args(Path::new("in.mp4"), 5.0, 12.5, Path::new("out.mp4"));
        assert_eq!(
            args,
            vec!["-y", "-ss", "5", "-i", "in.mp4", "-t", "7.5", "-c", "copy", "out.mp4"]
        );
    }

    #[test]
    fn trim_rejects_empty_or_reversed_range() {
        let out = PathBuf::from("out.mp4");
        assert!(trim(Path::new("in.mp4"), 10.0, 10.0, &out).is_err());
        assert!(trim(Path::new("in.mp4"), 10.0, 4.0, &out).is_err());
        assert!(trim(Path::new("in.mp4"), -1.0, 4.0, &out).is_err());
    }

    #[test]
    fn concat_args_use_concat_demuxer_with_stream_copy() {
        let args = concat_args(Path::new("list.txt"), Path::new("merged.mp4"));
        assert_eq!(
            args,
            vec!["-y", "-f", "concat", "-safe", "0", "-i", "list.txt", "-c", "copy", "merged.mp4"]
        );
    }

    #[test]
    fn concat_rejects_empty_input_list() {
        assert!(concat(&[], Path::new("merged.mp4")).is_err());
    }

    #[test]
    fn extract_audio_picks_codec_from_extension() {
        let args = extract_audio_args(Path::new("in.mp4"), Path::new("out.mp3"), "192k");
        assert!(args.contains(&"libmp3lame".to_string()));
        assert!(args.contains(&"-vn".to_string()));

        let args = extract_audio_args(Path::new("in.mp4"), Path::new("out.wav"), "192k");
        assert!(args.contains(&"wav".to_string()));
    }

    #[test]
    fn overlay_at_full_opacity_places_unscaled_input_directly() {
        let args = overlay_args(
            Path::new("main.mp4"),
            Path::new("cam.mp4"),
            (10, 10),
            None,
            1.0,
            Path::new("out.mp4"),
        );
        let filter = args
            .iter()
            .find(|a| a.contains("overlay="))
            .expect("overlay filter present");
        assert_eq!(filter, "[0:v][1:v]overlay=10:10");
        // Base audio is passed through untouched.
        assert!(args.windows(2).any(|w| w == ["-c:a", "copy"]));
    }

    #[test]
    fn overlay_chains_scale_and_opacity_filters() {
        let args = overlay_args(
            Path::new("main.mp4"),
            Path::new("cam.mp4"),
            (1600, 40),
            Some((320, 180)),
            0.8,
            Path::new("out.mp4"),
        );
        let filter = args
            .iter()
            .find(|a| a.contains("overlay="))
            .expect("overlay filter present");
        assert_eq!(
            filter,
            "[1:v]scale=320:180[ovr];\
             [ovr]format=rgba,colorchannelmixer=aa=0.8[ovr_alpha];\
             [0:v][ovr_alpha]overlay=1600:40"
        );
    }

    #[test]
    fn mix_audio_filter_scales_overlay_volume() {
        let args = mix_audio_args(
            Path::new("voice.mp3"),
            Path::new("music.mp3"),
            0.25,
            Path::new("mixed.mp3"),
        );
        let filter = args
            .iter()
            .find(|a| a.contains("amix"))
            .expect("amix filter present");
        assert!(filter.starts_with("[1:a]volume=0.25[a1]"));
    }

    #[test]
    fn merge_maps_video_from_first_input_and_audio_from_second() {
        let args = merge_video_audio_args(
            Path::new("silent.mp4"),
            Path::new("final.mp3"),
            Path::new("final.mp4"),
        );
        assert!(args.windows(2).any(|w| w == ["-map", "0:v:0"]));
        assert!(args.windows(2).any(|w| w == ["-map", "1:a:0"]));
    }

    #[test]
    fn probe_output_parses_streams_and_duration() {
        let data = serde_json::json!({
            "streams": [
                {
                    "codec_type": "video",
                    "codec_name": "h264",
                    "width": 1920,
                    "height": 1080,
                    "r_frame_rate": "30000/1001"
                },
                { "codec_type": "audio", "codec_name": "aac" }
            ],
            "format": { "duration": "63.5" }
        });

        let info = parse_probe_output(&data).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.codec, "h264");
        assert!(info.has_audio);
        assert!((info.duration - 63.5).abs() < f64::EPSILON);
        assert!((info.fps - 29.97).abs() < 0.01);
    }

    #[test]
    fn probe_output_without_video_stream_is_an_error() {
        let data = serde_json::json!({
            "streams": [{ "codec_type": "audio" }],
            "format": { "duration": "10.0" }
        });
        assert!(parse_probe_output(&data).is_err());
    }

    #[test]
    fn frame_rate_rational_parsing() {
        assert_eq!(parse_frame_rate("30/1"), Some(30.0));
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("nonsense"), None);
    }
}
