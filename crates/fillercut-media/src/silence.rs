//! Silence detection via FFmpeg's `silencedetect` filter.
//!
//! FFmpeg prints detection results to stderr as log lines like:
//!
//! ```text
//! [silencedetect @ 0x...] silence_start: 12.345
//! [silencedetect @ 0x...] silence_end: 14.1 | silence_duration: 1.755
//! ```
//!
//! The parser is deliberately lenient: lines that do not match are skipped
//! and counted rather than failing the run, since FFmpeg interleaves other
//! diagnostics on the same stream.

use std::path::Path;
use std::process::Stdio;

use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use fillercut_models::Silence;

use crate::error::{MediaError, MediaResult};

/// Result of a silence scan.
#[derive(Debug, Clone)]
pub struct SilenceScan {
    /// Detected silences, in report order (ascending start time).
    pub silences: Vec<Silence>,
    /// Stderr lines that mentioned the detector but failed to parse.
    pub skipped_lines: usize,
}

/// Run silence detection over a media file.
///
/// # Arguments
/// - `input`: media file (audio or video)
/// - `noise_db`: silence threshold in dBFS (e.g. -30.0)
/// - `min_silence`: minimum silence duration in seconds
pub async fn detect_silences(
    input: impl AsRef<Path>,
    noise_db: f64,
    min_silence: f64,
) -> MediaResult<SilenceScan> {
    let input = input.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    let filter = format!("silencedetect=noise={}dB:d={}", noise_db, min_silence);
    debug!(input = %input.display(), filter = %filter, "Running silence detection");

    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-nostats", "-i"])
        .arg(input)
        .args(["-af", &filter, "-vn", "-f", "null", "-"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::ffmpeg_failed(
            "Silence detection failed",
            Some(stderr.lines().last().unwrap_or("").to_string()),
            output.status.code(),
        ));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let scan = parse_silencedetect(&stderr);

    debug!(
        silences = scan.silences.len(),
        skipped = scan.skipped_lines,
        "Silence detection complete"
    );

    Ok(scan)
}

/// Parse silencedetect output into silences, counting unparseable lines.
pub fn parse_silencedetect(stderr: &str) -> SilenceScan {
    let start_re = Regex::new(r"silence_start:\s*(-?[0-9]+(?:\.[0-9]+)?)").expect("valid regex");
    let end_re = Regex::new(
        r"silence_end:\s*(-?[0-9]+(?:\.[0-9]+)?)\s*\|\s*silence_duration:\s*(-?[0-9]+(?:\.[0-9]+)?)",
    )
    .expect("valid regex");

    let mut silences = Vec::new();
    let mut skipped = 0usize;
    let mut pending_start: Option<f64> = None;

    for line in stderr.lines() {
        if !line.contains("silence_") {
            continue;
        }

        if let Some(caps) = end_re.captures(line) {
            let end: f64 = caps[1].parse().unwrap_or(f64::NAN);
            let duration: f64 = caps[2].parse().unwrap_or(f64::NAN);
            if !end.is_finite() || !duration.is_finite() || duration <= 0.0 {
                skipped += 1;
                continue;
            }
            // Prefer the recorded start; fall back to end - duration
            let start = pending_start.take().unwrap_or(end - duration);
            silences.push(Silence::new(start.max(0.0), end));
        } else if let Some(caps) = start_re.captures(line) {
            match caps[1].parse::<f64>() {
                Ok(start) if start.is_finite() => pending_start = Some(start),
                _ => skipped += 1,
            }
        } else {
            skipped += 1;
        }
    }

    SilenceScan {
        silences,
        skipped_lines: skipped,
    }
}

/// Derive candidate cut points from detected silences.
///
/// The end of each silence is where speech resumes, which makes it the
/// natural place to split; the result is ascending because the detector
/// reports silences in order.
pub fn cut_points(silences: &[Silence]) -> Vec<f64> {
    silences.iter().map(|s| s.end).collect()
}
