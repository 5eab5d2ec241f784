//! FFprobe duration probing.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Probe a media file for its duration in seconds.
///
/// A missing file or a duration that does not parse to a positive finite
/// number is a fatal input error; the pipeline cannot plan segments without
/// a trustworthy total duration.
pub async fn probe_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: format!("FFprobe failed for {}", path.display()),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

    let raw = probe
        .format
        .duration
        .ok_or_else(|| MediaError::InvalidDuration("missing duration field".to_string()))?;

    parse_duration(&raw)
}

/// Parse and validate an ffprobe duration string.
fn parse_duration(raw: &str) -> MediaResult<f64> {
    let duration: f64 = raw
        .trim()
        .parse()
        .map_err(|_| MediaError::InvalidDuration(raw.to_string()))?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::InvalidDuration(raw.to_string()));
    }

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_valid() {
        assert!((parse_duration("123.456").unwrap() - 123.456).abs() < 1e-9);
        assert!((parse_duration(" 10 ").unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(matches!(
            parse_duration("abc"),
            Err(MediaError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("0"),
            Err(MediaError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("-5.0"),
            Err(MediaError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("inf"),
            Err(MediaError::InvalidDuration(_))
        ));
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let err = probe_duration("/nonexistent/video.mp4").await.unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
        assert!(err.is_input_error());
    }
}
