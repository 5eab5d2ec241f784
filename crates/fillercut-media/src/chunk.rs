//! Audio extraction and chunk extraction.

use std::path::Path;

use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Extract the audio track of a media file as mono PCM wav.
///
/// Transcription tools expect a fixed sample rate; 16kHz mono is the common
/// denominator for speech models.
pub async fn extract_audio(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    sample_rate: u32,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    debug!(
        input = %input.display(),
        output = %output.display(),
        sample_rate,
        "Extracting audio"
    );

    let cmd = FfmpegCommand::new(input, output)
        .no_video()
        .output_args(["-ar", &sample_rate.to_string(), "-ac", "1"]);

    FfmpegRunner::new().run(&cmd).await?;

    // An empty output means the input had no audio stream
    let metadata = tokio::fs::metadata(output).await?;
    if metadata.len() == 0 {
        return Err(MediaError::NoAudioData);
    }

    Ok(())
}

/// Extract one chunk `[start_s, start_s + duration_s)` of an audio file.
///
/// Uses two-pass seeking: a fast input seek to get close to the start, then
/// an accurate output seek from there. Input-only seeking lands on the
/// nearest keyframe and would shift every word timestamp in the chunk.
pub async fn extract_chunk(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start_s: f64,
    duration_s: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let fast_seek = if start_s > 5.0 { start_s - 5.0 } else { 0.0 };
    let accurate_seek = start_s - fast_seek;

    debug!(
        input = %input.display(),
        output = %output.display(),
        start_s,
        duration_s,
        "Extracting chunk"
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(fast_seek)
        .output_seek(accurate_seek)
        .duration(duration_s);

    FfmpegRunner::new().run(&cmd).await
}
