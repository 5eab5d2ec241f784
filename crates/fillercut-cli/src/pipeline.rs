//! Pipeline driver: orchestrates the split, transcribe, merge, and cut
//! stages. Each stage runs to completion before the next starts.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use fillercut_media::{
    apply_cut_plan, check_ffmpeg, check_ffprobe, compute_cut_plan, cut_points, detect_silences,
    extract_audio, extract_chunk, plan_segments, probe_duration, CutPlan,
};
use fillercut_models::{MergedWord, Segment};

use crate::config::{CutOptions, SplitOptions};
use crate::error::{PipelineError, PipelineResult};
use crate::merge::{group_cues, merge_chunks, ChunkTranscript};
use crate::outputs::{
    read_manifest, render_plain_transcript, render_srt, render_timestamped_transcript,
    write_manifest, MANIFEST_FILE, SUBTITLES_FILE, TIMESTAMPS_FILE, TRANSCRIPT_FILE, WORDS_EXT,
};
use crate::transcriber::{parse_word_lines, Transcriber};

/// Sample rate for the extracted working audio.
const AUDIO_SAMPLE_RATE: u32 = 16000;

/// Split the input into silence-aligned chunks and write the manifest.
pub async fn run_split(input: &Path, opts: &SplitOptions) -> PipelineResult<Vec<Segment>> {
    if !input.exists() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }
    check_ffmpeg()?;
    check_ffprobe()?;

    let total_duration = probe_duration(input).await?;
    tokio::fs::create_dir_all(&opts.out_dir).await?;

    let audio_path = opts.out_dir.join("audio.wav");
    extract_audio(input, &audio_path, AUDIO_SAMPLE_RATE).await?;

    let scan = detect_silences(&audio_path, opts.silence_db, opts.min_silence).await?;
    if scan.skipped_lines > 0 {
        debug!(
            skipped = scan.skipped_lines,
            "Some silencedetect lines did not parse"
        );
    }

    let points = cut_points(&scan.silences);
    let planned = plan_segments(total_duration, &points, &opts.segmenter);

    let mut segments = Vec::with_capacity(planned.len());
    for plan in &planned {
        let file = format!("chunk_{:04}.{}", plan.index, opts.chunk_format);
        let chunk_path = opts.out_dir.join(&file);
        extract_chunk(&audio_path, &chunk_path, plan.start_s, plan.duration_s()).await?;
        segments.push(Segment::new(plan.index, file, plan.start_s, plan.end_s));
    }

    let manifest_path = opts.out_dir.join(MANIFEST_FILE);
    write_manifest(&manifest_path, &segments).await?;

    info!(
        segments = segments.len(),
        silences = scan.silences.len(),
        total_s = format!("{:.3}", total_duration),
        manifest = %manifest_path.display(),
        "Split complete"
    );

    Ok(segments)
}

/// Transcribe every chunk in the manifest, persisting each tool's raw
/// word-line output next to the chunk file.
///
/// A failing transcription logs a warning and moves on; later chunks are
/// independent. Returns the number of chunks that produced output.
pub async fn run_transcribe(
    manifest_path: &Path,
    transcriber: &dyn Transcriber,
) -> PipelineResult<usize> {
    let segments = read_manifest(manifest_path).await?;
    let dir = manifest_dir(manifest_path);

    let mut transcribed = 0usize;
    for segment in &segments {
        let chunk_path = dir.join(&segment.file);
        if !chunk_path.exists() {
            warn!(chunk = %chunk_path.display(), "Chunk file missing, skipping");
            continue;
        }

        let output = transcriber.transcribe(&chunk_path).await?;

        if !output.success {
            warn!(
                chunk = segment.index,
                exit_code = ?output.exit_code,
                stderr = %output.stderr.lines().last().unwrap_or(""),
                "Transcription failed, continuing with next chunk"
            );
            continue;
        }

        let words_path = words_path_for(&dir, &segment.file);
        tokio::fs::write(&words_path, &output.stdout).await?;
        transcribed += 1;
    }

    info!(
        transcribed,
        total = segments.len(),
        "Transcription complete"
    );

    Ok(transcribed)
}

/// Merge per-chunk word files into absolute-time outputs.
pub async fn run_merge(manifest_path: &Path) -> PipelineResult<Vec<MergedWord>> {
    let segments = read_manifest(manifest_path).await?;
    let dir = manifest_dir(manifest_path);

    // Ordered fold over chunks; manifest order is ascending start time
    let mut chunks = Vec::with_capacity(segments.len());
    let mut skipped_total = 0usize;
    for segment in &segments {
        let words_path = words_path_for(&dir, &segment.file);
        let words = match tokio::fs::read_to_string(&words_path).await {
            Ok(text) => {
                let parsed = parse_word_lines(&text);
                skipped_total += parsed.skipped_lines;
                parsed.words
            }
            Err(_) => {
                warn!(chunk = segment.index, "No transcript for chunk");
                Vec::new()
            }
        };
        chunks.push(ChunkTranscript {
            chunk_index: segment.index,
            offset: segment.start_s,
            words,
        });
    }

    let merged = merge_chunks(&chunks);
    let cues = group_cues(&merged);
    if skipped_total > 0 {
        debug!(skipped = skipped_total, "Unparseable transcript lines skipped");
    }

    tokio::fs::write(dir.join(TRANSCRIPT_FILE), render_plain_transcript(&merged)).await?;
    tokio::fs::write(
        dir.join(TIMESTAMPS_FILE),
        render_timestamped_transcript(&merged),
    )
    .await?;
    tokio::fs::write(dir.join(SUBTITLES_FILE), render_srt(&cues)).await?;

    info!(
        words = merged.len(),
        cues = cues.len(),
        dir = %dir.display(),
        "Merge complete"
    );

    Ok(merged)
}

/// Compute the cut plan and re-encode the video without the fillers.
pub async fn run_cut(
    input: &Path,
    opts: &CutOptions,
    words: &[MergedWord],
) -> PipelineResult<CutPlan> {
    if !input.exists() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }
    check_ffmpeg()?;

    let total_duration = probe_duration(input).await?;
    let plan = compute_cut_plan(words, &opts.targets, &opts.cut, total_duration);

    if plan.is_passthrough() {
        info!("No filler words matched; output will be a re-encode with no cuts");
    }

    let bar = if opts.show_progress {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {percent:>3}% {msg}") {
            bar.set_style(style);
        }
        Some(bar)
    } else {
        None
    };

    let progress_bar = bar.clone();
    apply_cut_plan(
        input,
        &opts.output,
        &plan,
        &opts.encoding,
        move |progress, mapper| {
            if let Some(bar) = &progress_bar {
                let t = progress.out_time_ms as f64 / 1000.0;
                bar.set_position(mapper.percentage_at(t).round() as u64);
                if progress.speed > 0.0 {
                    bar.set_message(format!("{:.1}x", progress.speed));
                }
            }
        },
    )
    .await?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    Ok(plan)
}

/// Load a previously written timestamped transcript as merged words.
pub async fn load_merged_transcript(path: &Path) -> PipelineResult<Vec<MergedWord>> {
    if !path.exists() {
        return Err(PipelineError::InputNotFound(path.to_path_buf()));
    }
    let text = tokio::fs::read_to_string(path).await?;
    let parsed = parse_word_lines(&text);

    // The file carries absolute times, so relative and absolute coincide
    Ok(parsed
        .words
        .into_iter()
        .map(|w| MergedWord {
            abs_start: w.start,
            abs_end: w.end,
            text: w.text,
            source_chunk: 0,
            rel_start: w.start,
            rel_end: w.end,
        })
        .collect())
}

/// Print the end-of-run summary for the cut stage.
pub fn print_cut_summary(plan: &CutPlan, output: &Path) {
    println!(
        "Removed {} interval(s), {:.3}s cut, {:.3}s kept -> {}",
        plan.remove.len(),
        plan.removed_duration(),
        plan.kept_duration(),
        output.display()
    );
}

fn manifest_dir(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Word-timestamp file for a chunk: `chunk_0000.wav` -> `chunk_0000.words.txt`.
fn words_path_for(dir: &Path, chunk_file: &str) -> PathBuf {
    let stem = chunk_file
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(chunk_file);
    dir.join(format!("{stem}.{WORDS_EXT}"))
}
