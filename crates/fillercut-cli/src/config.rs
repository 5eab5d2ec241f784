//! Typed pipeline configuration, validated once at the CLI boundary.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fillercut_media::{CutConfig, SegmenterConfig};
use fillercut_models::{normalize_token, EncodingConfig};

use crate::cli::{CutArgs, EncodeArgs, SplitArgs};
use crate::error::{PipelineError, PipelineResult};

/// Options for the split stage.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub segmenter: SegmenterConfig,
    /// Silence threshold in dBFS.
    pub silence_db: f64,
    /// Minimum silence duration in seconds.
    pub min_silence: f64,
    /// Chunk container format (file extension).
    pub chunk_format: String,
    /// Directory for chunks and the manifest.
    pub out_dir: PathBuf,
}

impl SplitOptions {
    pub fn from_args(args: &SplitArgs, input: &Path) -> PipelineResult<Self> {
        if args.max_len <= 0.0 || !args.max_len.is_finite() {
            return Err(PipelineError::InvalidConfig(format!(
                "--max-len must be positive, got {}",
                args.max_len
            )));
        }
        if args.min_chunk < 0.0 || args.silence_window < 0.0 {
            return Err(PipelineError::InvalidConfig(
                "--min-chunk and --silence-window must not be negative".into(),
            ));
        }
        if args.min_silence <= 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "--min-silence must be positive, got {}",
                args.min_silence
            )));
        }

        let out_dir = match &args.out_dir {
            Some(dir) => dir.clone(),
            None => default_out_dir(input),
        };

        Ok(Self {
            segmenter: SegmenterConfig {
                max_len: args.max_len,
                min_chunk: args.min_chunk,
                prefer_window: args.silence_window,
            },
            silence_db: args.silence_db,
            min_silence: args.min_silence,
            chunk_format: args.chunk_format.clone(),
            out_dir,
        })
    }
}

/// Options for the cut stage.
#[derive(Debug, Clone)]
pub struct CutOptions {
    /// Normalized filler words.
    pub targets: HashSet<String>,
    pub cut: CutConfig,
    pub encoding: EncodingConfig,
    /// Output video path.
    pub output: PathBuf,
    /// Render an encode progress bar.
    pub show_progress: bool,
}

impl CutOptions {
    pub fn from_args(cut: &CutArgs, encode: &EncodeArgs, input: &Path) -> PipelineResult<Self> {
        let targets: HashSet<String> = cut
            .fillers
            .split(',')
            .map(normalize_token)
            .filter(|t| !t.is_empty())
            .collect();

        if targets.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "--fillers must name at least one word".into(),
            ));
        }

        let pad_before = cut.pad_before.unwrap_or(cut.pad);
        let pad_after = cut.pad_after.unwrap_or(cut.pad);
        if pad_before < 0.0 || pad_after < 0.0 || cut.merge_gap < 0.0 || cut.min_word_dur < 0.0 {
            return Err(PipelineError::InvalidConfig(
                "padding, merge gap and minimum word duration must not be negative".into(),
            ));
        }

        let output = match &cut.output {
            Some(path) => path.clone(),
            None => default_output_path(input),
        };

        Ok(Self {
            targets,
            cut: CutConfig {
                pad_before,
                pad_after,
                merge_gap: cut.merge_gap,
                min_word_dur: cut.min_word_dur,
            },
            encoding: EncodingConfig {
                codec: encode.codec.clone(),
                preset: encode.preset.clone(),
                crf: encode.crf,
                audio_codec: encode.audio_codec.clone(),
                audio_bitrate: encode.audio_bitrate.clone(),
            },
            output,
            show_progress: !cut.no_progress,
        })
    }
}

/// Default chunk directory: `<stem>_chunks` next to the input.
pub fn default_out_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "input".to_string());
    input.with_file_name(format!("{stem}_chunks"))
}

/// Default output video path: `<stem>_cut.mp4` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_cut.mp4"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CutArgs, EncodeArgs, SplitArgs};
    use clap::Parser;

    #[derive(Parser)]
    struct SplitHarness {
        #[command(flatten)]
        args: SplitArgs,
    }

    #[derive(Parser)]
    struct CutHarness {
        #[command(flatten)]
        cut: CutArgs,
        #[command(flatten)]
        encode: EncodeArgs,
    }

    #[test]
    fn test_split_options_defaults() {
        let h = SplitHarness::parse_from(["t"]);
        let opts = SplitOptions::from_args(&h.args, Path::new("/work/video.mp4")).unwrap();
        assert_eq!(opts.segmenter.max_len, 60.0);
        assert_eq!(opts.out_dir, PathBuf::from("/work/video_chunks"));
    }

    #[test]
    fn test_split_rejects_bad_max_len() {
        let h = SplitHarness::parse_from(["t", "--max-len", "0"]);
        let err = SplitOptions::from_args(&h.args, Path::new("v.mp4")).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_cut_options_normalizes_fillers() {
        let h = CutHarness::parse_from(["t", "--fillers", " UH, [euh] ,um."]);
        let opts = CutOptions::from_args(&h.cut, &h.encode, Path::new("v.mp4")).unwrap();
        assert!(opts.targets.contains("uh"));
        assert!(opts.targets.contains("euh"));
        assert!(opts.targets.contains("um"));
        assert_eq!(opts.targets.len(), 3);
    }

    #[test]
    fn test_cut_symmetric_pad_resolution() {
        let h = CutHarness::parse_from(["t", "--pad", "0.3", "--pad-after", "0.1"]);
        let opts = CutOptions::from_args(&h.cut, &h.encode, Path::new("v.mp4")).unwrap();
        assert!((opts.cut.pad_before - 0.3).abs() < 1e-9);
        assert!((opts.cut.pad_after - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_cut_rejects_empty_fillers() {
        let h = CutHarness::parse_from(["t", "--fillers", " ,.,"]);
        let err = CutOptions::from_args(&h.cut, &h.encode, Path::new("v.mp4")).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/a/video.mp4")),
            PathBuf::from("/a/video_cut.mp4")
        );
    }
}
