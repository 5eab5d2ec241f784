//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Remove filler words from a video based on word-level timestamps.
#[derive(Parser, Debug)]
#[command(name = "fillercut", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a video into silence-aligned audio chunks
    Split {
        /// Input video file
        input: PathBuf,

        #[command(flatten)]
        split: SplitArgs,
    },

    /// Transcribe each chunk listed in a segment manifest
    Transcribe {
        /// Segment manifest written by `split`
        manifest: PathBuf,

        #[command(flatten)]
        transcribe: TranscribeArgs,
    },

    /// Merge per-chunk transcripts into absolute-time outputs
    Merge {
        /// Segment manifest written by `split`
        manifest: PathBuf,
    },

    /// Cut filler words out of the video
    Cut {
        /// Input video file
        input: PathBuf,

        /// Merged timestamped transcript (defaults to the one `merge` wrote
        /// in the chunk directory)
        #[arg(long)]
        transcript: Option<PathBuf>,

        #[command(flatten)]
        cut: CutArgs,

        #[command(flatten)]
        encode: EncodeArgs,
    },

    /// Run the whole pipeline: split, transcribe, merge, cut
    Run {
        /// Input video file
        input: PathBuf,

        #[command(flatten)]
        split: SplitArgs,

        #[command(flatten)]
        transcribe: TranscribeArgs,

        #[command(flatten)]
        cut: CutArgs,

        #[command(flatten)]
        encode: EncodeArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Maximum chunk length in seconds
    #[arg(long, default_value_t = 60.0)]
    pub max_len: f64,

    /// Minimum chunk length in seconds
    #[arg(long, default_value_t = 5.0)]
    pub min_chunk: f64,

    /// Window before the length target in which silence points are preferred
    #[arg(long, default_value_t = 10.0)]
    pub silence_window: f64,

    /// Silence threshold in dBFS
    #[arg(long, default_value_t = -30.0)]
    pub silence_db: f64,

    /// Minimum silence duration in seconds
    #[arg(long, default_value_t = 0.5)]
    pub min_silence: f64,

    /// Chunk container format (file extension)
    #[arg(long, default_value = "wav")]
    pub chunk_format: String,

    /// Working directory for chunks and the manifest (defaults to
    /// `<input stem>_chunks` next to the input)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct TranscribeArgs {
    /// Transcriber command; the chunk path is appended as the last argument
    #[arg(long, default_value = "whisper-timestamps")]
    pub transcriber_cmd: String,
}

#[derive(Args, Debug, Clone)]
pub struct CutArgs {
    /// Comma-separated filler words (case/punctuation-insensitive)
    #[arg(long, default_value = "euh,heu,uh,um")]
    pub fillers: String,

    /// Symmetric padding around matches in seconds
    #[arg(long, default_value_t = 0.05)]
    pub pad: f64,

    /// Padding before matches; overrides --pad
    #[arg(long)]
    pub pad_before: Option<f64>,

    /// Padding after matches; overrides --pad
    #[arg(long)]
    pub pad_after: Option<f64>,

    /// Maximum gap between removals for them to be coalesced, in seconds
    #[arg(long, default_value_t = 0.2)]
    pub merge_gap: f64,

    /// Ignore matched words shorter than this, in seconds
    #[arg(long, default_value_t = 0.0)]
    pub min_word_dur: f64,

    /// Output video path (defaults to `<input stem>_cut.mp4`)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Disable the encode progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Video codec
    #[arg(long, default_value = "libx264")]
    pub codec: String,

    /// Encoding preset
    #[arg(long, default_value = "fast")]
    pub preset: String,

    /// Constant Rate Factor (0-51, lower is better)
    #[arg(long, default_value_t = 20)]
    pub crf: u8,

    /// Audio codec
    #[arg(long, default_value = "aac")]
    pub audio_codec: String,

    /// Audio bitrate
    #[arg(long, default_value = "160k")]
    pub audio_bitrate: String,
}
