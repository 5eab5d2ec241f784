#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper and cut planning for the fillercut pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Progress parsing from `-progress pipe:2`
//! - Duration probing via ffprobe
//! - Silence detection via the `silencedetect` filter
//! - Silence-aligned segment planning under a max-length constraint
//! - Filler-word removal planning (pad, merge, invert) and the resulting
//!   `between(t,..)` select expression
//! - Applying a cut plan with a re-encode and mapped progress

pub mod chunk;
pub mod command;
pub mod cuts;
pub mod encode;
pub mod error;
pub mod planner;
pub mod probe;
pub mod progress;
pub mod silence;

pub use chunk::{extract_audio, extract_chunk};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use cuts::{build_select_expr, compute_cut_plan, kept_before, CutConfig, CutPlan};
pub use encode::apply_cut_plan;
pub use error::{MediaError, MediaResult};
pub use planner::{plan_segments, PlannedSegment, SegmenterConfig};
pub use probe::probe_duration;
pub use progress::{CutProgress, FfmpegProgress};
pub use silence::{cut_points, detect_silences, SilenceScan};
