//! Shared data models for the fillercut pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Detected silences and planned media segments
//! - Word timestamps (chunk-relative and absolute)
//! - Remove/keep time intervals
//! - Subtitle cues
//! - Encoding configuration

pub mod encoding;
pub mod interval;
pub mod segment;
pub mod timestamp;
pub mod word;

// Re-export common types
pub use encoding::EncodingConfig;
pub use interval::Interval;
pub use segment::{Segment, Silence};
pub use timestamp::{format_hms, format_srt};
pub use word::{join_words, normalize_token, MergedWord, SubtitleCue, WordItem};
