//! Silence and segment records.

use serde::{Deserialize, Serialize};

use crate::timestamp::format_hms;

/// A detected silence interval, as reported by the silence detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Silence {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Duration in seconds (end - start).
    pub duration: f64,
}

impl Silence {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            duration: end - start,
        }
    }
}

/// A contiguous chunk of the source media.
///
/// Segments partition the whole timeline: `segments[i].end_s` equals
/// `segments[i+1].start_s` and the final segment ends at the total duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Zero-based position in the ordered segment list.
    pub index: usize,
    /// Chunk media file, relative to the manifest directory.
    pub file: String,
    /// Start time in seconds.
    pub start_s: f64,
    /// End time in seconds.
    pub end_s: f64,
    /// Duration in seconds.
    pub duration_s: f64,
    /// Start time as HH:MM:SS.mmm.
    pub start_hms: String,
    /// End time as HH:MM:SS.mmm.
    pub end_hms: String,
}

impl Segment {
    /// Build a segment record, deriving duration and display timestamps.
    pub fn new(index: usize, file: impl Into<String>, start_s: f64, end_s: f64) -> Self {
        Self {
            index,
            file: file.into(),
            start_s,
            end_s,
            duration_s: end_s - start_s,
            start_hms: format_hms(start_s),
            end_hms: format_hms(end_s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_duration() {
        let s = Silence::new(1.5, 3.0);
        assert!((s.duration - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_segment_derived_fields() {
        let seg = Segment::new(0, "chunk_000.wav", 0.0, 90.5);
        assert!((seg.duration_s - 90.5).abs() < 1e-9);
        assert_eq!(seg.start_hms, "00:00:00.000");
        assert_eq!(seg.end_hms, "00:01:30.500");
    }

    #[test]
    fn test_segment_serde_round_trip() {
        let seg = Segment::new(3, "chunk_003.wav", 12.0, 24.0);
        let json = serde_json::to_string(&seg).unwrap();
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index, 3);
        assert_eq!(back.file, "chunk_003.wav");
        assert!((back.end_s - 24.0).abs() < 1e-9);
    }
}
