//! FFmpeg progress parsing and cut-aware progress mapping.

use fillercut_models::Interval;
use serde::{Deserialize, Serialize};

use crate::cuts::kept_before;

/// Progress information from FFmpeg.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FfmpegProgress {
    /// Current frame number
    pub frame: u64,
    /// Output time in milliseconds
    pub out_time_ms: i64,
    /// Output time as string (HH:MM:SS.microseconds)
    pub out_time: String,
    /// Encoding speed (e.g., 1.5 = 1.5x realtime)
    pub speed: f64,
    /// Whether encoding is complete
    pub is_complete: bool,
}

impl FfmpegProgress {
    /// Calculate progress percentage given total duration in milliseconds.
    pub fn percentage(&self, total_duration_ms: i64) -> f64 {
        if total_duration_ms <= 0 {
            return 0.0;
        }
        ((self.out_time_ms as f64 / total_duration_ms as f64) * 100.0).min(100.0)
    }
}

/// Maps FFmpeg's original-timeline playback position onto the kept timeline.
///
/// During the filler-removal encode, FFmpeg reads the original timeline but
/// writes only the keep intervals, so a raw percentage against the original
/// duration overstates the remaining work. This mapper reports how much kept
/// content has been produced so far.
#[derive(Debug, Clone)]
pub struct CutProgress {
    keep: Vec<Interval>,
    total_kept: f64,
}

impl CutProgress {
    /// Build a mapper over the ordered keep intervals.
    pub fn new(keep: &[Interval]) -> Self {
        let total_kept = keep.iter().map(|iv| iv.duration()).sum();
        Self {
            keep: keep.to_vec(),
            total_kept,
        }
    }

    /// Total kept duration in seconds.
    pub fn total_kept(&self) -> f64 {
        self.total_kept
    }

    /// Kept seconds accumulated up to original time `t`.
    pub fn kept_at(&self, t: f64) -> f64 {
        kept_before(t, &self.keep)
    }

    /// Percentage of the final output produced when the encoder has consumed
    /// the original timeline up to `t` seconds.
    pub fn percentage_at(&self, t: f64) -> f64 {
        if self.total_kept <= 0.0 {
            return 0.0;
        }
        (self.kept_at(t) / self.total_kept * 100.0).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percentage() {
        let progress = FfmpegProgress {
            out_time_ms: 5000,
            ..Default::default()
        };

        assert!((progress.percentage(10000) - 50.0).abs() < 0.01);
        assert!((progress.percentage(5000) - 100.0).abs() < 0.01);
        assert_eq!(progress.percentage(0), 0.0);
    }

    #[test]
    fn test_cut_progress_mapping() {
        let keep = vec![Interval::new(0.0, 2.0), Interval::new(4.0, 6.0)];
        let mapper = CutProgress::new(&keep);

        assert!((mapper.total_kept() - 4.0).abs() < 1e-9);
        assert!((mapper.kept_at(0.0) - 0.0).abs() < 1e-9);
        // Inside the removed gap, kept time is frozen at 2s
        assert!((mapper.kept_at(3.0) - 2.0).abs() < 1e-9);
        assert!((mapper.percentage_at(3.0) - 50.0).abs() < 0.01);
        assert!((mapper.percentage_at(6.0) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_cut_progress_empty_keep() {
        let mapper = CutProgress::new(&[]);
        assert_eq!(mapper.percentage_at(10.0), 0.0);
    }
}
