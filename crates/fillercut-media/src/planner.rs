//! Silence-aligned segment planning.
//!
//! Given the total duration and ascending candidate cut points (silence
//! ends), the planner walks a cursor forward and chooses the next boundary
//! under a maximum segment length, preferring cuts at silence points close
//! to the length limit so chunks stay as large as possible.

use serde::{Deserialize, Serialize};

/// Loop guard against floating-point residue at the tail.
const EPS: f64 = 0.01;

/// Minimum forward progress a boundary must make.
const MIN_ADVANCE: f64 = 0.001;

/// Segment planning parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Maximum segment length in seconds.
    pub max_len: f64,
    /// Minimum segment length in seconds; cut points closer than this to the
    /// cursor are not eligible.
    pub min_chunk: f64,
    /// Window before the length target within which a silence point is
    /// preferred over the closest-before-target fallback.
    pub prefer_window: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_len: 60.0,
            min_chunk: 5.0,
            prefer_window: 10.0,
        }
    }
}

/// A planned segment boundary pair, before chunk files exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedSegment {
    /// Zero-based segment index.
    pub index: usize,
    /// Start time in seconds.
    pub start_s: f64,
    /// End time in seconds.
    pub end_s: f64,
}

impl PlannedSegment {
    /// Duration in seconds.
    pub fn duration_s(&self) -> f64 {
        self.end_s - self.start_s
    }
}

/// Plan contiguous segments over `[0, total_duration]`.
///
/// `cut_points` must be ascending. The result partitions the timeline
/// exactly: the first segment starts at 0, each segment starts where the
/// previous ended, and the last ends at `total_duration`.
pub fn plan_segments(
    total_duration: f64,
    cut_points: &[f64],
    config: &SegmenterConfig,
) -> Vec<PlannedSegment> {
    let mut segments = Vec::new();
    let mut t0 = 0.0_f64;
    let mut index = 0usize;

    while t0 < total_duration - EPS {
        let target = (t0 + config.max_len).min(total_duration);
        let mut boundary = choose_boundary(t0, target, cut_points, config);

        // Degenerate boundary: force the hard cut, and if even that makes no
        // progress we are at a zero-length tail and must stop.
        if boundary <= t0 + MIN_ADVANCE {
            boundary = target;
        }
        if boundary <= t0 + MIN_ADVANCE {
            break;
        }

        segments.push(PlannedSegment {
            index,
            start_s: t0,
            end_s: boundary,
        });
        t0 = boundary;
        index += 1;
    }

    segments
}

/// Pick the next boundary for the segment starting at `t0`.
fn choose_boundary(t0: f64, target: f64, cut_points: &[f64], config: &SegmenterConfig) -> f64 {
    // Eligible: strictly past the minimum chunk length, at or before target
    let eligible: Vec<f64> = cut_points
        .iter()
        .copied()
        .filter(|&cp| cp > t0 + config.min_chunk && cp <= target)
        .collect();

    if eligible.is_empty() {
        return target;
    }

    // Prefer the point closest to the target within the search window;
    // ties resolve to the first point seen in ascending order.
    let mut best: Option<f64> = None;
    let mut best_dist = f64::INFINITY;
    for &cp in &eligible {
        let dist = (target - cp).abs();
        if dist <= config.prefer_window && dist < best_dist {
            best = Some(cp);
            best_dist = dist;
        }
    }

    match best {
        Some(cp) => cp,
        // Nothing inside the window: fall back to the largest eligible
        // point, the closest one before the target.
        None => eligible
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_len: f64, min_chunk: f64, prefer_window: f64) -> SegmenterConfig {
        SegmenterConfig {
            max_len,
            min_chunk,
            prefer_window,
        }
    }

    fn assert_partition(segments: &[PlannedSegment], total: f64, max_len: f64) {
        assert!(!segments.is_empty());
        assert_eq!(segments[0].start_s, 0.0);
        for pair in segments.windows(2) {
            assert!(
                (pair[0].end_s - pair[1].start_s).abs() < 1e-9,
                "segments must be contiguous"
            );
        }
        let last = segments.last().unwrap();
        assert!((last.end_s - total).abs() < 1e-9);
        for seg in segments {
            assert!(seg.duration_s() > 0.0);
            assert!(seg.duration_s() <= max_len + EPS);
        }
    }

    #[test]
    fn test_no_cut_points_hard_cuts() {
        let segments = plan_segments(10.0, &[], &config(4.0, 1.0, 2.0));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].end_s, 4.0);
        assert_eq!(segments[1].end_s, 8.0);
        assert_eq!(segments[2].end_s, 10.0);
        assert_partition(&segments, 10.0, 4.0);
    }

    #[test]
    fn test_hard_cut_count_matches_ceil() {
        for total in [10.0, 12.0, 12.5, 0.5] {
            let segments = plan_segments(total, &[], &config(4.0, 1.0, 2.0));
            assert_eq!(segments.len(), (total / 4.0_f64).ceil() as usize);
            assert_partition(&segments, total, 4.0);
        }
    }

    #[test]
    fn test_short_input_single_segment() {
        let segments = plan_segments(3.0, &[], &config(60.0, 1.0, 10.0));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_s, 0.0);
        assert_eq!(segments[0].end_s, 3.0);
    }

    #[test]
    fn test_prefers_silence_near_target() {
        // Target for the first segment is 60; 55 lies in the window, 20 does not
        let segments = plan_segments(100.0, &[20.0, 55.0], &config(60.0, 5.0, 10.0));
        assert_eq!(segments[0].end_s, 55.0);
        assert_partition(&segments, 100.0, 60.0);
    }

    #[test]
    fn test_closest_to_target_wins_within_window() {
        let segments = plan_segments(100.0, &[52.0, 58.0], &config(60.0, 5.0, 10.0));
        assert_eq!(segments[0].end_s, 58.0);
    }

    #[test]
    fn test_fallback_largest_eligible_outside_window() {
        // Both points eligible, neither within 2.0 of target 60
        let segments = plan_segments(100.0, &[20.0, 40.0], &config(60.0, 5.0, 2.0));
        assert_eq!(segments[0].end_s, 40.0);
    }

    #[test]
    fn test_min_chunk_excludes_early_points() {
        // 0.5 is within min_chunk of the cursor, so only the hard cut remains
        let segments = plan_segments(10.0, &[0.5], &config(4.0, 1.0, 4.0));
        assert_eq!(segments[0].end_s, 4.0);
    }

    #[test]
    fn test_cut_point_at_target_is_taken() {
        let segments = plan_segments(8.0, &[4.0], &config(4.0, 1.0, 1.0));
        assert_eq!(segments[0].end_s, 4.0);
        assert_partition(&segments, 8.0, 4.0);
    }

    #[test]
    fn test_floating_point_tail_not_emitted() {
        // Residue below EPS after the last boundary must not yield a segment
        let segments = plan_segments(8.005, &[], &config(4.0, 1.0, 1.0));
        assert_eq!(segments.len(), 2);
        assert!((segments[1].end_s - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_dense_cut_points_partition() {
        let cps: Vec<f64> = (1..300).map(|i| i as f64 * 0.7).collect();
        let segments = plan_segments(200.0, &cps, &config(30.0, 5.0, 8.0));
        assert_partition(&segments, 200.0, 30.0);
    }
}
