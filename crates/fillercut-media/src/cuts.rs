//! Filler-word removal planning.
//!
//! From absolute word timestamps and a target word set this module computes
//! the padded, merged intervals to remove, inverts them into the keep
//! intervals that survive into the output, and renders the keep set as an
//! FFmpeg `between(t,..)` select expression.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fillercut_models::{normalize_token, Interval, MergedWord};

/// Keep intervals shorter than this are dropped during inversion; they are
/// inaudible and produce one-frame stutters in the output.
const MIN_KEEP: f64 = 0.02;

/// Cut planning parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutConfig {
    /// Seconds of padding removed before a matched word.
    pub pad_before: f64,
    /// Seconds of padding removed after a matched word.
    pub pad_after: f64,
    /// Maximum gap between two removals for them to be coalesced.
    pub merge_gap: f64,
    /// Words shorter than this are ignored (transcriber noise).
    pub min_word_dur: f64,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            pad_before: 0.05,
            pad_after: 0.05,
            merge_gap: 0.2,
            min_word_dur: 0.0,
        }
    }
}

/// The computed removal plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutPlan {
    /// Disjoint ascending intervals to remove.
    pub remove: Vec<Interval>,
    /// Disjoint ascending intervals to keep.
    pub keep: Vec<Interval>,
}

impl CutPlan {
    /// Total removed duration in seconds.
    pub fn removed_duration(&self) -> f64 {
        self.remove.iter().map(|iv| iv.duration()).sum()
    }

    /// Total kept duration in seconds.
    pub fn kept_duration(&self) -> f64 {
        self.keep.iter().map(|iv| iv.duration()).sum()
    }

    /// True when nothing is removed.
    pub fn is_passthrough(&self) -> bool {
        self.remove.is_empty()
    }
}

/// Compute the removal plan for a merged word sequence.
///
/// Words are matched by exact normalized text against `targets` (which must
/// already hold normalized forms). Matches are padded, clamped to
/// `[0, total_duration]`, merged with gap tolerance, and inverted into keep
/// intervals. When nothing matches, the plan keeps the whole timeline.
pub fn compute_cut_plan(
    words: &[MergedWord],
    targets: &HashSet<String>,
    config: &CutConfig,
    total_duration: f64,
) -> CutPlan {
    let mut padded: Vec<Interval> = Vec::new();

    for word in words {
        if word.abs_end - word.abs_start < config.min_word_dur {
            continue;
        }
        let normalized = normalize_token(&word.text);
        if normalized.is_empty() || !targets.contains(&normalized) {
            continue;
        }

        let interval = Interval::new(
            (word.abs_start - config.pad_before).max(0.0),
            (word.abs_end + config.pad_after).min(total_duration),
        );
        if !interval.is_degenerate() {
            padded.push(interval);
        }
    }

    if padded.is_empty() {
        return CutPlan {
            remove: Vec::new(),
            keep: vec![Interval::new(0.0, total_duration)],
        };
    }

    let remove = merge_intervals(padded, config.merge_gap);
    let keep = invert_intervals(&remove, total_duration);

    debug!(
        matches = remove.len(),
        removed_s = format!("{:.3}", remove.iter().map(|iv| iv.duration()).sum::<f64>()),
        "Cut plan computed"
    );

    CutPlan { remove, keep }
}

/// Sort by start and sweep-merge, coalescing intervals whose gap is at most
/// `merge_gap`. The result is disjoint and ascending.
pub fn merge_intervals(mut intervals: Vec<Interval>, merge_gap: f64) -> Vec<Interval> {
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    let mut current = intervals[0];

    for iv in intervals.into_iter().skip(1) {
        if iv.start <= current.end + merge_gap {
            current.end = current.end.max(iv.end);
        } else {
            merged.push(current);
            current = iv;
        }
    }
    merged.push(current);

    merged
}

/// Invert disjoint ascending remove intervals into keep intervals over
/// `[0, total_duration]`, dropping slivers shorter than `MIN_KEEP`.
pub fn invert_intervals(remove: &[Interval], total_duration: f64) -> Vec<Interval> {
    let mut keep = Vec::with_capacity(remove.len() + 1);
    let mut cursor = 0.0_f64;

    for iv in remove {
        if iv.start > cursor + MIN_KEEP {
            keep.push(Interval::new(cursor, iv.start));
        }
        cursor = cursor.max(iv.end);
    }

    if total_duration > cursor + MIN_KEEP {
        keep.push(Interval::new(cursor, total_duration));
    }

    keep
}

/// Kept duration accumulated in `[0, t]` of the original timeline.
///
/// Walks the ordered keep intervals and stops as soon as `t` has been
/// consumed; merged transcripts can carry thousands of intervals and this is
/// called for every progress event.
pub fn kept_before(t: f64, keep: &[Interval]) -> f64 {
    let mut kept = 0.0_f64;
    for iv in keep {
        if t <= iv.start {
            break;
        }
        kept += (t.min(iv.end) - iv.start).max(0.0);
        if t <= iv.end {
            break;
        }
    }
    kept
}

/// Render keep intervals as an FFmpeg select expression:
/// `between(t,a,b)+between(t,c,d)+...` with 3-decimal literals.
pub fn build_select_expr(keep: &[Interval]) -> String {
    keep.iter()
        .map(|iv| format!("between(t,{:.3},{:.3})", iv.start, iv.end))
        .collect::<Vec<_>>()
        .join("+")
}
