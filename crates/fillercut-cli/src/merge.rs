//! Transcript merging and subtitle grouping.

use fillercut_models::{MergedWord, SubtitleCue, WordItem};

/// Maximum silence between consecutive words within one cue.
const MAX_CUE_GAP: f64 = 0.8;
/// Maximum time a single cue may span.
const MAX_CUE_SPAN: f64 = 3.5;
/// Maximum words per cue.
const MAX_CUE_WORDS: usize = 12;

/// One chunk's transcription together with its absolute offset.
#[derive(Debug, Clone)]
pub struct ChunkTranscript {
    /// Segment index this transcript belongs to.
    pub chunk_index: usize,
    /// Absolute start time of the chunk in seconds.
    pub offset: f64,
    /// Chunk-relative words, time-ordered.
    pub words: Vec<WordItem>,
}

/// Merge per-chunk transcripts into one absolute-time word sequence.
///
/// Chunks must be supplied in ascending offset order; the fold preserves
/// chunk order and within-chunk order, which keeps the output time-ordered
/// because segments never overlap.
pub fn merge_chunks(chunks: &[ChunkTranscript]) -> Vec<MergedWord> {
    chunks.iter().fold(Vec::new(), |mut merged, chunk| {
        merged.extend(
            chunk
                .words
                .iter()
                .map(|w| MergedWord::from_relative(w, chunk.offset, chunk.chunk_index)),
        );
        merged
    })
}

/// Group merged words into subtitle cues.
///
/// A new cue starts when the gap since the running cue's end exceeds
/// `MAX_CUE_GAP`, when adding the word would stretch the cue past
/// `MAX_CUE_SPAN`, or when the cue is already `MAX_CUE_WORDS` long.
pub fn group_cues(words: &[MergedWord]) -> Vec<SubtitleCue> {
    let mut cues: Vec<SubtitleCue> = Vec::new();

    for word in words {
        let start_new = match cues.last() {
            None => true,
            Some(cue) => {
                word.abs_start - cue.end > MAX_CUE_GAP
                    || word.abs_end - cue.start > MAX_CUE_SPAN
                    || cue.words.len() >= MAX_CUE_WORDS
            }
        };

        if start_new {
            cues.push(SubtitleCue {
                start: word.abs_start,
                end: word.abs_end,
                words: vec![word.text.clone()],
            });
        } else {
            let cue = cues.last_mut().expect("cue exists");
            cue.end = cue.end.max(word.abs_end);
            cue.words.push(word.text.clone());
        }
    }

    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: usize, offset: f64, words: &[(f64, f64, &str)]) -> ChunkTranscript {
        ChunkTranscript {
            chunk_index: index,
            offset,
            words: words
                .iter()
                .map(|&(start, end, text)| WordItem {
                    start,
                    end,
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    fn evenly_spaced(count: usize, step: f64, dur: f64) -> Vec<MergedWord> {
        (0..count)
            .map(|i| {
                let start = i as f64 * step;
                MergedWord {
                    abs_start: start,
                    abs_end: start + dur,
                    text: format!("w{i}"),
                    source_chunk: 0,
                    rel_start: start,
                    rel_end: start + dur,
                }
            })
            .collect()
    }

    #[test]
    fn test_merge_translates_offsets() {
        let chunks = vec![
            chunk(0, 0.0, &[(0.1, 0.4, "un"), (0.5, 0.9, "deux")]),
            chunk(1, 10.0, &[(0.2, 0.6, "trois")]),
        ];

        let merged = merge_chunks(&chunks);
        assert_eq!(merged.len(), 3);
        assert!((merged[2].abs_start - 10.2).abs() < 1e-9);
        assert_eq!(merged[2].source_chunk, 1);
        assert!((merged[2].rel_start - 0.2).abs() < 1e-9);

        // Time-ordered by construction
        for pair in merged.windows(2) {
            assert!(pair[0].abs_start <= pair[1].abs_start);
        }
    }

    #[test]
    fn test_merge_empty_chunks() {
        let chunks = vec![chunk(0, 0.0, &[]), chunk(1, 5.0, &[(0.0, 0.3, "a")])];
        let merged = merge_chunks(&chunks);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source_chunk, 1);
    }

    #[test]
    fn test_cue_close_words_single_cue() {
        // Gaps of 0.1s, total span under 3.5s, under 12 words: one cue
        let words = evenly_spaced(5, 0.3, 0.2);
        let cues = group_cues(&words);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].words.len(), 5);
        assert!((cues[0].start - 0.0).abs() < 1e-9);
        assert!((cues[0].end - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_cue_gap_forces_split() {
        let mut words = evenly_spaced(2, 0.3, 0.2);
        words.push(MergedWord {
            abs_start: 2.0, // 1.5s after the previous end of 0.5
            abs_end: 2.2,
            text: "late".into(),
            source_chunk: 0,
            rel_start: 2.0,
            rel_end: 2.2,
        });

        let cues = group_cues(&words);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].words, vec!["late"]);
    }

    #[test]
    fn test_cue_span_forces_split() {
        // Word gaps stay within MAX_CUE_GAP but the span passes 3.5s
        let words = evenly_spaced(8, 0.6, 0.3);
        let cues = group_cues(&words);
        assert!(cues.len() > 1);
        for cue in &cues {
            assert!(cue.end - cue.start <= MAX_CUE_SPAN + 1e-9);
        }
    }

    #[test]
    fn test_thirteenth_word_starts_new_cue() {
        let words = evenly_spaced(13, 0.25, 0.1);
        let cues = group_cues(&words);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].words.len(), 12);
        assert_eq!(cues[1].words.len(), 1);
        assert!((cues[1].start - 3.0).abs() < 1e-9);
    }
}
