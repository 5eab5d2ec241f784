//! Word timestamps, token normalization, and text joining.

use serde::{Deserialize, Serialize};

/// A single transcribed word with chunk-relative timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordItem {
    /// Start time in seconds, relative to the chunk.
    pub start: f64,
    /// End time in seconds, relative to the chunk.
    pub end: f64,
    /// Raw token text as emitted by the transcriber.
    pub text: String,
}

/// A transcribed word translated onto the absolute timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedWord {
    /// Absolute start time in seconds.
    pub abs_start: f64,
    /// Absolute end time in seconds.
    pub abs_end: f64,
    /// Raw token text.
    pub text: String,
    /// Index of the chunk this word came from.
    pub source_chunk: usize,
    /// Original chunk-relative start.
    pub rel_start: f64,
    /// Original chunk-relative end.
    pub rel_end: f64,
}

impl MergedWord {
    /// Translate a chunk-relative word by the chunk's absolute offset.
    pub fn from_relative(word: &WordItem, offset: f64, source_chunk: usize) -> Self {
        Self {
            abs_start: offset + word.start,
            abs_end: offset + word.end,
            text: word.text.clone(),
            source_chunk,
            rel_start: word.start,
            rel_end: word.end,
        }
    }
}

/// A group of words rendered as one subtitle cue.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    /// Cue start time in seconds.
    pub start: f64,
    /// Cue end time in seconds.
    pub end: f64,
    /// Ordered word tokens.
    pub words: Vec<String>,
}

impl SubtitleCue {
    /// Render the cue's words as display text.
    pub fn text(&self) -> String {
        join_words(&self.words)
    }
}

/// Normalize a token for filler matching: lowercase and strip leading and
/// trailing punctuation/symbol characters. Returns an empty string when
/// nothing alphanumeric remains.
pub fn normalize_token(text: &str) -> String {
    text.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn is_bare_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_alphanumeric(),
        _ => false,
    }
}

fn leads_with_apostrophe(token: &str) -> bool {
    token.starts_with('\'') || token.starts_with('\u{2019}')
}

/// Join word tokens for display.
///
/// No separating space is inserted before a token that is a single
/// punctuation or closing character, and none around an apostrophe-leading
/// token (so `l` + `'autre` renders as `l'autre`).
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    let mut out = String::new();
    for word in words {
        let token = word.as_ref();
        if token.is_empty() {
            continue;
        }
        if !out.is_empty() && !is_bare_punctuation(token) && !leads_with_apostrophe(token) {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}
