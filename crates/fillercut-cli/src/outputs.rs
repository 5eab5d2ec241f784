//! Flat-file outputs: segment manifest, transcripts, subtitles.

use std::path::Path;

use fillercut_models::{format_srt, join_words, MergedWord, Segment, SubtitleCue};

use crate::error::{PipelineError, PipelineResult};

/// Manifest file name inside the chunk directory.
pub const MANIFEST_FILE: &str = "segments.json";
/// Plain transcript file name.
pub const TRANSCRIPT_FILE: &str = "transcript.txt";
/// Absolute timestamped transcript file name.
pub const TIMESTAMPS_FILE: &str = "transcript_timestamps.txt";
/// Subtitle file name.
pub const SUBTITLES_FILE: &str = "subtitles.srt";

/// Extension for per-chunk word-timestamp files, next to each chunk file.
pub const WORDS_EXT: &str = "words.txt";

/// Write the ordered segment list as a JSON manifest.
pub async fn write_manifest(path: impl AsRef<Path>, segments: &[Segment]) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(segments)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Read a segment manifest.
pub async fn read_manifest(path: impl AsRef<Path>) -> PipelineResult<Vec<Segment>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::ManifestNotFound(path.to_path_buf()));
    }
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}

/// Render the plain transcript: words of each chunk space-joined, one chunk
/// per line, empty chunks skipped.
pub fn render_plain_transcript(words: &[MergedWord]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current_chunk: Option<usize> = None;
    let mut tokens: Vec<&str> = Vec::new();

    for word in words {
        if current_chunk != Some(word.source_chunk) {
            if !tokens.is_empty() {
                lines.push(join_words(&tokens));
                tokens.clear();
            }
            current_chunk = Some(word.source_chunk);
        }
        tokens.push(&word.text);
    }
    if !tokens.is_empty() {
        lines.push(join_words(&tokens));
    }

    lines.join("\n")
}

/// Render one `[start -> end] word` line per word with 3-decimal seconds.
pub fn render_timestamped_transcript(words: &[MergedWord]) -> String {
    words
        .iter()
        .map(|w| format!("[{:.3} -> {:.3}] {}", w.abs_start, w.abs_end, w.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render cues in SRT format.
pub fn render_srt(cues: &[SubtitleCue]) -> String {
    let mut out = String::new();
    for (i, cue) in cues.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_srt(cue.start),
            format_srt(cue.end),
            cue.text()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fillercut_models::Segment;

    fn word(chunk: usize, start: f64, end: f64, text: &str) -> MergedWord {
        MergedWord {
            abs_start: start,
            abs_end: end,
            text: text.to_string(),
            source_chunk: chunk,
            rel_start: start,
            rel_end: end,
        }
    }

    #[tokio::test]
    async fn test_manifest_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        let segments = vec![
            Segment::new(0, "chunk_0000.wav", 0.0, 4.0),
            Segment::new(1, "chunk_0001.wav", 4.0, 10.0),
        ];

        write_manifest(&path, &segments).await.unwrap();
        let back = read_manifest(&path).await.unwrap();

        assert_eq!(back.len(), 2);
        assert_eq!(back[1].file, "chunk_0001.wav");
        assert!((back[1].end_s - 10.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let err = read_manifest("/nonexistent/segments.json").await.unwrap_err();
        assert!(matches!(err, PipelineError::ManifestNotFound(_)));
    }

    #[test]
    fn test_plain_transcript_chunk_lines() {
        let words = vec![
            word(0, 0.0, 0.3, "bonjour"),
            word(0, 0.4, 0.6, "tout"),
            word(2, 10.0, 10.3, "le"),
            word(2, 10.4, 10.8, "monde"),
        ];
        assert_eq!(render_plain_transcript(&words), "bonjour tout\nle monde");
    }

    #[test]
    fn test_plain_transcript_empty() {
        assert_eq!(render_plain_transcript(&[]), "");
    }

    #[test]
    fn test_timestamped_transcript_format() {
        let words = vec![word(0, 0.0, 0.5, "heu")];
        assert_eq!(render_timestamped_transcript(&words), "[0.000 -> 0.500] heu");
    }

    #[test]
    fn test_srt_format() {
        let cues = vec![
            SubtitleCue {
                start: 0.0,
                end: 1.5,
                words: vec!["bonjour".into(), ",".into(), "monde".into()],
            },
            SubtitleCue {
                start: 2.0,
                end: 3.0,
                words: vec!["fin".into()],
            },
        ];

        let srt = render_srt(&cues);
        let expected = "1\n00:00:00,000 --> 00:00:01,500\nbonjour, monde\n\n\
                        2\n00:00:02,000 --> 00:00:03,000\nfin\n\n";
        assert_eq!(srt, expected);
    }
}
