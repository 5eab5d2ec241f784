//! External transcriber invocation and word-timestamp parsing.
//!
//! The transcriber is any command that takes a chunk path and prints one
//! line per word in the form `[<start> -> <end>] <text>` (the arrow may be
//! ASCII `->` or the Unicode glyph). The parser is lenient: lines that do
//! not match the pattern are counted and skipped, never fatal, because
//! speech tools interleave banners and diagnostics with their output.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use fillercut_models::WordItem;

use crate::error::{PipelineError, PipelineResult};

/// Raw output of one transcriber invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Whether the tool exited successfully.
    pub success: bool,
    /// Exit code when available.
    pub exit_code: Option<i32>,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

/// Capability interface for the external speech-to-text tool.
///
/// Tests substitute a fake; production uses [`CommandTranscriber`].
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, chunk: &Path) -> PipelineResult<ToolOutput>;
}

/// Runs a configured command with the chunk path appended as last argument.
pub struct CommandTranscriber {
    program: String,
    args: Vec<String>,
}

impl CommandTranscriber {
    /// Parse a command line of the form `program arg1 arg2 ...`.
    pub fn from_command_line(command: &str) -> PipelineResult<Self> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| PipelineError::InvalidConfig("empty transcriber command".into()))?
            .to_string();
        Ok(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }
}

#[async_trait]
impl Transcriber for CommandTranscriber {
    async fn transcribe(&self, chunk: &Path) -> PipelineResult<ToolOutput> {
        debug!(
            program = %self.program,
            chunk = %chunk.display(),
            "Invoking transcriber"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(chunk)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                PipelineError::TranscriberNotFound(format!("{}: {}", self.program, e))
            })?;

        Ok(ToolOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of lenient word-line parsing.
#[derive(Debug, Clone)]
pub struct ParsedWords {
    /// Accepted words, in input order.
    pub words: Vec<WordItem>,
    /// Lines that did not match the pattern or carried invalid times.
    pub skipped_lines: usize,
}

/// Parse `[<start> -> <end>] <text>` lines.
pub fn parse_word_lines(text: &str) -> ParsedWords {
    let line_re = Regex::new(
        r"^\[\s*([0-9]+(?:\.[0-9]+)?)\s*(?:->|\u{2192})\s*([0-9]+(?:\.[0-9]+)?)\s*\]\s*(\S.*?)\s*$",
    )
    .expect("valid regex");

    let mut words = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Some(caps) = line_re.captures(trimmed) else {
            skipped += 1;
            continue;
        };

        let start: f64 = caps[1].parse().unwrap_or(f64::NAN);
        let end: f64 = caps[2].parse().unwrap_or(f64::NAN);
        if !start.is_finite() || !end.is_finite() || end <= start {
            skipped += 1;
            continue;
        }

        words.push(WordItem {
            start,
            end,
            text: caps[3].to_string(),
        });
    }

    ParsedWords {
        words,
        skipped_lines: skipped,
    }
}
