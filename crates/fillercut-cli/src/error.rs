//! Pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Exit code for fatal input errors (bad paths, unparseable durations).
pub const EXIT_INPUT_ERROR: i32 = 2;
/// Exit code for runtime failures.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Segment manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Transcriber not found: {0}")]
    TranscriberNotFound(String),

    #[error("Media error: {0}")]
    Media(#[from] fillercut_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Map the error taxonomy onto process exit codes: fatal input errors
    /// get a distinguishing code, everything else exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::InputNotFound(_)
            | PipelineError::ManifestNotFound(_)
            | PipelineError::InvalidConfig(_) => EXIT_INPUT_ERROR,
            PipelineError::Media(e) if e.is_input_error() => EXIT_INPUT_ERROR,
            _ => EXIT_FAILURE,
        }
    }
}
