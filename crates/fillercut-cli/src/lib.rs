//! Filler-word removal pipeline.
//!
//! The pipeline runs in three sequential stages, each also invocable on its
//! own: split the input into silence-aligned chunks, transcribe each chunk
//! with an external word-timestamp tool, then cut matched filler words out
//! of the video with a single re-encode.

pub mod cli;
pub mod config;
pub mod error;
pub mod merge;
pub mod outputs;
pub mod pipeline;
pub mod transcriber;

pub use error::{PipelineError, PipelineResult};
