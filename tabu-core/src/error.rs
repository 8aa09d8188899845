//! Pipeline error types

use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline failures.
///
/// Validation findings are never reported through this type; they are
/// collected as [`crate::validator::Violation`] values instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Knowledge base fetch failed after retries, or returned a fatal response
    #[error("Fetch failed for category '{category}' after {attempts} attempt(s): {message}")]
    Fetch {
        category: String,
        attempts: u32,
        message: String,
    },

    /// A category could not be filled to its target count
    #[error("Category '{category}' has only {found}/{target} verifiable entries")]
    CategoryIncomplete {
        category: String,
        found: usize,
        target: usize,
    },

    /// Input file has the wrong overall shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Whether this error came from the network side of the pipeline
    pub fn is_fetch(&self) -> bool {
        matches!(self, PipelineError::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
