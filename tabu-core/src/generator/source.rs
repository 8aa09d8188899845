//! Knowledge base abstraction
//!
//! The generator only needs paged rows of (id, label, description). The
//! trait keeps the HTTP client out of the harvesting logic and lets tests
//! drive the generator from memory.

use async_trait::async_trait;

/// One result row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// External identifier (entity URI)
    pub id: String,
    pub label: String,
    pub description: String,
}

impl RawRow {
    pub fn new(id: impl Into<String>, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

/// One page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest<'a> {
    pub category: &'a str,
    pub clauses: &'a [String],
    pub limit: usize,
    pub offset: usize,
}

/// Result of a single attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Vec<RawRow>),
    /// Transient failure; the attempt may be repeated
    Retryable(String),
    /// Permanent failure; retrying cannot help
    Fatal(String),
}

#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Fetch one page. Implementations report failures through the outcome
    /// and never panic.
    async fn fetch_batch(&self, request: &FetchRequest<'_>) -> FetchOutcome;

    /// Value written to the manifest's `source` field
    fn name(&self) -> &str;
}
