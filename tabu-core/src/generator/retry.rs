//! Bounded retries and pagination over a [`KnowledgeSource`]

use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

use super::source::{FetchOutcome, FetchRequest, KnowledgeSource, RawRow};
use crate::config::{FetchConfig, RetryConfig};
use crate::error::{PipelineError, Result};

/// Linear backoff: the n-th failed attempt waits `backoff_base * n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.backoff_base_ms))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

/// Fetch one page, retrying transient failures up to the policy's limit
pub async fn fetch_with_retry(
    source: &dyn KnowledgeSource,
    request: &FetchRequest<'_>,
    policy: &RetryPolicy,
) -> Result<Vec<RawRow>> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match source.fetch_batch(request).await {
            FetchOutcome::Success(rows) => return Ok(rows),
            FetchOutcome::Fatal(message) => {
                return Err(PipelineError::Fetch {
                    category: request.category.to_string(),
                    attempts: attempt,
                    message,
                });
            }
            FetchOutcome::Retryable(message) => {
                if attempt >= policy.max_attempts {
                    return Err(PipelineError::Fetch {
                        category: request.category.to_string(),
                        attempts: attempt,
                        message,
                    });
                }
                let delay = policy.delay_for(attempt);
                warn!(
                    "Fetch for '{}' at offset {} failed (attempt {}/{}): {}; retrying in {:?}",
                    request.category, request.offset, attempt, policy.max_attempts, message, delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Collect up to `target * row_multiplier` distinct rows for a category.
///
/// Pages are requested strictly one after another. Harvesting stops on an
/// empty page or once the offset passes `max_offset`.
pub async fn fetch_category_rows(
    source: &dyn KnowledgeSource,
    category: &str,
    clauses: &[String],
    target: usize,
    config: &FetchConfig,
) -> Result<Vec<RawRow>> {
    let policy = RetryPolicy::from(&config.retry);
    let wanted = target.saturating_mul(config.row_multiplier);
    let batch_size = config.batch_size.max(1);

    let mut rows = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut offset = 0;

    while rows.len() < wanted && offset <= config.max_offset {
        let request = FetchRequest {
            category,
            clauses,
            limit: batch_size,
            offset,
        };
        let page = fetch_with_retry(source, &request, &policy).await?;
        if page.is_empty() {
            debug!("'{}': empty page at offset {}", category, offset);
            break;
        }

        let page_len = page.len();
        for row in page {
            if seen_ids.insert(row.id.clone()) {
                rows.push(row);
            }
        }
        debug!(
            "'{}': offset {} returned {} rows ({} distinct so far)",
            category,
            offset,
            page_len,
            rows.len()
        );

        offset += batch_size;
        tokio::time::sleep(config.batch_delay()).await;
    }

    Ok(rows)
}
