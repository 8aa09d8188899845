//! Pipeline configuration
//!
//! Every tunable of the pipeline lives here. The built-in defaults are the
//! production values; a YAML file passed with `--config` overrides only the
//! fields it names.
//!
//! ```yaml
//! generation:
//!   target_count: 300
//! fetch:
//!   batch_delay_ms: 500
//!   retry:
//!     max_attempts: 6
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

mod defaults;

use crate::error::{PipelineError, Result};

/// A target category with its fallback terms and knowledge base clauses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpec {
    /// Display name, also the catalog key (e.g. "Tarih")
    pub name: String,

    /// Hand-curated domain terms used as distractor seeds and fallbacks
    pub terms: Vec<String>,

    /// Structural query clauses, combined with UNION
    #[serde(default)]
    pub query_clauses: Vec<String>,
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub categories: Vec<CategorySpec>,
    pub filter: FilterConfig,
    pub stopwords: Vec<String>,
    pub generation: GenerationConfig,
    pub curation: CurationConfig,
    pub validation: ValidationConfig,
    pub difficulty: DifficultyConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Marketing filler phrases disallowed as words or distractors
    pub generic_banned: Vec<String>,
    /// Content-safety blocklist
    pub sensitive: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub target_count: usize,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub max_significant_tokens: usize,
    pub label_token_seeds: usize,
    pub description_token_seeds: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    pub max_per_category: usize,
    pub max_word_length: usize,
    pub max_letter_tokens: usize,
    pub label_token_seeds: usize,
}

/// Inclusive ratio band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RatioBand {
    pub min: f64,
    pub max: f64,
}

impl RatioBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioBands {
    pub easy: RatioBand,
    pub medium: RatioBand,
    pub hard: RatioBand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_count: usize,
    pub max_count: usize,
    pub max_word_length: usize,
    pub max_letter_tokens: usize,
    pub ratio_bands: RatioBands,
    /// How many violations the CLI prints before summarising the rest
    pub display_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub easy_ratio: f64,
    pub medium_ratio: f64,
    /// Heuristic score below this is easy
    pub easy_below: usize,
    /// Heuristic score below this (and not easy) is medium
    pub medium_below: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub languages: String,
    pub batch_size: usize,
    pub max_offset: usize,
    /// Raw rows to collect per target entry before harvesting stops
    pub row_multiplier: usize,
    pub batch_delay_ms: u64,
    pub timeout_secs: u64,
    pub retry: RetryConfig,
}

impl FetchConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PipelineConfig {
    /// Load configuration, falling back to defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&content).map_err(|e| match e {
            PipelineError::Config(message) => {
                PipelineError::Config(format!("{}: {message}", path.display()))
            }
            other => other,
        })?;

        debug!("Loaded pipeline config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration overrides from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(content)
            .map_err(|e| PipelineError::Config(format!("invalid YAML: {e}")))?;
        config.check()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with
    pub fn check(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(PipelineError::Config(
                "at least one category is required".to_string(),
            ));
        }
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(PipelineError::Config("category name is empty".to_string()));
            }
            if category.terms.is_empty() {
                return Err(PipelineError::Config(format!(
                    "category '{}' has no fallback terms",
                    category.name
                )));
            }
        }
        if self.difficulty.easy_ratio + self.difficulty.medium_ratio > 1.0 {
            return Err(PipelineError::Config(
                "easy_ratio + medium_ratio must not exceed 1.0".to_string(),
            ));
        }
        if self.fetch.retry.max_attempts == 0 {
            return Err(PipelineError::Config(
                "fetch.retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn category(&self, name: &str) -> Option<&CategorySpec> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Fallback terms for a category; unknown categories have none
    pub fn terms_for(&self, name: &str) -> &[String] {
        self.category(name)
            .map(|c| c.terms.as_slice())
            .unwrap_or(&[])
    }

    /// Target category names in processing order
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_ten_categories_with_ten_terms() {
        let config = PipelineConfig::default();
        assert_eq!(config.categories.len(), 10);
        for category in &config.categories {
            assert_eq!(category.terms.len(), 10, "{}", category.name);
            assert!(!category.query_clauses.is_empty(), "{}", category.name);
        }
        assert_eq!(config.category_names()[0], "Diziler & Filmler");
        assert_eq!(config.category_names()[9], "Sanat");
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let config = PipelineConfig::from_yaml(
            "generation:\n  target_count: 20\nfetch:\n  retry:\n    max_attempts: 2\n",
        )
        .unwrap();

        assert_eq!(config.generation.target_count, 20);
        assert_eq!(config.generation.max_word_length, 48);
        assert_eq!(config.fetch.retry.max_attempts, 2);
        assert_eq!(config.fetch.retry.backoff_base_ms, 1000);
        assert_eq!(config.fetch.batch_size, 700);
        assert_eq!(config.categories.len(), 10);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = PipelineConfig::from_yaml("  \n").unwrap();
        assert_eq!(config.validation.min_count, 450);
    }

    #[test]
    fn test_invalid_ratios_rejected() {
        let result = PipelineConfig::from_yaml("difficulty:\n  easy_ratio: 0.7\n  medium_ratio: 0.5\n");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = PipelineConfig::load(Some(Path::new("/nonexistent/tabu.yaml")));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_terms_for_unknown_category_is_empty() {
        let config = PipelineConfig::default();
        assert!(config.terms_for("Bilinmeyen").is_empty());
        assert_eq!(config.terms_for("Spor")[0], "spor");
    }

    #[test]
    fn test_ratio_band_inclusive() {
        let band = RatioBand::new(0.25, 0.45);
        assert!(band.contains(0.25));
        assert!(band.contains(0.45));
        assert!(!band.contains(0.451));
    }

    #[test]
    fn test_invalid_file_names_path_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tabu.yaml");
        std::fs::write(&path, "generation:\n  target_count: [\n").unwrap();

        let err = PipelineConfig::load(Some(&path)).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with(&format!("Configuration error: {}: invalid YAML", path.display())));
        assert_eq!(message.matches("Configuration error").count(), 1);
    }
}
