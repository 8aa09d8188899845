//! Catalog Validator - read-only compliance check of a catalog file
//!
//! Every rule runs over the same [`CatalogSnapshot`]. Violations are
//! collected exhaustively and reported in file reading order: root-level
//! findings first, then per category its header checks, its entries in
//! index order, and finally its ratio checks.

use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

pub mod rules;
pub mod snapshot;


use crate::catalog::{Difficulty, DifficultyCounts};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::text::ContentFilter;
use rules::*;
pub use snapshot::{CardView, CatalogSnapshot, CategorySnapshot, EntryKind, EntrySnapshot};

/// Where within the catalog a violation applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    /// Category-wide checks made before reading entries
    Header,
    Entry(usize),
    /// Category-wide checks made after reading entries
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Location {
    Root,
    Category { rank: usize, slot: Slot },
}

/// A single compliance finding
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub rule_id: &'static str,
    pub location: Location,
    pub message: String,
}

impl Violation {
    pub fn at(rule_id: &'static str, location: Location, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Trait for catalog rules
pub trait CatalogRule: Send + Sync {
    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation>;

    fn rule_id(&self) -> &'static str;

    fn description(&self) -> &'static str;
}

/// Difficulty distribution of one expected category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub name: String,
    pub entries: usize,
    pub difficulties: DifficultyCounts,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub summaries: Vec<CategorySummary>,
    pub category_count: usize,
    pub total_entries: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Failure listing: header, at most `limit` violations, then the total
    /// when some were left out
    pub fn failure_lines(&self, limit: usize) -> Vec<String> {
        let mut lines = vec!["Katalog doğrulaması başarısız.".to_string()];
        lines.extend(self.violations.iter().take(limit).map(|v| format!("- {v}")));
        if self.violations.len() > limit {
            lines.push(format!(
                "Toplam hata: {} (gösterilmeyen: {})",
                self.violations.len(),
                self.violations.len() - limit
            ));
        }
        lines
    }

    pub fn success_lines(&self, path: &str) -> Vec<String> {
        let mut lines = vec![
            "Katalog doğrulaması başarılı.".to_string(),
            format!("Dosya: {path}"),
            format!("Kategori sayısı: {}", self.category_count),
            format!("Toplam kart: {}", self.total_entries),
        ];
        lines.extend(
            self.summaries
                .iter()
                .map(|s| format!("- {}: {} ({})", s.name, s.entries, s.difficulties)),
        );
        lines
    }
}

pub struct CatalogValidator<'a> {
    config: &'a PipelineConfig,
    filter: ContentFilter,
    rules: Vec<Box<dyn CatalogRule>>,
}

impl<'a> CatalogValidator<'a> {
    /// Validator with the full rule set
    pub fn new(config: &'a PipelineConfig) -> Self {
        let rules: Vec<Box<dyn CatalogRule>> = vec![
            Box::new(CategorySetRule),
            Box::new(CategoryShapeRule),
            Box::new(CategorySizeRule),
            Box::new(EntryShapeRule),
            Box::new(WordValidityRule),
            Box::new(WordUniquenessRule),
            Box::new(ForbiddenWordsRule),
            Box::new(DifficultyLabelRule),
            Box::new(DifficultyRatioRule),
        ];
        Self::with_rules(config, rules)
    }

    pub fn with_rules(config: &'a PipelineConfig, rules: Vec<Box<dyn CatalogRule>>) -> Self {
        Self {
            config,
            filter: ContentFilter::new(&config.filter),
            rules,
        }
    }

    /// Check `root`; only a non-object root is an error
    pub fn validate(&self, root: &Value) -> Result<ValidationReport> {
        let snapshot = CatalogSnapshot::build(root, self.config, &self.filter)?;

        let mut violations = Vec::new();
        for rule in &self.rules {
            let found = rule.check(&snapshot);
            debug!("Rule '{}' reported {} violation(s)", rule.rule_id(), found.len());
            violations.extend(found);
        }
        violations.sort_by_key(|v| v.location);

        let summaries = snapshot
            .categories
            .iter()
            .map(|category| CategorySummary {
                name: category.name.to_string(),
                entries: category.entries.as_ref().map_or(0, Vec::len),
                difficulties: label_counts(category),
            })
            .collect();

        info!(
            "Validated {} categories: {} violation(s)",
            snapshot.categories.len(),
            violations.len()
        );
        Ok(ValidationReport {
            violations,
            summaries,
            category_count: snapshot.key_count,
            total_entries: snapshot.total_entries,
        })
    }
}

/// Counts of exactly-labelled difficulties among a category's cards
pub(crate) fn label_counts(category: &CategorySnapshot<'_>) -> DifficultyCounts {
    let mut counts = DifficultyCounts::default();
    for (_, card) in category.cards() {
        if let Some(difficulty) = exact_label(card.difficulty) {
            counts.add(difficulty);
        }
    }
    counts
}

/// Stored labels must match exactly; no trimming or case folding
pub(crate) fn exact_label(value: Option<&Value>) -> Option<Difficulty> {
    let label = value?.as_str()?;
    Difficulty::ALL.into_iter().find(|d| d.as_str() == label)
}
