//! Catalog and source manifest alignment
//!
//! Every catalog word must be backed by exactly one provenance record in
//! the manifest of the same category.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::info;

use crate::catalog::fields;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::text::normalize;
use crate::validator::rules::format_percent;

/// Match statistics of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentSummary {
    pub category: String,
    pub catalog_words: usize,
    pub source_words: usize,
    pub matched: usize,
    /// Percentage, rounded to two decimals
    pub ratio: f64,
}

impl AlignmentSummary {
    pub fn render(&self) -> String {
        format!(
            "- {}: catalog={}, sources={}, matched={}, ratio=%{}",
            self.category,
            self.catalog_words,
            self.source_words,
            self.matched,
            format_percent(self.ratio, 2)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlignmentReport {
    pub violations: Vec<String>,
    pub summaries: Vec<AlignmentSummary>,
}

impl AlignmentReport {
    pub fn is_aligned(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn failure_lines(&self, limit: usize) -> Vec<String> {
        let mut lines = vec!["Kaynak hizalama doğrulaması başarısız.".to_string()];
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

    pub fn success_lines(&self, catalog_path: &str, manifest_path: &str) -> Vec<String> {
        let mut lines = vec![
            "Kaynak hizalama doğrulaması başarılı.".to_string(),
            format!("Kelimeler: {catalog_path}"),
            format!("Kaynak: {manifest_path}"),
        ];
        lines.extend(self.summaries.iter().map(AlignmentSummary::render));
        lines
    }
}

pub struct AlignmentChecker<'a> {
    config: &'a PipelineConfig,
}

impl<'a> AlignmentChecker<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, catalog: &Value, manifest: &Value) -> Result<AlignmentReport> {
        let catalog = catalog.as_object().ok_or_else(|| {
            PipelineError::MalformedInput("Kelimeler.json kökü bir nesne (hash) olmalı.".to_string())
        })?;
        let manifest = manifest.as_object().ok_or_else(|| {
            PipelineError::MalformedInput(
                "Kelimeler.sources.json kökü bir nesne (hash) olmalı.".to_string(),
            )
        })?;
        let items = manifest
            .get(fields::ITEMS)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                PipelineError::MalformedInput(
                    "Kelimeler.sources.json içinde 'items' nesnesi bulunamadı.".to_string(),
                )
            })?;

        let expected = self.config.category_names();
        let mut report = AlignmentReport::default();
        report_category_set(&mut report.violations, "Kelimeler.json", catalog, &expected);
        report_category_set(&mut report.violations, "Kelimeler.sources.json", items, &expected);

        for category in &expected {
            let Some(catalog_entries) = catalog.get(*category).and_then(Value::as_array) else {
                report
                    .violations
                    .push(format!("{category}: Kelimeler.json kategori değeri dizi olmalı."));
                continue;
            };
            let Some(source_entries) = items.get(*category).and_then(Value::as_array) else {
                report
                    .violations
                    .push(format!("{category}: Kelimeler.sources.json kategori değeri dizi olmalı."));
                continue;
            };

            let sources = index_sources(category, source_entries, &mut report.violations);
            let summary = match_catalog(category, catalog_entries, &sources, &mut report.violations);
            if summary.matched != summary.catalog_words {
                report.violations.push(format!(
                    "{category}: eşleşme oranı %{} (%100 bekleniyor).",
                    format_percent(summary.ratio, 2)
                ));
            }
            report.summaries.push(summary);
        }

        info!(
            "Alignment checked for {} categories: {} violation(s)",
            report.summaries.len(),
            report.violations.len()
        );
        Ok(report)
    }
}

fn report_category_set(
    violations: &mut Vec<String>,
    file: &str,
    object: &Map<String, Value>,
    expected: &[&str],
) {
    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|name| !object.contains_key(*name))
        .collect();
    let extra: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !expected.contains(key))
        .collect();

    if !missing.is_empty() {
        violations.push(format!("{file} eksik kategoriler: {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        violations.push(format!("{file} fazla kategoriler: {}", extra.join(", ")));
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

/// Normalized word -> external id for the usable manifest records
fn index_sources<'v>(
    category: &str,
    entries: &'v [Value],
    violations: &mut Vec<String>,
) -> HashMap<String, &'v str> {
    let mut sources = HashMap::new();

    for (index, item) in entries.iter().enumerate() {
        let at = format!("{category}/sources[{index}]");
        let Some(record) = item.as_object() else {
            violations.push(format!("{at}: kayıt nesne olmalı."));
            continue;
        };
        let Some(word) = non_blank(record.get(fields::WORD)) else {
            violations.push(format!("{at}: Kelime alanı boş/geçersiz."));
            continue;
        };
        let Some(external_id) = non_blank(record.get(fields::EXTERNAL_ID)) else {
            violations.push(format!("{at} '{word}': Wikidata alanı boş/geçersiz."));
            continue;
        };
        let normalized = normalize(word);
        if normalized.is_empty() {
            violations.push(format!("{at} '{word}': normalize sonrası boş."));
            continue;
        }
        if sources.contains_key(&normalized) {
            violations.push(format!("{at} '{word}': sources içinde duplicate kelime."));
            continue;
        }
        sources.insert(normalized, external_id);
    }
    sources
}

fn match_catalog(
    category: &str,
    entries: &[Value],
    sources: &HashMap<String, &str>,
    violations: &mut Vec<String>,
) -> AlignmentSummary {
    let mut words = HashSet::new();
    let mut matched = 0;

    for (index, item) in entries.iter().enumerate() {
        let at = format!("{category}/catalog[{index}]");
        let Some(entry) = item.as_object() else {
            violations.push(format!("{at}: kayıt nesne olmalı."));
            continue;
        };
        let Some(word) = non_blank(entry.get(fields::WORD)) else {
            violations.push(format!("{at}: Kelime alanı boş/geçersiz."));
            continue;
        };
        let normalized = normalize(word);
        if normalized.is_empty() {
            violations.push(format!("{at} '{word}': normalize sonrası boş."));
            continue;
        }
        if words.contains(&normalized) {
            violations.push(format!("{at} '{word}': katalog içinde duplicate kelime."));
            continue;
        }
        if sources.contains_key(&normalized) {
            matched += 1;
        } else {
            violations.push(format!("{category}/catalog '{word}': sources eşleşmesi bulunamadı."));
        }
        words.insert(normalized);
    }

    let ratio = if words.is_empty() {
        0.0
    } else {
        round2(matched as f64 / words.len() as f64 * 100.0)
    };
    AlignmentSummary {
        category: category.to_string(),
        catalog_words: words.len(),
        source_words: sources.len(),
        matched,
        ratio,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
