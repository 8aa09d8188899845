//! Shared fixtures for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::path::Path;

use tabu_core::config::PipelineConfig;
use tabu_core::generator::{FetchOutcome, FetchRequest, KnowledgeSource, RawRow};

pub const CARDS_PER_CATEGORY: usize = 500;

/// Difficulty label for position `i` of a 500-card category: 175/225/100
fn label_for(i: usize) -> &'static str {
    match i {
        0..=174 => "easy",
        175..=399 => "medium",
        _ => "hard",
    }
}

pub fn card(word: &str, difficulty: &str) -> Value {
    json!({
        "Kelime": word,
        "Yasaklılar": ["alfa", "beta", "gama", "delta", "epsilon"],
        "Zorluk": difficulty
    })
}

pub fn word_for(category_index: usize, i: usize) -> String {
    format!("Kart {category_index} Numara {i}")
}

/// A catalog passing every validation rule: the ten default categories,
/// 500 unique cards each, inside the ratio bands
pub fn compliant_catalog(config: &PipelineConfig) -> Value {
    let mut root = Map::new();
    for (c, name) in config.category_names().into_iter().enumerate() {
        let entries = (0..CARDS_PER_CATEGORY)
            .map(|i| card(&word_for(c, i), label_for(i)))
            .collect();
        root.insert(name.to_string(), Value::Array(entries));
    }
    Value::Object(root)
}

/// Manifest with one record per catalog word
pub fn manifest_for(catalog: &Value) -> Value {
    let mut items = Map::new();
    let mut categories = Map::new();
    for (name, entries) in catalog.as_object().expect("catalog object") {
        let records: Vec<Value> = entries
            .as_array()
            .expect("category array")
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                json!({
                    "Kelime": entry["Kelime"].clone(),
                    "Wikidata": format!("http://www.wikidata.org/entity/Q{}", 100_000 + i)
                })
            })
            .collect();
        categories.insert(
            name.clone(),
            json!({"queryClauses": [], "fetchedRows": records.len(), "selectedRows": records.len()}),
        );
        items.insert(name.clone(), Value::Array(records));
    }
    json!({
        "generatedAt": "2026-10-14T00:00:00Z",
        "source": "Wikidata",
        "categories": categories,
        "items": items
    })
}

pub fn write(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Knowledge source producing `rows_per_category` distinct rows for every
/// category, with noise rows mixed in
pub struct SyntheticSource {
    config: PipelineConfig,
    rows_per_category: usize,
}

impl SyntheticSource {
    pub fn new(config: &PipelineConfig, rows_per_category: usize) -> Self {
        Self {
            config: config.clone(),
            rows_per_category,
        }
    }

    fn rows(&self, category: &str) -> Vec<RawRow> {
        let index = self
            .config
            .categories
            .iter()
            .position(|c| c.name == category)
            .unwrap_or(usize::MAX);
        (0..self.rows_per_category)
            .map(|i| {
                let label = match i % 10 {
                    3 => format!("Q{i}"),
                    7 => format!("Turnuva {index} Sezon 2019 ({i})"),
                    _ => format!("Örnek {index} Başlık {i} (kavram)"),
                };
                RawRow::new(
                    format!("http://www.wikidata.org/entity/Q{index}{i:04}"),
                    label,
                    "kısa bir açıklama metni",
                )
            })
            .collect()
    }
}

#[async_trait]
impl KnowledgeSource for SyntheticSource {
    async fn fetch_batch(&self, request: &FetchRequest<'_>) -> FetchOutcome {
        FetchOutcome::Success(
            self.rows(request.category)
                .into_iter()
                .skip(request.offset)
                .take(request.limit)
                .collect(),
        )
    }

    fn name(&self) -> &str {
        "Wikidata"
    }
}

/// Default configuration without inter-page delays
pub fn fast_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.fetch.batch_delay_ms = 0;
    config.fetch.retry.backoff_base_ms = 0;
    config
}
