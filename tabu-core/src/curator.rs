//! Re-cleaning an existing catalog
//!
//! Reads an untyped catalog, drops entries that violate the content rules,
//! rebuilds forbidden word lists and normalizes difficulty labels. The
//! category order of the input file is kept.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::catalog::{fields, Catalog, OrderedMap, TermEntry};
use crate::config::PipelineConfig;
use crate::difficulty::DifficultyClassifier;
use crate::distractors::DistractorSynthesizer;
use crate::error::{PipelineError, Result};
use crate::text::{letter_tokens, normalize, ContentFilter, Tokenizer};

/// Per-category tally of what curation kept and why it dropped the rest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CurationStats {
    pub kept: usize,
    pub not_object: usize,
    pub invalid_word: usize,
    pub duplicate: usize,
    pub insufficient_distractors: usize,
    /// Entries left unread once the category cap was reached
    pub over_cap: usize,
}

impl CurationStats {
    pub fn dropped(&self) -> usize {
        self.not_object + self.invalid_word + self.duplicate + self.insufficient_distractors + self.over_cap
    }

    /// Drop tally as printed after a curation run
    pub fn drop_summary(&self) -> String {
        format!(
            "düşürülen={} (geçersiz={}, tekrar={}, nesne değil={}, yasaklı yetersiz={}, limit={})",
            self.dropped(),
            self.invalid_word,
            self.duplicate,
            self.not_object,
            self.insufficient_distractors,
            self.over_cap
        )
    }
}

#[derive(Debug, Clone)]
pub struct CurationOutcome {
    pub catalog: Catalog,
    pub stats: OrderedMap<CurationStats>,
    /// Keys whose value was not an array
    pub skipped_categories: Vec<String>,
}

pub struct Curator<'a> {
    config: &'a PipelineConfig,
    filter: ContentFilter,
    tokenizer: Tokenizer,
}

impl<'a> Curator<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            filter: ContentFilter::new(&config.filter),
            tokenizer: Tokenizer::new(&config.stopwords),
        }
    }

    /// Whether `word` (already trimmed) may stay in a curated catalog
    pub fn is_valid_word(&self, word: &str) -> bool {
        let limits = &self.config.curation;
        if word.is_empty() || word.chars().count() > limits.max_word_length {
            return false;
        }
        if self.filter.is_blocked(word) {
            return false;
        }
        let tokens = letter_tokens(word).len();
        tokens > 0 && tokens <= limits.max_letter_tokens
    }

    pub fn curate(&self, input: &Value) -> Result<CurationOutcome> {
        let root = input
            .as_object()
            .ok_or_else(|| PipelineError::MalformedInput("Katalog kökü hash olmalı.".to_string()))?;

        let synthesizer = DistractorSynthesizer::new(self.config, &self.filter, &self.tokenizer);
        let classifier = DifficultyClassifier::new(&self.config.difficulty, &self.tokenizer);

        let mut catalog = Catalog::new();
        let mut stats = OrderedMap::new();
        let mut skipped_categories = Vec::new();
        let mut global_seen = HashSet::new();

        for (category, value) in root {
            let Some(entries) = value.as_array() else {
                warn!("Skipping '{}': value is not an array", category);
                skipped_categories.push(category.clone());
                continue;
            };

            let mut tally = CurationStats::default();
            let mut local_seen = HashSet::new();
            let mut cleaned = Vec::new();

            for (index, entry) in entries.iter().enumerate() {
                if cleaned.len() >= self.config.curation.max_per_category {
                    tally.over_cap = entries.len() - index;
                    break;
                }
                let Some(object) = entry.as_object() else {
                    tally.not_object += 1;
                    continue;
                };

                let word = word_of(object);
                if !self.is_valid_word(&word) {
                    tally.invalid_word += 1;
                    continue;
                }
                let normalized = normalize(&word);
                if normalized.is_empty() {
                    tally.invalid_word += 1;
                    continue;
                }
                if local_seen.contains(&normalized) || global_seen.contains(&normalized) {
                    tally.duplicate += 1;
                    continue;
                }

                let raw = raw_forbidden(object);
                let pool = synthesizer.curation_pool(&word, &raw, category);
                let Some(forbidden) = synthesizer.build(&word, &pool, category) else {
                    tally.insufficient_distractors += 1;
                    continue;
                };

                let label = object.get(fields::DIFFICULTY).and_then(Value::as_str);
                let difficulty = classifier.resolve_upstream(label, &word);

                local_seen.insert(normalized.clone());
                global_seen.insert(normalized);
                cleaned.push(TermEntry::new(word, forbidden, difficulty));
            }

            tally.kept = cleaned.len();
            debug!("'{}': kept {}, dropped {}", category, tally.kept, tally.dropped());
            catalog.insert_category(category.clone(), cleaned);
            stats.insert(category.clone(), tally);
        }

        info!(
            "Curated {} cards across {} categories",
            catalog.total_entries(),
            catalog.category_count()
        );
        Ok(CurationOutcome {
            catalog,
            stats,
            skipped_categories,
        })
    }
}

/// `Kelime` rendered as text: strings as-is, numbers and booleans printed,
/// anything else empty
fn word_of(object: &Map<String, Value>) -> String {
    match object.get(fields::WORD) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// String members of `Yasaklılar`; a missing or non-array value is empty
fn raw_forbidden(object: &Map<String, Value>) -> Vec<String> {
    object
        .get(fields::FORBIDDEN)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Difficulty;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn curate(input: Value) -> CurationOutcome {
        let config = PipelineConfig::default();
        Curator::new(&config).curate(&input).unwrap()
    }

    #[test]
    fn test_non_object_root_is_malformed() {
        let config = PipelineConfig::default();
        let err = Curator::new(&config).curate(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput(ref m) if m == "Katalog kökü hash olmalı."));
    }

    #[test]
    fn test_clean_entry_is_kept_and_relabelled() {
        let outcome = curate(json!({
            "Spor": [
                {"Kelime": "  Futbol ", "Yasaklılar": ["gol", "kale", "hakem", "ofsayt", "korner"], "Zorluk": "EASY"}
            ]
        }));
        let entries = outcome.catalog.category("Spor").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "Futbol");
        assert_eq!(entries[0].forbidden_words, vec!["gol", "kale", "hakem", "ofsayt", "korner"]);
        assert_eq!(entries[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_drops_are_counted_by_reason() {
        let outcome = curate(json!({
            "Spor": [
                "not an object",
                {"Kelime": "Basketbol", "Yasaklılar": []},
                {"Kelime": "basketbol"},
                {"Kelime": "Temel Kavramlar"},
                {"Kelime": ""},
                {"Yasaklılar": ["top"]},
                {"Kelime": "Voleybol", "Zorluk": "zor"}
            ]
        }));

        let stats = outcome.stats.get("Spor").unwrap();
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.not_object, 1);
        assert_eq!(stats.duplicate, 1);
        assert_eq!(stats.invalid_word, 3);
        assert_eq!(stats.dropped(), 5);
        assert_eq!(
            stats.drop_summary(),
            "düşürülen=5 (geçersiz=3, tekrar=1, nesne değil=1, yasaklı yetersiz=0, limit=0)"
        );

        let entries = outcome.catalog.category("Spor").unwrap();
        // unknown label falls back to the heuristic: "voleybol" 8 + 6
        assert_eq!(entries[1].difficulty, Difficulty::Easy);
        // empty raw list is topped up from the category terms
        assert_eq!(entries[0].forbidden_words, vec!["spor", "maç", "takım", "skor", "turnuva"]);
    }

    #[test]
    fn test_global_dedup_and_category_order() {
        let outcome = curate(json!({
            "Yemek": [{"Kelime": "Baklava"}],
            "Ayarlar": {"not": "a list"},
            "Sanat": [{"Kelime": "BAKLAVA"}, {"Kelime": "Mona Lisa"}]
        }));

        let order: Vec<&str> = outcome.catalog.category_names().collect();
        assert_eq!(order, vec!["Yemek", "Sanat"]);
        assert_eq!(outcome.skipped_categories, vec!["Ayarlar".to_string()]);
        assert_eq!(outcome.catalog.category("Sanat").unwrap()[0].word, "Mona Lisa");
        assert_eq!(outcome.stats.get("Sanat").unwrap().duplicate, 1);
    }

    #[test]
    fn test_category_cap() {
        let mut config = PipelineConfig::default();
        config.curation.max_per_category = 2;
        let input = json!({"Doğa": [
            {"Kelime": "Kartal"}, {"Kelime": "Şahin"}, {"Kelime": "Atmaca"}, {"Kelime": "Doğan"}
        ]});
        let outcome = Curator::new(&config).curate(&input).unwrap();
        assert_eq!(outcome.catalog.category("Doğa").unwrap().len(), 2);
        assert_eq!(outcome.stats.get("Doğa").unwrap().over_cap, 2);
    }

    #[test]
    fn test_unknown_category_without_distractors_is_dropped() {
        let outcome = curate(json!({"Bilinmeyen": [
            {"Kelime": "Tek", "Yasaklılar": ["bir", "iki"]}
        ]}));
        assert!(outcome.catalog.category("Bilinmeyen").unwrap().is_empty());
        assert_eq!(outcome.stats.get("Bilinmeyen").unwrap().insufficient_distractors, 1);
    }

    #[test]
    fn test_word_validity_limits() {
        let config = PipelineConfig::default();
        let curator = Curator::new(&config);
        assert!(curator.is_valid_word("Bir İki Üç Dört Beş Altı Yedi Sekiz Dokuz"));
        assert!(!curator.is_valid_word("Bir İki Üç Dört Beş Altı Yedi Sekiz Dokuz On"));
        assert!(!curator.is_valid_word(&"a".repeat(65)));
        assert!(curator.is_valid_word(&"a".repeat(64)));
        assert!(!curator.is_valid_word("1984"));
        assert!(!curator.is_valid_word("Sex Pistols"));
    }

    #[test]
    fn test_curating_is_idempotent() {
        let input = json!({
            "Müzik": [
                {"Kelime": "Bağlama", "Yasaklılar": ["saz", "tel", "tezene", "türkü", "halk"], "Zorluk": "medium"},
                {"Kelime": "Ud", "Yasaklılar": ["temel", "saz"]}
            ]
        });
        let first = curate(input);
        let second = curate(serde_json::to_value(&first.catalog).unwrap());
        assert_eq!(first.catalog, second.catalog);
    }
}
