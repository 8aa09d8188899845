//! Turning raw knowledge base rows into catalog cards

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info};

use super::source::RawRow;
use crate::catalog::{CategoryQueryStats, Difficulty, SourceManifest, SourceRecord, TermEntry};
use crate::config::{CategorySpec, GenerationConfig, PipelineConfig};
use crate::difficulty::DifficultyClassifier;
use crate::distractors::DistractorSynthesizer;
use crate::error::{PipelineError, Result};
use crate::text::{normalize, ContentFilter, Tokenizer};

static TRAILING_PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("valid regex"));
static ENTITY_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Q\d+$").expect("valid regex"));
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}\b").expect("valid regex"));

/// Sports event and list page noise, matched against the normalized label
const EVENT_NOISE: &[&str] = &[
    " men s ",
    " women s ",
    " world championships ",
    " world aquatics championships ",
    " olympic games ",
    " olympiyatlar ",
];

const LONG_PHRASE_MARKERS: &[&str] = &[" at the ", " in the "];
const LONG_PHRASE_LIMIT: usize = 30;

/// Drop one trailing "(...)" disambiguator and collapse whitespace
pub fn clean_label(text: &str) -> String {
    let stripped = TRAILING_PARENTHETICAL.replace(text.trim(), "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Acceptance rules for a freshly harvested label
pub struct LabelPolicy<'a> {
    config: &'a GenerationConfig,
    filter: &'a ContentFilter,
    tokenizer: &'a Tokenizer,
}

impl<'a> LabelPolicy<'a> {
    pub fn new(config: &'a GenerationConfig, filter: &'a ContentFilter, tokenizer: &'a Tokenizer) -> Self {
        Self {
            config,
            filter,
            tokenizer,
        }
    }

    pub fn is_valid_label(&self, word: &str) -> bool {
        if word.is_empty() || self.filter.is_generic_banned(word) || ENTITY_ID.is_match(word) {
            return false;
        }

        let length = word.chars().count();
        if length < self.config.min_word_length || length > self.config.max_word_length {
            return false;
        }

        let normalized = normalize(word);
        if normalized.is_empty()
            || normalized.contains("wikimedia")
            || normalized.contains("disambiguation")
            || YEAR.is_match(&normalized)
        {
            return false;
        }
        if EVENT_NOISE.iter().any(|noise| normalized.contains(noise)) {
            return false;
        }
        if normalized.chars().count() > LONG_PHRASE_LIMIT
            && LONG_PHRASE_MARKERS.iter().any(|m| normalized.contains(m))
        {
            return false;
        }

        self.tokenizer.significant_count(word) <= self.config.max_significant_tokens
            && !self.filter.is_sensitive(word)
    }
}

/// State shared across categories of one generation run
#[derive(Debug)]
pub struct GenerationState {
    /// Normalized words accepted in earlier categories
    pub global_seen: HashSet<String>,
    pub manifest: SourceManifest,
}

impl GenerationState {
    pub fn new(manifest: SourceManifest) -> Self {
        Self {
            global_seen: HashSet::new(),
            manifest,
        }
    }
}

/// Builds one category's cards from its fetched rows
pub struct Harvester<'a> {
    config: &'a PipelineConfig,
    labels: LabelPolicy<'a>,
    synthesizer: DistractorSynthesizer<'a>,
    classifier: DifficultyClassifier<'a>,
}

impl<'a> Harvester<'a> {
    pub fn new(config: &'a PipelineConfig, filter: &'a ContentFilter, tokenizer: &'a Tokenizer) -> Self {
        Self {
            config,
            labels: LabelPolicy::new(&config.generation, filter, tokenizer),
            synthesizer: DistractorSynthesizer::new(config, filter, tokenizer),
            classifier: DifficultyClassifier::new(&config.difficulty, tokenizer),
        }
    }

    /// Take rows in order until the target count is reached, then rank
    /// difficulties and record provenance.
    ///
    /// A category that cannot reach the target leaves `state` untouched and
    /// fails with [`PipelineError::CategoryIncomplete`].
    pub fn harvest_category(
        &self,
        state: &mut GenerationState,
        category: &CategorySpec,
        rows: &[RawRow],
    ) -> Result<Vec<TermEntry>> {
        let target = self.config.generation.target_count;
        let mut local_seen = HashSet::new();
        let mut accepted: Vec<(TermEntry, String)> = Vec::with_capacity(target);

        for (row_index, row) in rows.iter().enumerate() {
            if accepted.len() >= target {
                break;
            }

            let word = clean_label(&row.label);
            if !self.labels.is_valid_label(&word) {
                continue;
            }
            let normalized = normalize(&word);
            if local_seen.contains(&normalized) || state.global_seen.contains(&normalized) {
                continue;
            }

            let seed = accepted.len() + row_index;
            let pool = self
                .synthesizer
                .generation_pool(&word, &row.description, &category.name, seed);
            let Some(forbidden) = self.synthesizer.build(&word, &pool, &category.name) else {
                continue;
            };

            local_seen.insert(normalized);
            accepted.push((
                TermEntry::new(word, forbidden, Difficulty::Medium),
                row.id.clone(),
            ));
        }

        if accepted.len() < target {
            return Err(PipelineError::CategoryIncomplete {
                category: category.name.clone(),
                found: accepted.len(),
                target,
            });
        }

        let words: Vec<&str> = accepted.iter().map(|(e, _)| e.word.as_str()).collect();
        let difficulties = self.classifier.assign_ranked(&words);

        let mut entries = Vec::with_capacity(accepted.len());
        let mut records = Vec::with_capacity(accepted.len());
        for ((mut entry, external_id), difficulty) in accepted.into_iter().zip(difficulties) {
            entry.difficulty = difficulty;
            records.push(SourceRecord {
                word: entry.word.clone(),
                external_id,
            });
            entries.push(entry);
        }

        state.global_seen.extend(local_seen);
        state.manifest.record_category(
            &category.name,
            CategoryQueryStats {
                query_clauses: category.query_clauses.clone(),
                fetched_rows: rows.len(),
                selected_rows: entries.len(),
            },
            records,
        );

        debug!("'{}': {} of {} rows accepted", category.name, entries.len(), rows.len());
        info!("Harvested {} cards for '{}'", entries.len(), category.name);
        Ok(entries)
    }
}
