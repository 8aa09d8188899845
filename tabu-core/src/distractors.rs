//! Forbidden word synthesis
//!
//! Every card needs exactly [`FORBIDDEN_WORD_COUNT`] forbidden words. They
//! are drawn from an ordered candidate pool and topped up from the
//! category's fallback terms. The walk is deterministic: identical inputs
//! always produce the identical list in the identical order.

use std::collections::HashSet;
use tracing::trace;

use crate::catalog::FORBIDDEN_WORD_COUNT;
use crate::config::PipelineConfig;
use crate::text::{normalize, ContentFilter, Tokenizer};

/// Ordered candidate list; earlier candidates win
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    candidates: Vec<String>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit distractors, e.g. the raw list of an existing card
    pub fn supplied<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates.extend(items.into_iter().map(Into::into));
        self
    }

    /// First `limit` significant tokens of `text`
    pub fn tokens_of(mut self, tokenizer: &Tokenizer, text: &str, limit: usize) -> Self {
        self.candidates.extend(
            tokenizer
                .significant_tokens(text)
                .into_iter()
                .take(limit)
                .map(str::to_string),
        );
        self
    }

    /// Three category terms picked at `seed`, `seed + 3` and `seed + 6`
    pub fn rotating_terms(mut self, terms: &[String], seed: usize) -> Self {
        if terms.is_empty() {
            return self;
        }
        for offset in [0, 3, 6] {
            self.candidates
                .push(terms[(seed + offset) % terms.len()].clone());
        }
        self
    }

    pub fn terms(self, terms: &[String]) -> Self {
        self.supplied(terms.iter().cloned())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Accumulates accepted distractors for one word
struct Selection<'a> {
    filter: &'a ContentFilter,
    target: String,
    seen: HashSet<String>,
    accepted: Vec<String>,
}

impl<'a> Selection<'a> {
    fn new(filter: &'a ContentFilter, word: &str) -> Self {
        Self {
            filter,
            target: normalize(word),
            seen: HashSet::new(),
            accepted: Vec::with_capacity(FORBIDDEN_WORD_COUNT),
        }
    }

    fn is_full(&self) -> bool {
        self.accepted.len() >= FORBIDDEN_WORD_COUNT
    }

    fn offer(&mut self, candidate: &str) {
        let text = candidate.trim();
        if text.is_empty() {
            return;
        }
        let normalized = normalize(text);
        if normalized.is_empty()
            || normalized == self.target
            || self.seen.contains(&normalized)
            || self.filter.is_generic_banned(text)
            || self.filter.is_sensitive(text)
        {
            trace!("distractor rejected: '{}'", text);
            return;
        }
        self.seen.insert(normalized);
        self.accepted.push(text.to_string());
    }

    fn walk<'c>(&mut self, candidates: impl IntoIterator<Item = &'c String>) {
        for candidate in candidates {
            if self.is_full() {
                break;
            }
            self.offer(candidate);
        }
    }
}

/// Builds the forbidden word list for a card
pub struct DistractorSynthesizer<'a> {
    config: &'a PipelineConfig,
    filter: &'a ContentFilter,
    tokenizer: &'a Tokenizer,
}

impl<'a> DistractorSynthesizer<'a> {
    pub fn new(config: &'a PipelineConfig, filter: &'a ContentFilter, tokenizer: &'a Tokenizer) -> Self {
        Self {
            config,
            filter,
            tokenizer,
        }
    }

    /// Exactly five forbidden words for `word`, or `None` when the pool and
    /// the category fallbacks together cannot supply five valid ones.
    /// Callers must drop the card in that case.
    pub fn build(&self, word: &str, pool: &CandidatePool, category: &str) -> Option<Vec<String>> {
        let mut selection = Selection::new(self.filter, word);
        selection.walk(pool.as_slice());
        selection.walk(self.config.terms_for(category));

        if selection.is_full() {
            Some(selection.accepted)
        } else {
            trace!(
                "'{}' has only {} usable distractors in '{}'",
                word,
                selection.accepted.len(),
                category
            );
            None
        }
    }

    /// Pool for re-cleaning an existing card: its raw list, significant
    /// tokens of the word, then the category terms
    pub fn curation_pool(&self, word: &str, raw: &[String], category: &str) -> CandidatePool {
        CandidatePool::new()
            .supplied(raw.iter().cloned())
            .tokens_of(self.tokenizer, word, self.config.curation.label_token_seeds)
            .terms(self.config.terms_for(category))
    }

    /// Pool for a freshly harvested label: label tokens, description
    /// tokens, three rotating seed terms, then the category terms
    pub fn generation_pool(
        &self,
        word: &str,
        description: &str,
        category: &str,
        seed: usize,
    ) -> CandidatePool {
        let generation = &self.config.generation;
        let terms = self.config.terms_for(category);
        CandidatePool::new()
            .tokens_of(self.tokenizer, word, generation.label_token_seeds)
            .tokens_of(self.tokenizer, description, generation.description_token_seeds)
            .rotating_terms(terms, seed)
            .terms(terms)
    }
}
