//! Difficulty assignment
//!
//! Two policies:
//! - heuristic: per word, from its length and token count (curation path)
//! - quota-ranked: whole category at once, so the ratio bands hold by
//!   construction (generation path)

use crate::catalog::Difficulty;
use crate::config::DifficultyConfig;
use crate::text::{normalize, Tokenizer};

const TOKEN_WEIGHT: usize = 6;
const SPACE_PENALTY: usize = 8;
const PUNCTUATION_PENALTY: usize = 10;

/// Slot counts for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPlan {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl QuotaPlan {
    /// Round the target ratios against `total`; hard absorbs the remainder
    pub fn for_total(total: usize, easy_ratio: f64, medium_ratio: f64) -> Self {
        let easy = ((total as f64) * easy_ratio).round() as usize;
        let easy = easy.min(total);
        let medium = ((total as f64) * medium_ratio).round() as usize;
        let medium = medium.min(total - easy);
        Self {
            easy,
            medium,
            hard: total - easy - medium,
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

pub struct DifficultyClassifier<'a> {
    config: &'a DifficultyConfig,
    tokenizer: &'a Tokenizer,
}

impl<'a> DifficultyClassifier<'a> {
    pub fn new(config: &'a DifficultyConfig, tokenizer: &'a Tokenizer) -> Self {
        Self { config, tokenizer }
    }

    /// Normalized length plus six per significant token
    pub fn heuristic_score(&self, word: &str) -> usize {
        normalize(word).chars().count() + self.tokenizer.significant_count(word) * TOKEN_WEIGHT
    }

    /// Heuristic score with penalties for multi-word and punctuated titles
    pub fn ranked_score(&self, word: &str) -> usize {
        let normalized = normalize(word);
        let mut score =
            normalized.chars().count() + self.tokenizer.significant_count(word) * TOKEN_WEIGHT;
        if normalized.contains(' ') {
            score += SPACE_PENALTY;
        }
        if word.contains(':') || word.contains('-') {
            score += PUNCTUATION_PENALTY;
        }
        score
    }

    pub fn heuristic(&self, word: &str) -> Difficulty {
        let score = self.heuristic_score(word);
        if score < self.config.easy_below {
            Difficulty::Easy
        } else if score < self.config.medium_below {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    /// Keep a recognized upstream label, otherwise fall back to the heuristic
    pub fn resolve_upstream(&self, label: Option<&str>, word: &str) -> Difficulty {
        label
            .and_then(Difficulty::parse_label)
            .unwrap_or_else(|| self.heuristic(word))
    }

    pub fn plan(&self, total: usize) -> QuotaPlan {
        QuotaPlan::for_total(total, self.config.easy_ratio, self.config.medium_ratio)
    }

    /// Rank the words by score and fill easy, medium, hard slots in that
    /// order. Ties keep input order. Output is aligned with the input.
    pub fn assign_ranked<S: AsRef<str>>(&self, words: &[S]) -> Vec<Difficulty> {
        let plan = self.plan(words.len());

        let mut ranked: Vec<(usize, usize)> = words
            .iter()
            .enumerate()
            .map(|(index, word)| (index, self.ranked_score(word.as_ref())))
            .collect();
        ranked.sort_by_key(|&(_, score)| score);

        let mut assigned = vec![Difficulty::Hard; words.len()];
        for (position, (index, _)) in ranked.into_iter().enumerate() {
            assigned[index] = if position < plan.easy {
                Difficulty::Easy
            } else if position < plan.easy + plan.medium {
                Difficulty::Medium
            } else {
                Difficulty::Hard
            };
        }
        assigned
    }
}
