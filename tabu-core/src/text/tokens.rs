//! Letter-led token extraction

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::normalize;

/// A token starts with a letter and continues with letters, combining
/// marks or dash punctuation.
static LETTER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}[\p{L}\p{Mn}\p{Pd}]*").expect("static token pattern"));

/// Every letter-led token in order of appearance
pub fn letter_tokens(text: &str) -> Vec<&str> {
    LETTER_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Extracts significant tokens, skipping stopwords and trivial tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
}

impl Tokenizer {
    pub fn new<S: AsRef<str>>(stopwords: &[S]) -> Self {
        Self {
            stopwords: stopwords
                .iter()
                .map(|w| normalize(w.as_ref()))
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Letter-led tokens that are at least two characters long after
    /// normalization, not purely numeric and not stopwords
    pub fn significant_tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        letter_tokens(text)
            .into_iter()
            .filter(|token| self.is_significant(token))
            .collect()
    }

    pub fn significant_count(&self, text: &str) -> usize {
        self.significant_tokens(text).len()
    }

    fn is_significant(&self, token: &str) -> bool {
        let normalized = normalize(token);
        !normalized.is_empty()
            && normalized.chars().count() >= 2
            && !normalized.chars().all(|c| c.is_ascii_digit())
            && !self.stopwords.contains(&normalized)
    }
}
