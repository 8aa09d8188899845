//! Content classifiers for generic filler and unsafe vocabulary

use super::normalize;
use crate::config::FilterConfig;

/// Whole-word blocklist classifier.
///
/// A blocked token matches when the normalized text equals it, starts or
/// ends with it as a separate word, or contains it surrounded by spaces.
/// Tokens embedded inside longer words never match.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    generic: Vec<String>,
    sensitive: Vec<String>,
}

impl ContentFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            generic: prepare(&config.generic_banned),
            sensitive: prepare(&config.sensitive),
        }
    }

    /// Marketing-style filler such as "temel" or "yeni nesil"
    pub fn is_generic_banned(&self, text: &str) -> bool {
        contains_any(&normalize(text), &self.generic)
    }

    /// Content-safety blocklist
    pub fn is_sensitive(&self, text: &str) -> bool {
        contains_any(&normalize(text), &self.sensitive)
    }

    pub fn is_blocked(&self, text: &str) -> bool {
        let normalized = normalize(text);
        contains_any(&normalized, &self.generic) || contains_any(&normalized, &self.sensitive)
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

fn prepare(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .collect()
}

fn contains_any(normalized: &str, tokens: &[String]) -> bool {
    tokens.iter().any(|token| contains_word(normalized, token))
}

/// Whole-word containment on already-normalized strings
pub(crate) fn contains_word(normalized: &str, token: &str) -> bool {
    normalized == token
        || normalized.starts_with(&format!("{token} "))
        || normalized.ends_with(&format!(" {token}"))
        || normalized.contains(&format!(" {token} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_whole_word_matching() {
        let filter = ContentFilter::default();
        assert!(filter.is_generic_banned("temel"));
        assert!(!filter.is_generic_banned("temelsiz"));
        assert!(filter.is_generic_banned("çok temel bir konu"));
        assert!(filter.is_generic_banned("Temel Bilgiler"));
        assert!(filter.is_generic_banned("bilgisayar temel"));
        assert!(!filter.is_generic_banned("sütemel"));
    }

    #[test]
    fn test_multi_word_token() {
        let filter = ContentFilter::default();
        assert!(filter.is_generic_banned("Yeni Nesil"));
        assert!(filter.is_generic_banned("yeni-nesil konsol"));
        assert!(!filter.is_generic_banned("yeni"));
        assert!(!filter.is_generic_banned("nesil"));
    }

    #[test]
    fn test_diacritic_insensitive() {
        let filter = ContentFilter::default();
        assert!(filter.is_generic_banned("GELİŞMİŞ özellik"));
        assert!(filter.is_generic_banned("gelismis"));
    }

    #[test]
    fn test_sensitive_does_not_match_inside_words() {
        let filter = ContentFilter::default();
        assert!(filter.is_sensitive("sex"));
        assert!(filter.is_sensitive("Sex Pistols"));
        assert!(!filter.is_sensitive("Middlesex"));
        assert!(!filter.is_sensitive("Essex"));
        assert!(!filter.is_sensitive("Sussex County"));
        assert!(!filter.is_sensitive("Terrorvision"));
    }

    #[test]
    fn test_blocked_is_union() {
        let filter = ContentFilter::default();
        assert!(filter.is_blocked("temel"));
        assert!(filter.is_blocked("porn"));
        assert!(!filter.is_blocked("Galata Kulesi"));
    }

    #[test]
    fn test_custom_vocabulary() {
        let filter = ContentFilter::new(&FilterConfig {
            generic_banned: vec!["Süper".to_string(), "   ".to_string()],
            sensitive: vec![],
        });
        assert!(filter.is_generic_banned("süper kahraman"));
        assert!(!filter.is_generic_banned("kahraman"));
        assert!(!filter.is_sensitive("porn"));
    }

    #[test]
    fn test_contains_word_edges() {
        assert!(contains_word("a b c", "b"));
        assert!(contains_word("a b", "b"));
        assert!(contains_word("b a", "b"));
        assert!(!contains_word("ab", "b"));
        assert!(!contains_word("ba", "b"));
    }
}
