//! Catalog compliance rules

use serde_json::Value;
use std::collections::HashSet;

use super::{label_counts, CatalogRule, CatalogSnapshot, CategorySnapshot, EntryKind, Location, Slot, Violation};
use crate::catalog::{Difficulty, FORBIDDEN_WORD_COUNT};
use crate::text::{letter_tokens, normalize};

fn header(category: &CategorySnapshot<'_>) -> Location {
    Location::Category {
        rank: category.rank,
        slot: Slot::Header,
    }
}

fn entry(category: &CategorySnapshot<'_>, index: usize) -> Location {
    Location::Category {
        rank: category.rank,
        slot: Slot::Entry(index),
    }
}

fn footer(category: &CategorySnapshot<'_>) -> Location {
    Location::Category {
        rank: category.rank,
        slot: Slot::Footer,
    }
}

/// Prefix naming a card: `Kategori[3] 'Kelime'`
fn card_label(category: &str, index: usize, word: &str) -> String {
    format!("{category}[{index}] '{word}'")
}

/// Render a JSON value the way it appears inside quotes in a message
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Round to `digits` decimals and print with at least one decimal
pub(crate) fn format_percent(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$}");
    if !formatted.contains('.') {
        return format!("{formatted}.0");
    }
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Rule: the file holds exactly the configured categories
pub struct CategorySetRule;

impl CatalogRule for CategorySetRule {
    fn rule_id(&self) -> &'static str {
        "category-set"
    }

    fn description(&self) -> &'static str {
        "Catalog must contain exactly the target categories"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        if !snapshot.missing.is_empty() {
            violations.push(Violation::at(
                self.rule_id(),
                Location::Root,
                format!("Eksik kategoriler: {}", snapshot.missing.join(", ")),
            ));
        }
        if !snapshot.extra.is_empty() {
            violations.push(Violation::at(
                self.rule_id(),
                Location::Root,
                format!("Fazla kategoriler: {}", snapshot.extra.join(", ")),
            ));
        }
        violations
    }
}

/// Rule: every target category maps to an array
pub struct CategoryShapeRule;

impl CatalogRule for CategoryShapeRule {
    fn rule_id(&self) -> &'static str {
        "category-shape"
    }

    fn description(&self) -> &'static str {
        "Category value must be an array"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        snapshot
            .categories
            .iter()
            .filter(|c| c.entries.is_none())
            .map(|c| {
                Violation::at(
                    self.rule_id(),
                    header(c),
                    format!("{}: kategori değeri dizi olmalı.", c.name),
                )
            })
            .collect()
    }
}

/// Rule: card count within the configured range
pub struct CategorySizeRule;

impl CatalogRule for CategorySizeRule {
    fn rule_id(&self) -> &'static str {
        "category-size"
    }

    fn description(&self) -> &'static str {
        "Category must hold an acceptable number of cards"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        let limits = &snapshot.config.validation;
        let mut violations = Vec::new();
        for category in &snapshot.categories {
            let Some(entries) = &category.entries else {
                continue;
            };
            if entries.len() < limits.min_count || entries.len() > limits.max_count {
                violations.push(Violation::at(
                    self.rule_id(),
                    header(category),
                    format!(
                        "{}: kart sayısı {}, beklenen aralık {}-{}.",
                        category.name,
                        entries.len(),
                        limits.min_count,
                        limits.max_count
                    ),
                ));
            }
        }
        violations
    }
}

/// Rule: entries are objects with a non-blank `Kelime` string
pub struct EntryShapeRule;

impl CatalogRule for EntryShapeRule {
    fn rule_id(&self) -> &'static str {
        "entry-shape"
    }

    fn description(&self) -> &'static str {
        "Entry must be an object with a non-blank word"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for category in &snapshot.categories {
            for item in category.entries.iter().flatten() {
                let message = match item.kind {
                    EntryKind::NotObject => "kart nesne olmalı.",
                    EntryKind::InvalidWord => "Kelime boş veya geçersiz.",
                    EntryKind::Card(_) => continue,
                };
                violations.push(Violation::at(
                    self.rule_id(),
                    entry(category, item.index),
                    format!("{}[{}]: {message}", category.name, item.index),
                ));
            }
        }
        violations
    }
}

/// Rule: word content and size limits
pub struct WordValidityRule;

impl CatalogRule for WordValidityRule {
    fn rule_id(&self) -> &'static str {
        "word-validity"
    }

    fn description(&self) -> &'static str {
        "Word must respect content and size limits"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        let limits = &snapshot.config.validation;
        let filter = snapshot.filter;
        let mut violations = Vec::new();

        for category in &snapshot.categories {
            for (index, card) in category.cards() {
                let label = card_label(category.name, index, card.word);
                let mut push = |message: String| {
                    violations.push(Violation::at(self.rule_id(), entry(category, index), message));
                };

                if filter.is_generic_banned(card.word) {
                    push(format!("{label}: yasaklı jenerik ifade içeriyor."));
                }
                let length = card.word.chars().count();
                if length > limits.max_word_length {
                    push(format!(
                        "{label}: kelime uzunluğu {length}, max {}.",
                        limits.max_word_length
                    ));
                }
                if letter_tokens(card.word).len() > limits.max_letter_tokens {
                    push(format!("{label}: token sayısı çok yüksek."));
                }
                if filter.is_sensitive(card.word) {
                    push(format!("{label}: hassas/uygunsuz içerik içeriyor."));
                }
            }
        }
        violations
    }
}

/// Rule: words are unique within their category and across the catalog
pub struct WordUniquenessRule;

impl CatalogRule for WordUniquenessRule {
    fn rule_id(&self) -> &'static str {
        "word-uniqueness"
    }

    fn description(&self) -> &'static str {
        "Word must be unique within its category and globally"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut global_seen: HashSet<&str> = HashSet::new();

        for category in &snapshot.categories {
            let mut local_seen: HashSet<&str> = HashSet::new();
            for (index, card) in category.cards() {
                let label = card_label(category.name, index, card.word);
                let normalized = card.normalized.as_str();
                if !local_seen.insert(normalized) {
                    violations.push(Violation::at(
                        self.rule_id(),
                        entry(category, index),
                        format!("{label}: kategori içinde tekrar ediyor."),
                    ));
                }
                if !global_seen.insert(normalized) {
                    violations.push(Violation::at(
                        self.rule_id(),
                        entry(category, index),
                        format!("{label}: global tekrar ediyor."),
                    ));
                }
            }
        }
        violations
    }
}

/// Rule: exactly five valid, distinct forbidden words
pub struct ForbiddenWordsRule;

impl CatalogRule for ForbiddenWordsRule {
    fn rule_id(&self) -> &'static str {
        "forbidden-words"
    }

    fn description(&self) -> &'static str {
        "Card must carry exactly five valid and distinct forbidden words"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        let filter = snapshot.filter;
        let mut violations = Vec::new();

        for category in &snapshot.categories {
            for (index, card) in category.cards() {
                let label = card_label(category.name, index, card.word);
                let location = entry(category, index);
                let mut push = |message: String| {
                    violations.push(Violation::at(self.rule_id(), location, message));
                };

                let Some(items) = card.forbidden.and_then(Value::as_array) else {
                    push(format!("{label}: Yasaklılar dizi olmalı."));
                    continue;
                };
                if items.len() != FORBIDDEN_WORD_COUNT {
                    push(format!(
                        "{label}: Yasaklı sayısı {}, beklenen {FORBIDDEN_WORD_COUNT}.",
                        items.len()
                    ));
                    continue;
                }

                let mut used = HashSet::new();
                for (position, item) in items.iter().enumerate() {
                    let Some(text) = item.as_str().filter(|s| !s.trim().is_empty()) else {
                        push(format!("{label}: Yasaklı[{position}] boş/geçersiz."));
                        continue;
                    };
                    if filter.is_generic_banned(text) {
                        push(format!("{label}: Yasaklı '{text}' jenerik ifade içeriyor."));
                    }
                    let normalized = normalize(text);
                    if filter.is_sensitive(text) {
                        push(format!("{label}: Yasaklı '{text}' hassas/uygunsuz içerik içeriyor."));
                    }
                    if normalized == card.normalized {
                        push(format!("{label}: yasaklı kelimeyle aynı."));
                    }
                    if !used.insert(normalized) {
                        push(format!("{label}: yasaklı tekrar '{text}'."));
                    }
                }
            }
        }
        violations
    }
}

/// Rule: stored difficulty is exactly one of the three labels
pub struct DifficultyLabelRule;

impl CatalogRule for DifficultyLabelRule {
    fn rule_id(&self) -> &'static str {
        "difficulty-label"
    }

    fn description(&self) -> &'static str {
        "Difficulty must be easy, medium or hard"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        for category in &snapshot.categories {
            for (index, card) in category.cards() {
                if super::exact_label(card.difficulty).is_none() {
                    violations.push(Violation::at(
                        self.rule_id(),
                        entry(category, index),
                        format!(
                            "{}: Zorluk '{}' geçersiz.",
                            card_label(category.name, index, card.word),
                            display_value(card.difficulty)
                        ),
                    ));
                }
            }
        }
        violations
    }
}

/// Rule: per-category difficulty shares inside their bands
pub struct DifficultyRatioRule;

impl CatalogRule for DifficultyRatioRule {
    fn rule_id(&self) -> &'static str {
        "difficulty-ratio"
    }

    fn description(&self) -> &'static str {
        "Difficulty distribution must stay within the ratio bands"
    }

    fn check(&self, snapshot: &CatalogSnapshot<'_>) -> Vec<Violation> {
        let bands = &snapshot.config.validation.ratio_bands;
        let mut violations = Vec::new();

        for category in &snapshot.categories {
            let total = match &category.entries {
                Some(entries) if !entries.is_empty() => entries.len(),
                _ => continue,
            };
            let counts = label_counts(category);

            for difficulty in Difficulty::ALL {
                let band = match difficulty {
                    Difficulty::Easy => bands.easy,
                    Difficulty::Medium => bands.medium,
                    Difficulty::Hard => bands.hard,
                };
                let ratio = counts.get(difficulty) as f64 / total as f64;
                if band.contains(ratio) {
                    continue;
                }
                violations.push(Violation::at(
                    self.rule_id(),
                    footer(category),
                    format!(
                        "{}: '{}' oranı %{}, beklenen aralık %{}-{}.",
                        category.name,
                        difficulty,
                        format_percent(ratio * 100.0, 2),
                        format_percent(band.min * 100.0, 1),
                        format_percent(band.max * 100.0, 1)
                    ),
                ));
            }
        }
        violations
    }
}
