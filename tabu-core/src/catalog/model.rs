//! Typed catalog records

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::OrderedMap;

/// Number of forbidden words every card carries
pub const FORBIDDEN_WORD_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Recognize an upstream label, ignoring case and surrounding space
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("unknown difficulty '{s}' (easy, medium, hard)"))
    }
}

/// Per-difficulty tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyCounts {
    pub fn add(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
        }
    }

    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

impl fmt::Display for DifficultyCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "easy={}, medium={}, hard={}",
            self.easy, self.medium, self.hard
        )
    }
}

/// One playable card.
///
/// Field names are the app's bundle format. The app's alternate English
/// keys are accepted on input, and an unrecognized difficulty decodes as
/// medium the same way the app does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEntry {
    #[serde(rename = "Kelime", alias = "word")]
    pub word: String,

    #[serde(rename = "Yasaklılar", alias = "forbiddenWords")]
    pub forbidden_words: Vec<String>,

    #[serde(
        rename = "Zorluk",
        alias = "difficulty",
        default = "default_difficulty",
        deserialize_with = "lenient_difficulty"
    )]
    pub difficulty: Difficulty,
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

fn lenient_difficulty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Difficulty, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(Difficulty::parse_label)
        .unwrap_or_else(default_difficulty))
}

impl TermEntry {
    pub fn new(word: impl Into<String>, forbidden_words: Vec<String>, difficulty: Difficulty) -> Self {
        Self {
            word: word.into(),
            forbidden_words,
            difficulty,
        }
    }
}

/// Category name to ordered cards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: OrderedMap<Vec<TermEntry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_category(&mut self, name: impl Into<String>, entries: Vec<TermEntry>) {
        self.categories.insert(name, entries);
    }

    pub fn category(&self, name: &str) -> Option<&[TermEntry]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[TermEntry])> {
        self.categories.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn total_entries(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn difficulty_counts(&self, name: &str) -> DifficultyCounts {
        let mut counts = DifficultyCounts::default();
        for entry in self.category(name).unwrap_or(&[]) {
            counts.add(entry.difficulty);
        }
        counts
    }

    /// Cards from the named categories in the order given, optionally
    /// narrowed to one difficulty. Unknown categories contribute nothing.
    pub fn select<'a>(
        &'a self,
        categories: &[&str],
        difficulty: Option<Difficulty>,
    ) -> Vec<(&'a str, &'a TermEntry)> {
        let mut selected = Vec::new();
        for wanted in categories {
            let Some((name, entries)) = self.categories().find(|(name, _)| name == wanted) else {
                continue;
            };
            selected.extend(
                entries
                    .iter()
                    .filter(|e| difficulty.map_or(true, |d| e.difficulty == d))
                    .map(|e| (name, e)),
            );
        }
        selected
    }
}
