//! Pre-parsed view of an untyped catalog
//!
//! The JSON is inspected once here so every rule sees the same category
//! order and entry classification.

use serde_json::Value;

use crate::catalog::fields;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::text::{normalize, ContentFilter};

/// How an entry presented itself
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind<'a> {
    NotObject,
    /// `Kelime` missing, not a string, or blank
    InvalidWord,
    Card(CardView<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    /// `Kelime` exactly as stored
    pub word: &'a str,
    pub normalized: String,
    pub forbidden: Option<&'a Value>,
    pub difficulty: Option<&'a Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot<'a> {
    pub index: usize,
    pub kind: EntryKind<'a>,
}

impl<'a> EntrySnapshot<'a> {
    pub fn card(&self) -> Option<&CardView<'a>> {
        match &self.kind {
            EntryKind::Card(card) => Some(card),
            _ => None,
        }
    }
}

/// One expected category; `entries` is `None` when the key is missing or
/// its value is not an array
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySnapshot<'a> {
    pub rank: usize,
    pub name: &'a str,
    pub entries: Option<Vec<EntrySnapshot<'a>>>,
}

impl<'a> CategorySnapshot<'a> {
    pub fn cards(&self) -> impl Iterator<Item = (usize, &CardView<'a>)> {
        self.entries
            .iter()
            .flatten()
            .filter_map(|e| e.card().map(|c| (e.index, c)))
    }
}

pub struct CatalogSnapshot<'a> {
    pub config: &'a PipelineConfig,
    pub filter: &'a ContentFilter,
    /// Expected categories in configured order
    pub categories: Vec<CategorySnapshot<'a>>,
    pub missing: Vec<&'a str>,
    /// Keys present in the file but not expected, in file order
    pub extra: Vec<&'a str>,
    /// Number of top-level keys in the file
    pub key_count: usize,
    /// Sum of all array lengths in the file
    pub total_entries: usize,
}

impl<'a> CatalogSnapshot<'a> {
    pub fn build(root: &'a Value, config: &'a PipelineConfig, filter: &'a ContentFilter) -> Result<Self> {
        let object = root.as_object().ok_or_else(|| {
            PipelineError::MalformedInput("JSON kökü bir nesne (hash) olmalı.".to_string())
        })?;

        let expected = config.category_names();
        let missing = expected
            .iter()
            .copied()
            .filter(|name| !object.contains_key(*name))
            .collect();
        let extra = object
            .keys()
            .map(String::as_str)
            .filter(|key| !expected.contains(key))
            .collect();

        let categories = config
            .categories
            .iter()
            .enumerate()
            .map(|(rank, category)| CategorySnapshot {
                rank,
                name: category.name.as_str(),
                entries: object
                    .get(&category.name)
                    .and_then(Value::as_array)
                    .map(|items| items.iter().enumerate().map(classify).collect()),
            })
            .collect();

        let total_entries = object
            .values()
            .filter_map(Value::as_array)
            .map(Vec::len)
            .sum();

        Ok(Self {
            config,
            filter,
            categories,
            missing,
            extra,
            key_count: object.len(),
            total_entries,
        })
    }
}

fn classify((index, value): (usize, &Value)) -> EntrySnapshot<'_> {
    let kind = match value.as_object() {
        None => EntryKind::NotObject,
        Some(object) => match object.get(fields::WORD).and_then(Value::as_str) {
            Some(word) if !word.trim().is_empty() => EntryKind::Card(CardView {
                word,
                normalized: normalize(word),
                forbidden: object.get(fields::FORBIDDEN),
                difficulty: object.get(fields::DIFFICULTY),
            }),
            _ => EntryKind::InvalidWord,
        },
    };
    EntrySnapshot { index, kind }
}
