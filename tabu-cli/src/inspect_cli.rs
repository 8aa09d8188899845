//! Read-only view of a catalog as the app loads it

use anyhow::{Context, Result};
use std::path::Path;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing::warn;

use tabu_core::catalog::{read_json, Catalog, Difficulty, TermEntry};

/// Table row for per-category counts
#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Kart")]
    cards: usize,
    #[tabled(rename = "easy")]
    easy: usize,
    #[tabled(rename = "medium")]
    medium: usize,
    #[tabled(rename = "hard")]
    hard: usize,
}

/// Table row for a single card
#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Kelime")]
    word: String,
    #[tabled(rename = "Zorluk")]
    difficulty: String,
    #[tabled(rename = "Yasaklılar")]
    forbidden: String,
}

fn render<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = read_json(path)?;
    serde_json::from_value(raw)
        .with_context(|| format!("{} is not a valid card catalog", path.display()))
}

/// Selected cards regrouped by category, in selection order
fn regroup(selected: &[(&str, &TermEntry)]) -> Catalog {
    let mut grouped: Vec<(&str, Vec<TermEntry>)> = Vec::new();
    for (category, entry) in selected {
        match grouped.iter_mut().find(|(name, _)| *name == *category) {
            Some((_, entries)) => entries.push((*entry).clone()),
            None => grouped.push((*category, vec![(*entry).clone()])),
        }
    }
    let mut catalog = Catalog::new();
    for (name, entries) in grouped {
        catalog.insert_category(name, entries);
    }
    catalog
}

pub fn inspect_command(
    path: &Path,
    categories: &[String],
    difficulty: Option<Difficulty>,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(path)?;

    let wanted: Vec<&str> = if categories.is_empty() {
        catalog.category_names().collect()
    } else {
        for name in categories {
            if catalog.category(name).is_none() {
                warn!("Category '{}' not found in {}", name, path.display());
            }
        }
        categories.iter().map(String::as_str).collect()
    };
    let selected = catalog.select(&wanted, difficulty);

    if json {
        let output = serde_json::to_string_pretty(&regroup(&selected))?;
        println!("{output}");
        return Ok(());
    }

    if categories.is_empty() && difficulty.is_none() {
        let rows: Vec<CountRow> = catalog
            .categories()
            .map(|(name, entries)| {
                let counts = catalog.difficulty_counts(name);
                CountRow {
                    category: name.to_string(),
                    cards: entries.len(),
                    easy: counts.easy,
                    medium: counts.medium,
                    hard: counts.hard,
                }
            })
            .collect();
        println!("{}", render(&rows));
        println!("Toplam kart: {}", catalog.total_entries());
        return Ok(());
    }

    let rows: Vec<CardRow> = selected
        .iter()
        .map(|(category, entry)| CardRow {
            category: category.to_string(),
            word: entry.word.clone(),
            difficulty: entry.difficulty.to_string(),
            forbidden: entry.forbidden_words.join(", "),
        })
        .collect();
    println!("{}", render(&rows));
    println!("Seçilen kart: {}", rows.len());
    Ok(())
}
