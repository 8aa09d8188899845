//! Source manifest (Kelimeler.sources.json)
//!
//! Records the knowledge base identifier behind every generated card plus
//! the query statistics of each category.

use serde::{Deserialize, Serialize};

use super::OrderedMap;

pub const DEFAULT_SOURCE_NAME: &str = "Wikidata";

/// Provenance of one generated card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "Kelime")]
    pub word: String,

    /// External identifier (entity URI)
    #[serde(rename = "Wikidata")]
    pub external_id: String,
}

/// Query statistics for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQueryStats {
    pub query_clauses: Vec<String>,
    pub fetched_rows: usize,
    pub selected_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceManifest {
    /// ISO-8601 UTC timestamp of the run
    pub generated_at: String,
    pub source: String,
    pub categories: OrderedMap<CategoryQueryStats>,
    pub items: OrderedMap<Vec<SourceRecord>>,
}

impl SourceManifest {
    pub fn new(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: generated_at.into(),
            source: DEFAULT_SOURCE_NAME.to_string(),
            categories: OrderedMap::new(),
            items: OrderedMap::new(),
        }
    }

    /// Manifest stamped with the current UTC time
    pub fn now() -> Self {
        Self::new(
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        )
    }

    pub fn record_category(
        &mut self,
        category: &str,
        stats: CategoryQueryStats,
        records: Vec<SourceRecord>,
    ) {
        self.categories.insert(category, stats);
        self.items.insert(category, records);
    }

    pub fn records(&self, category: &str) -> &[SourceRecord] {
        self.items.get(category).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_json_shape() {
        let mut manifest = SourceManifest::new("2025-10-14T00:00:00Z");
        manifest.record_category(
            "Tarih",
            CategoryQueryStats {
                query_clauses: vec!["?item wdt:P31 wd:Q198 .".to_string()],
                fetched_rows: 10,
                selected_rows: 1,
            },
            vec![SourceRecord {
                word: "Malazgirt Meydan Muharebesi".to_string(),
                external_id: "http://www.wikidata.org/entity/Q188478".to_string(),
            }],
        );

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["generatedAt"], "2025-10-14T00:00:00Z");
        assert_eq!(json["source"], "Wikidata");
        assert_eq!(json["categories"]["Tarih"]["fetchedRows"], 10);
        assert_eq!(json["categories"]["Tarih"]["selectedRows"], 1);
        assert_eq!(
            json["items"]["Tarih"][0]["Wikidata"],
            "http://www.wikidata.org/entity/Q188478"
        );
        assert_eq!(manifest.records("Tarih").len(), 1);
        assert!(manifest.records("Spor").is_empty());
    }

    #[test]
    fn test_now_is_utc_seconds() {
        let manifest = SourceManifest::now();
        assert!(manifest.generated_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&manifest.generated_at).is_ok());
    }
}
