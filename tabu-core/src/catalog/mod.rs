//! Catalog and source manifest model
//!
//! ```text
//! Kelimeler.json          category -> [{ Kelime, Yasaklılar[5], Zorluk }]
//! Kelimeler.sources.json  { generatedAt, source, categories, items }
//! ```
//!
//! Both files keep category order. Untyped reads go through `serde_json`
//! with `preserve_order`, typed writes through [`OrderedMap`].

mod io;
mod manifest;
mod model;
mod ordered;

pub use io::{read_json, write_json_atomic, StagedJson};
pub use manifest::{CategoryQueryStats, SourceManifest, SourceRecord, DEFAULT_SOURCE_NAME};
pub use model::{Catalog, Difficulty, DifficultyCounts, TermEntry, FORBIDDEN_WORD_COUNT};
pub use ordered::OrderedMap;

/// Default catalog location, relative to the repository root
pub const DEFAULT_CATALOG_PATH: &str = "Tabu/Files/Kelimeler.json";

/// Default source manifest location, relative to the repository root
pub const DEFAULT_MANIFEST_PATH: &str = "Tabu/Files/Kelimeler.sources.json";

/// Field names of the bundle format
pub mod fields {
    pub const WORD: &str = "Kelime";
    pub const FORBIDDEN: &str = "Yasaklılar";
    pub const DIFFICULTY: &str = "Zorluk";
    pub const EXTERNAL_ID: &str = "Wikidata";
    pub const ITEMS: &str = "items";
}
