//! Catalog generation from a knowledge base
//!
//! For every configured category, in order:
//!
//! 1. page through the knowledge base ([`retry::fetch_category_rows`])
//! 2. clean and filter labels, dedup, synthesize distractors
//!    ([`harvest::Harvester`])
//! 3. rank difficulties against the quota plan
//!
//! Any category short of its target aborts the run. Nothing is written
//! until every category has succeeded.

pub mod harvest;
pub mod retry;
pub mod source;
pub mod wikidata;

use std::path::Path;
use tracing::info;

use crate::catalog::{Catalog, SourceManifest, StagedJson};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::text::{ContentFilter, Tokenizer};

pub use harvest::{clean_label, GenerationState, Harvester, LabelPolicy};
pub use retry::{fetch_category_rows, fetch_with_retry, RetryPolicy};
pub use source::{FetchOutcome, FetchRequest, KnowledgeSource, RawRow};
pub use wikidata::WikidataSource;

/// A complete, not yet persisted generation result
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub catalog: Catalog,
    pub manifest: SourceManifest,
}

impl GenerationOutput {
    /// Persist both artifacts. Neither destination is touched until both
    /// documents are staged beside them.
    pub fn write(&self, catalog_path: &Path, manifest_path: &Path) -> Result<()> {
        let catalog = StagedJson::stage(catalog_path, &self.catalog)?;
        let manifest = StagedJson::stage(manifest_path, &self.manifest)?;
        catalog.commit()?;
        manifest.commit()
    }
}

pub struct Generator<'a> {
    config: &'a PipelineConfig,
    filter: ContentFilter,
    tokenizer: Tokenizer,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            filter: ContentFilter::new(&config.filter),
            tokenizer: Tokenizer::new(&config.stopwords),
        }
    }

    pub async fn run(&self, source: &dyn KnowledgeSource) -> Result<GenerationOutput> {
        self.run_with_manifest(source, SourceManifest::now()).await
    }

    /// Like [`Generator::run`] with a caller-supplied manifest stamp
    pub async fn run_with_manifest(
        &self,
        source: &dyn KnowledgeSource,
        mut manifest: SourceManifest,
    ) -> Result<GenerationOutput> {
        manifest.source = source.name().to_string();
        let mut state = GenerationState::new(manifest);
        let harvester = Harvester::new(self.config, &self.filter, &self.tokenizer);
        let target = self.config.generation.target_count;
        let mut catalog = Catalog::new();

        for category in &self.config.categories {
            info!("Fetching '{}' from {}", category.name, source.name());
            let rows = fetch_category_rows(
                source,
                &category.name,
                &category.query_clauses,
                target,
                &self.config.fetch,
            )
            .await?;

            let entries = harvester.harvest_category(&mut state, category, &rows)?;
            catalog.insert_category(category.name.clone(), entries);
        }

        info!(
            "Generated {} cards across {} categories",
            catalog.total_entries(),
            catalog.category_count()
        );
        Ok(GenerationOutput {
            catalog,
            manifest: state.manifest,
        })
    }
}
