//! Generation through validation and alignment, over a synthetic source

mod common;

use tabu_core::alignment::AlignmentChecker;
use tabu_core::catalog::{read_json, SourceManifest};
use tabu_core::generator::Generator;
use tabu_core::validator::CatalogValidator;
use tabu_core::PipelineError;
use tempfile::TempDir;

#[tokio::test]
async fn test_generated_catalog_validates_and_aligns() {
    let config = common::fast_config();
    let source = common::SyntheticSource::new(&config, 700);

    let output = Generator::new(&config)
        .run_with_manifest(&source, SourceManifest::new("2026-10-14T00:00:00Z"))
        .await
        .unwrap();
    assert_eq!(output.catalog.category_count(), 10);
    assert_eq!(output.catalog.total_entries(), 5000);

    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("Kelimeler.json");
    let manifest_path = dir.path().join("Kelimeler.sources.json");
    output.write(&catalog_path, &manifest_path).unwrap();

    let catalog = read_json(&catalog_path).unwrap();
    let manifest = read_json(&manifest_path).unwrap();
    assert_eq!(manifest["source"], "Wikidata");
    assert_eq!(manifest["generatedAt"], "2026-10-14T00:00:00Z");

    let report = CatalogValidator::new(&config).validate(&catalog).unwrap();
    assert!(report.is_valid(), "{:?}", report.failure_lines(10));
    for summary in &report.summaries {
        assert_eq!(summary.difficulties.easy, 175);
        assert_eq!(summary.difficulties.medium, 225);
        assert_eq!(summary.difficulties.hard, 100);
    }

    let alignment = AlignmentChecker::new(&config).check(&catalog, &manifest).unwrap();
    assert!(alignment.is_aligned(), "{:?}", alignment.failure_lines(10));
    assert!(alignment.summaries.iter().all(|s| s.ratio == 100.0));
}

#[tokio::test]
async fn test_thin_source_aborts_without_output() {
    let config = common::fast_config();
    // 400 rows leave 320 usable labels per category
    let source = common::SyntheticSource::new(&config, 400);

    let err = Generator::new(&config).run(&source).await.unwrap_err();
    match err {
        PipelineError::CategoryIncomplete { category, found, target } => {
            assert_eq!(category, config.categories[0].name);
            assert_eq!(found, 320);
            assert_eq!(target, 500);
        }
        other => panic!("unexpected error: {other}"),
    }
}
