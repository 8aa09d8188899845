//! Catalog validator against full-size fixtures

mod common;

use tabu_core::catalog::{read_json, DifficultyCounts};
use tabu_core::config::PipelineConfig;
use tabu_core::validator::CatalogValidator;
use tempfile::TempDir;

#[test]
fn test_compliant_fixture_has_no_violations() {
    let config = PipelineConfig::default();
    let report = CatalogValidator::new(&config)
        .validate(&common::compliant_catalog(&config))
        .unwrap();

    assert!(report.is_valid(), "{:?}", &report.violations[..report.violations.len().min(5)]);
    assert_eq!(report.category_count, 10);
    assert_eq!(report.total_entries, 5000);
    for summary in &report.summaries {
        assert_eq!(summary.entries, 500);
        assert_eq!(summary.difficulties, DifficultyCounts { easy: 175, medium: 225, hard: 100 });
    }
}

#[test]
fn test_duplicated_word_is_reported() {
    let config = PipelineConfig::default();
    let mut catalog = common::compliant_catalog(&config);
    let name = config.categories[3].name.clone();
    catalog[&name][10]["Kelime"] = catalog[&name][9]["Kelime"].clone();

    let report = CatalogValidator::new(&config).validate(&catalog).unwrap();
    assert!(!report.is_valid());
    assert!(report
        .violations
        .iter()
        .any(|v| v.message.contains("tekrar ediyor") && v.message.starts_with(&format!("{name}[10]"))));
}

#[test]
fn test_violations_survive_a_file_round_trip() {
    let config = PipelineConfig::default();
    let mut catalog = common::compliant_catalog(&config);
    let name = config.categories[0].name.clone();
    catalog[&name][0]["Zorluk"] = serde_json::json!("orta");

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Kelimeler.json");
    common::write(&path, &catalog);

    let report = CatalogValidator::new(&config)
        .validate(&read_json(&path).unwrap())
        .unwrap();
    assert_eq!(report.violations.len(), 1);
    assert_eq!(
        report.violations[0].message,
        format!("{name}[0] 'Kart 0 Numara 0': Zorluk 'orta' geçersiz.")
    );
}
