//! Contract tests for the tabu-catalog binary

use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tabu_core::config::PipelineConfig;
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tabu-catalog"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tabu-catalog")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Ten default categories of 500 cards at 35/45/20
fn compliant_catalog() -> Value {
    let config = PipelineConfig::default();
    let mut root = Map::new();
    for (c, name) in config.category_names().into_iter().enumerate() {
        let entries = (0..500)
            .map(|i| {
                let difficulty = match i {
                    0..=174 => "easy",
                    175..=399 => "medium",
                    _ => "hard",
                };
                json!({
                    "Kelime": format!("Kart {c} Numara {i}"),
                    "Yasaklılar": ["alfa", "beta", "gama", "delta", "epsilon"],
                    "Zorluk": difficulty
                })
            })
            .collect();
        root.insert(name.to_string(), Value::Array(entries));
    }
    Value::Object(root)
}

fn manifest_for(catalog: &Value) -> Value {
    let mut items = Map::new();
    for (name, entries) in catalog.as_object().unwrap() {
        let records: Vec<Value> = entries
            .as_array()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, e)| json!({"Kelime": e["Kelime"], "Wikidata": format!("http://www.wikidata.org/entity/Q{i}")}))
            .collect();
        items.insert(name.clone(), Value::Array(records));
    }
    json!({"generatedAt": "2026-10-14T00:00:00Z", "source": "Wikidata", "categories": {}, "items": items})
}

#[test]
fn test_validate_accepts_compliant_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Kelimeler.json", &compliant_catalog());

    let output = run(&["validate", arg(&path)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Katalog doğrulaması başarılı.");
    assert_eq!(lines[1], format!("Dosya: {}", arg(&path)));
    assert_eq!(lines[2], "Kategori sayısı: 10");
    assert_eq!(lines[3], "Toplam kart: 5000");
    assert_eq!(lines[4], "- Diziler & Filmler: 500 (easy=175, medium=225, hard=100)");
}

#[test]
fn test_validate_reports_violations_and_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let mut catalog = compliant_catalog();
    catalog["Spor"][0]["Yasaklılar"] = json!(["a", "b"]);
    let path = write(&dir, "Kelimeler.json", &catalog);

    let output = run(&["validate", arg(&path)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let text = stderr(&output);
    assert!(text.contains("Katalog doğrulaması başarısız."));
    assert!(text.contains("- Spor[0] 'Kart 2 Numara 0': Yasaklı sayısı 2, beklenen 5."));
}

#[test]
fn test_validate_rejects_non_object_root() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Kelimeler.json", &json!(["Spor"]));

    let output = run(&["validate", arg(&path)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("JSON kökü bir nesne (hash) olmalı."));
}

#[test]
fn test_curate_writes_to_output_path() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "raw.json",
        &json!({"Spor": [
            {"Kelime": "Futbol", "Yasaklılar": ["gol", "kale", "hakem", "ofsayt", "korner"], "Zorluk": "easy"},
            {"Kelime": "futbol", "Yasaklılar": ["gol", "kale", "hakem", "ofsayt", "korner"]},
            {"Kelime": "Temel Spor"},
            "x"
        ], "Ayarlar": {"tema": "koyu"}}),
    );
    let target = dir.path().join("clean.json");

    let output = run(&["curate", arg(&input), arg(&target)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with(&format!("Katalog düzenlendi: {}\n", arg(&target))));
    assert!(text.contains(
        "- Spor: 1 (easy=1, medium=0, hard=0) düşürülen=3 (geçersiz=1, tekrar=1, nesne değil=1, yasaklı yetersiz=0, limit=0)\n"
    ));
    assert!(text.ends_with("Atlanan kategoriler (dizi değil): Ayarlar\n"));

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written["Spor"][0]["Kelime"], "Futbol");
    // input untouched
    let original: Value = serde_json::from_str(&std::fs::read_to_string(&input).unwrap()).unwrap();
    assert_eq!(original["Spor"].as_array().unwrap().len(), 4);
}

#[test]
fn test_alignment_alias_and_failure() {
    let dir = TempDir::new().unwrap();
    let catalog = compliant_catalog();
    let catalog_path = write(&dir, "Kelimeler.json", &catalog);
    let manifest_path = write(&dir, "Kelimeler.sources.json", &manifest_for(&catalog));

    let output = run(&["verify_sources_alignment", arg(&catalog_path), arg(&manifest_path)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("Kaynak hizalama doğrulaması başarılı.\n"));
    assert!(text.contains("- Spor: catalog=500, sources=500, matched=500, ratio=%100.0"));

    let broken = write(&dir, "broken.json", &json!({"generatedAt": "x"}));
    let output = run(&["verify-sources-alignment", arg(&catalog_path), arg(&broken)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Kelimeler.sources.json içinde 'items' nesnesi bulunamadı."));
}

#[test]
fn test_inspect_selects_cards_as_json() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "Kelimeler.json",
        &json!({
            "Spor": [
                {"Kelime": "Futbol", "Yasaklılar": ["gol", "kale", "hakem", "ofsayt", "korner"], "Zorluk": "easy"},
                {"word": "Kriket", "forbiddenWords": ["a", "b", "c", "d", "e"], "difficulty": "hard"}
            ],
            "Tarih": [
                {"Kelime": "Magna Carta", "Yasaklılar": ["a", "b", "c", "d", "e"], "Zorluk": "bilinmez"}
            ]
        }),
    );

    let output = run(&[
        "inspect", arg(&path), "--category", "Tarih", "--category", "Spor", "--difficulty", "medium", "--json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let selected: Value = serde_json::from_str(&stdout(&output)).unwrap();
    // unknown labels decode as medium
    assert_eq!(selected, json!({"Tarih": [
        {"Kelime": "Magna Carta", "Yasaklılar": ["a", "b", "c", "d", "e"], "Zorluk": "medium"}
    ]}));

    let output = run(&["inspect", arg(&path)]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Toplam kart: 3"));
}

#[test]
fn test_unreadable_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "Kelimeler.json", &compliant_catalog());
    let missing = dir.path().join("missing.yaml");

    let output = run(&["--config", arg(&missing), "validate", arg(&path)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}
