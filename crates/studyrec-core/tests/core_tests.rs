use std::fs;

use figment::Jail;
use tempfile::TempDir;

use studyrec_core::config::{BuiltinStopWords, Config, EngineSettings, NgramStopWordPolicy, StopWords};
use studyrec_core::query::validate_query;
use studyrec_core::sample::sample_catalog;
use studyrec_core::{Catalog, Error, MaterialRecord};

#[test]
fn search_by_category_is_case_insensitive_and_ordered() {
    let catalog = sample_catalog().expect("sample");
    let ids: Vec<u64> = catalog.search_by_category("ML").iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 6, 7]);

    let lower: Vec<u64> = catalog.search_by_category("ml").iter().map(|r| r.id).collect();
    assert_eq!(ids, lower, "matching ignores case");
}

#[test]
fn search_by_tag_matches_substrings() {
    let catalog = sample_catalog().expect("sample");
    let ids: Vec<u64> = catalog.search_by_tag("data").iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![4, 8]);
    assert!(catalog.search_by_tag("rust").is_empty());
}

#[test]
fn search_by_tag_matches_within_single_tags() {
    let catalog = sample_catalog().expect("sample");
    // "python,basics" holds the text "n,b" only across the separator.
    assert!(catalog.search_by_tag("n,b").is_empty());
    let ids: Vec<u64> = catalog.search_by_tag("NEURAL").iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![6]);
}

#[test]
fn duplicate_ids_are_rejected() {
    let records = vec![
        MaterialRecord::new(7, "a", "", "", ""),
        MaterialRecord::new(7, "b", "", "", ""),
    ];
    assert!(matches!(Catalog::new(records), Err(Error::DuplicateId(7))));
}

#[test]
fn find_by_id() {
    let catalog = sample_catalog().expect("sample");
    assert_eq!(catalog.find(9).expect("id 9").title, "C++ Programming");
    assert!(matches!(catalog.find(99), Err(Error::NotFound(_))));
}

#[test]
fn load_csv_with_missing_columns() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("materials.csv");
    fs::write(
        &path,
        "id,title,description,category\n1,Rust Basics,Ownership and borrowing,Programming\n2,Tokio,,Async\n",
    )
    .unwrap();

    let catalog = Catalog::load(&path).expect("load csv");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.records()[0].tags, "", "absent column becomes empty string");
    assert_eq!(catalog.records()[1].description, "");
    assert_eq!(catalog.records()[1].category, "Async");
}

#[test]
fn load_json_catalog() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("materials.json");
    fs::write(&path, r#"[{"id": 3, "title": "SQL", "tags": "db,sql"}, {"id": 4, "title": "Graphs"}]"#).unwrap();

    let catalog = Catalog::load(&path).expect("load json");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.records()[0].tag_list().collect::<Vec<_>>(), vec!["db", "sql"]);
    assert_eq!(catalog.records()[1].category, "");
}

#[test]
fn load_rejects_unknown_extension_and_bad_rows() {
    let tmp = TempDir::new().unwrap();
    let txt = tmp.path().join("materials.txt");
    fs::write(&txt, "whatever").unwrap();
    assert!(matches!(Catalog::load(&txt), Err(Error::Catalog(_))));

    let csv = tmp.path().join("bad.csv");
    fs::write(&csv, "id,title\nnot-a-number,Oops\n").unwrap();
    assert!(matches!(Catalog::load(&csv), Err(Error::Catalog(_))));
}

#[test]
fn query_validation_trims_and_requires_two_chars() {
    assert_eq!(validate_query("  python  ").expect("valid"), "python");
    assert!(matches!(validate_query(""), Err(Error::InvalidQuery(_))));
    assert!(matches!(validate_query(" x "), Err(Error::InvalidQuery(_))));
}

#[test]
fn engine_settings_validation() {
    assert!(EngineSettings::default().validate().is_ok());
    let bad_range = EngineSettings { min_n: 2, max_n: 1, ..EngineSettings::default() };
    assert!(matches!(bad_range.validate(), Err(Error::InvalidConfig(_))));
    let zero_cap = EngineSettings { max_features: Some(0), ..EngineSettings::default() };
    assert!(matches!(zero_cap.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn config_defaults_when_no_files() {
    Jail::expect_with(|jail| {
        jail.set_env("RUST_ENV", "test");
        let config = Config::load().map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.engine, EngineSettings::default());
        assert!(settings.catalog.path.is_none());
        Ok(())
    });
}

#[test]
fn config_merges_files_and_env() {
    Jail::expect_with(|jail| {
        jail.set_env("RUST_ENV", "test");
        jail.create_file(
            "config.toml",
            r#"
            [catalog]
            path = "data/materials.csv"

            [engine]
            max_features = 50
            stop_words = "none"
            ngram_stop_words = "drop_if_all"
            "#,
        )?;
        jail.create_file("config.test.toml", "[engine]\nmax_n = 3\n")?;
        jail.set_env("APP_ENGINE__MIN_SCORE", "0.1");

        let config = Config::load().map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.catalog.path.as_deref(), Some("data/materials.csv"));
        assert_eq!(settings.engine.max_features, Some(50));
        assert_eq!(settings.engine.max_n, 3);
        assert_eq!(settings.engine.stop_words, StopWords::Builtin(BuiltinStopWords::None));
        assert_eq!(settings.engine.ngram_stop_words, NgramStopWordPolicy::DropIfAll);
        assert!((settings.engine.min_score - 0.1).abs() < 1e-6);
        Ok(())
    });
}

#[test]
fn config_custom_stop_word_list() {
    Jail::expect_with(|jail| {
        jail.set_env("RUST_ENV", "test");
        jail.create_file("config.toml", "[engine]\nstop_words = [\"intro\", \"basics\"]\n")?;
        let settings = Config::load().map_err(|e| e.to_string())?.settings().map_err(|e| e.to_string())?;
        assert_eq!(settings.engine.stop_words, StopWords::Custom(vec!["intro".into(), "basics".into()]));
        Ok(())
    });
}

#[test]
fn prod_requires_catalog_path() {
    Jail::expect_with(|jail| {
        jail.set_env("RUST_ENV", "prod");
        assert!(Config::load().is_err());
        jail.create_file("config.prod.toml", "[catalog]\npath = \"~/materials.json\"\n")?;
        let config = Config::load().map_err(|e| e.to_string())?;
        assert_eq!(config.env_name(), "prod");
        Ok(())
    });
}

#[test]
fn bundled_csv_matches_built_in_sample() {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/materials.csv");
    let catalog = Catalog::load(&path).expect("load bundled catalog");
    assert_eq!(catalog.records(), studyrec_core::sample::sample_records().as_slice());
}
