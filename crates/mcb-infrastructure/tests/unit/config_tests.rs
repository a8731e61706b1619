//! `ConfigLoader` and data-path resolution behavior (§10.3, §10.5).

use std::io::Write;

use mcb_infrastructure::config::{paths, AppConfig, ConfigLoader};
use serial_test::serial;

#[test]
fn default_config_shape_is_stable() {
    insta::assert_debug_snapshot!(AppConfig::default(), @r###"
    AppConfig {
        data_dir: None,
        concurrency: 3,
        recover_on_start: true,
        embedding: EmbeddingProviderConfig {
            provider: "",
            model: None,
            api_key: None,
            base_url: None,
            extra: {},
        },
    }
    "###);
}

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.toml");
    let config = ConfigLoader::new().with_config_path(&missing).load();
    assert!(config.is_err(), "an explicitly requested but absent file should error");

    // No explicit path set: the default filename search is allowed to miss.
    let config = ConfigLoader::new().load().unwrap();
    assert_eq!(config.concurrency, mcb_domain::constants::CONCURRENCY_DEFAULT);
    assert!(config.recover_on_start);
}

#[test]
fn toml_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mcb.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "concurrency = 7").unwrap();
    writeln!(file, "recover_on_start = false").unwrap();
    writeln!(file, "[embedding]").unwrap();
    writeln!(file, "provider = \"openai\"").unwrap();
    writeln!(file, "model = \"text-embedding-3-small\"").unwrap();
    drop(file);

    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
    assert_eq!(config.concurrency, 7);
    assert!(!config.recover_on_start);
    assert_eq!(config.embedding.provider, "openai");
    assert_eq!(config.embedding.model.as_deref(), Some("text-embedding-3-small"));
}

#[test]
#[serial]
fn env_override_wins_over_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mcb.toml");
    std::fs::write(&path, "concurrency = 2\n").unwrap();

    std::env::set_var("MCB_CONCURRENCY", "9");
    let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
    std::env::remove_var("MCB_CONCURRENCY");

    assert_eq!(config.concurrency, 9);
}

#[test]
#[serial]
fn data_dir_honors_env_override_and_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested").join("store-root");
    std::env::set_var(mcb_domain::constants::STORE_PATH_ENV, &target);

    let resolved = paths::data_dir().unwrap();

    std::env::remove_var(mcb_domain::constants::STORE_PATH_ENV);

    assert_eq!(resolved, target);
    assert!(target.is_dir());
}

#[test]
#[serial]
fn installation_id_is_created_once_and_then_reused() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(mcb_domain::constants::STORE_PATH_ENV, dir.path());

    let first = paths::installation_id().unwrap();
    let second = paths::installation_id().unwrap();

    std::env::remove_var(mcb_domain::constants::STORE_PATH_ENV);

    assert_eq!(first, second);
    assert!(uuid::Uuid::parse_str(&first).is_ok());
}
