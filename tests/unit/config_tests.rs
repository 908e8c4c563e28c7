use std::fs;
use std::path::{Path, PathBuf};

use scoop::config::{Config, ScopeKind};
use scoop::test_utils::fixtures::DataRootFixture;
use scoop::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn config_sections_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "default",
            input: "tests/fixtures/configs/default.toml",
            expected: (11usize, None, None, None, ScopeKind::Community, true),
            should_panic: false,
        },
        TestCase {
            name: "custom",
            input: "tests/fixtures/configs/custom.toml",
            expected: (
                5usize,
                Some(42u64),
                Some(PathBuf::from("data/ratings.db")),
                Some("ana".to_string()),
                ScopeKind::Personal,
                false,
            ),
            should_panic: false,
        },
        TestCase {
            name: "partial",
            input: "tests/fixtures/configs/partial.toml",
            expected: (11usize, Some(7u64), None, None, ScopeKind::Community, true),
            should_panic: false,
        },
    ];

    run_table_tests(cases, |relative_path| {
        let path = fixture_path(relative_path);
        let content = fs::read_to_string(&path).expect("read fixture");
        let config = Config::from_toml(&content).expect("parse config");
        (
            config.bandit.outcomes,
            config.bandit.seed,
            config.store.database,
            config.store.user,
            config.recommend.scope,
            config.recommend.fallback_to_catalog,
        )
    })?;
    Ok(())
}

#[test]
fn config_rejects_degenerate_scale() {
    let content =
        fs::read_to_string(fixture_path("tests/fixtures/configs/invalid_scale.toml")).unwrap();
    let err = Config::from_toml(&content).unwrap_err();
    assert_eq!(err.code(), "config");
}

#[test]
fn config_database_path_resolution() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "default database",
            input: None,
            expected: PathBuf::from("/data/scoop.db"),
            should_panic: false,
        },
        TestCase {
            name: "relative database",
            input: Some("nested/ratings.db"),
            expected: PathBuf::from("/data/nested/ratings.db"),
            should_panic: false,
        },
        TestCase {
            name: "absolute database",
            input: Some("/srv/scoop.db"),
            expected: PathBuf::from("/srv/scoop.db"),
            should_panic: false,
        },
    ];

    run_table_tests(cases, |database: Option<&str>| {
        let mut config = Config::default();
        config.store.database = database.map(PathBuf::from);
        config.database_path(Path::new("/data"))
    })?;
    Ok(())
}

#[test]
fn explicit_config_file_replaces_layers() {
    let fixture = DataRootFixture::new();
    let explicit = fixture.create_file(
        "elsewhere/scoop.toml",
        "[recommend]\nscope = \"personal\"\n",
    );
    // A project file at the root is ignored once an explicit file is given.
    let _ = fixture.write_config("[bandit]\noutcomes = 4\n");

    let config = Config::load(Some(&explicit), &fixture.root).unwrap();
    assert_eq!(config.recommend.scope, ScopeKind::Personal);
    assert_eq!(config.bandit.outcomes, 11);
}

#[test]
fn missing_explicit_config_uses_defaults() {
    let fixture = DataRootFixture::new();
    let missing = fixture.root.join("absent.toml");
    let config = Config::load(Some(&missing), &fixture.root).unwrap();
    assert_eq!(config.bandit.outcomes, 11);
    assert!(config.recommend.fallback_to_catalog);
}

#[test]
fn malformed_config_is_a_config_error() {
    let fixture = DataRootFixture::new();
    let path = fixture.create_file("bad.toml", "[bandit\noutcomes = ");
    let err = Config::load(Some(&path), &fixture.root).unwrap_err();
    assert_eq!(err.code(), "config");
}
