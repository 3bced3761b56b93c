//! Integration tests for Settings layered loading.
//!
//! Global and explicit files live in temp directories; environment
//! variables are injected as a map so tests never touch the process env.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use exprtree::config::{env_source, ConfigError, Settings};
use exprtree::util::testing;
use exprtree::{QueueStrategy, TraversalOrder, TreeError};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn env(vars: &[(&str, &str)]) -> config::Environment {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env_source().source(Some(map))
}

// ============================================================
// Precedence
// ============================================================

#[test]
fn given_global_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let global = write_config(&dir, "exprtree.toml", "traversal_order = \"Postorder\"\n");

    // Act
    let settings = Settings::load_with(Some(&global), None, env(&[])).unwrap();

    // Assert
    assert_eq!(settings.traversal_order, TraversalOrder::PostOrder);
    assert_eq!(settings.queue_strategy, QueueStrategy::Linked);
}

#[test]
fn given_explicit_config_when_load_then_overrides_global() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let global = write_config(
        &dir,
        "global.toml",
        "traversal_order = \"Postorder\"\nfree_list_prealloc = 10\n",
    );
    let explicit = write_config(
        &dir,
        "explicit.toml",
        "traversal_order = \"Inorder\"\nqueue_strategy = \"STLQueue\"\n",
    );

    // Act
    let settings = Settings::load_with(Some(&global), Some(&explicit), env(&[])).unwrap();

    // Assert
    assert_eq!(settings.traversal_order, TraversalOrder::InOrder);
    assert_eq!(settings.queue_strategy, QueueStrategy::Std);
    assert_eq!(settings.free_list_prealloc, 10, "global value survives");
}

#[test]
fn given_env_vars_when_load_then_override_files() {
    let dir = TempDir::new().unwrap();
    let explicit = write_config(&dir, "explicit.toml", "node_limit = 100\n");

    let settings = Settings::load_with(
        None,
        Some(&explicit),
        env(&[("EXPRTREE_NODE_LIMIT", "12"), ("EXPRTREE_QUEUE_STRATEGY", "STLQueue")]),
    )
    .unwrap();

    assert_eq!(settings.node_limit, Some(12));
    assert_eq!(settings.queue_strategy, QueueStrategy::Std);
}

#[test]
fn given_missing_global_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let settings = Settings::load_with(Some(&missing), None, env(&[])).unwrap();

    assert_eq!(settings, Settings::default());
}

// ============================================================
// Failures
// ============================================================

#[test]
fn given_missing_explicit_when_load_then_read_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = Settings::load_with(None, Some(&missing), env(&[])).unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn given_malformed_toml_when_load_then_parse_error() {
    let dir = TempDir::new().unwrap();
    let bad = write_config(&dir, "bad.toml", "traversal_order = [\n");

    let err = Settings::load_with(None, Some(&bad), env(&[])).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn given_unknown_order_in_file_when_load_then_unknown_order() {
    let dir = TempDir::new().unwrap();
    let bad = write_config(&dir, "bad.toml", "traversal_order = \"Zigzag\"\n");

    let err = Settings::load_with(None, Some(&bad), env(&[])).unwrap_err();

    match err {
        ConfigError::Invalid(TreeError::UnknownOrder(msg)) => {
            assert_eq!(msg, "Unknown/None Implemented Traversal Order - Zigzag")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_unknown_queue_in_env_when_load_then_unknown_order() {
    let err = Settings::load_with(None, None, env(&[("EXPRTREE_QUEUE_STRATEGY", "Ring")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(TreeError::UnknownOrder(_))));
}

#[test]
fn given_non_numeric_limit_in_env_when_load_then_env_error() {
    let err = Settings::load_with(None, None, env(&[("EXPRTREE_NODE_LIMIT", "lots")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Env(_)));
}

// ============================================================
// Round trip through TOML
// ============================================================

#[test]
fn given_effective_settings_when_written_and_reloaded_then_same() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let original = Settings {
        traversal_order: TraversalOrder::PreOrder,
        queue_strategy: QueueStrategy::Std,
        free_list_prealloc: 3,
        node_limit: Some(64),
    };
    let path = write_config(&dir, "dump.toml", &original.to_toml().unwrap());

    // Act
    let reloaded = Settings::load_with(None, Some(&path), env(&[])).unwrap();

    // Assert
    assert_eq!(reloaded, original);
}
