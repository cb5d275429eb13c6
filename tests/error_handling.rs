// tests/error_handling.rs

mod common;
use crate::common::{init_tracing, TestResult, FIXED_JS, SHIMMED_JS};

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use distfix::config::{parse_str, ConfigFile};
use distfix::errors::DistfixError;
use distfix::fixup::{FixOutcome, Fixer, RetryPolicy, ESMODULE_MARKER};
use distfix::fs::mock::MockFileSystem;
use distfix_test_utils::builders::ConfigFileBuilder;

fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(1), Duration::from_millis(4))
}

#[tokio::test]
async fn transient_lock_on_read_and_write_is_retried() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/dist/a.js", SHIMMED_JS);
    // The first two reads hit the lock.
    fs.fail_next("/dist/a.js", io::ErrorKind::PermissionDenied, 2);
    let fixer = Fixer::new(Arc::new(fs.clone()), ESMODULE_MARKER, fast_policy(5));

    let outcome = fixer.fix_file(Path::new("/dist/a.js")).await?;

    assert_eq!(outcome, FixOutcome::Fixed { removed: 1 });
    assert_eq!(fs.read_count(), 3);
    assert_eq!(fs.contents("/dist/a.js").as_deref(), Some(FIXED_JS));
    Ok(())
}

#[tokio::test]
async fn lock_that_never_clears_exhausts_retries() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/dist/a.js", SHIMMED_JS);
    fs.fail_next("/dist/a.js", io::ErrorKind::PermissionDenied, 100);
    let fixer = Fixer::new(Arc::new(fs.clone()), ESMODULE_MARKER, fast_policy(3));

    let result = fixer.fix_file(Path::new("/dist/a.js")).await;

    match result {
        Err(DistfixError::RetriesExhausted { path, attempts, source }) => {
            assert_eq!(path, Path::new("/dist/a.js"));
            assert_eq!(attempts, 3);
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(fs.read_count(), 3);
    assert_eq!(fs.contents("/dist/a.js").as_deref(), Some(SHIMMED_JS));
}

#[tokio::test]
async fn invalid_utf8_is_fatal_and_not_retried() {
    let fs = MockFileSystem::new();
    fs.add_file("/dist/logo.png", vec![0x89, b'P', b'N', b'G', 0xff, 0xfe]);
    let fixer = Fixer::new(Arc::new(fs.clone()), ESMODULE_MARKER, fast_policy(5));

    let result = fixer.fix_file(Path::new("/dist/logo.png")).await;

    match result {
        Err(DistfixError::Fatal { path, source }) => {
            assert_eq!(path, Path::new("/dist/logo.png"));
            assert_eq!(source.kind(), io::ErrorKind::InvalidData);
        }
        other => panic!("expected Fatal, got {other:?}"),
    }
    assert_eq!(fs.read_count(), 1);
}

#[tokio::test]
async fn file_vanishing_mid_read_is_skipped_silently() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/dist/a.js", SHIMMED_JS);
    fs.fail_next("/dist/a.js", io::ErrorKind::NotFound, 1);
    let fixer = Fixer::new(Arc::new(fs.clone()), ESMODULE_MARKER, fast_policy(5));

    let outcome = fixer.fix_file(Path::new("/dist/a.js")).await?;

    assert_eq!(outcome, FixOutcome::Missing);
    assert_eq!(fs.write_count(), 0);
    Ok(())
}

#[test]
fn empty_marker_is_a_config_error() {
    let raw = ConfigFileBuilder::new().with_marker("").build_raw();

    match ConfigFile::try_from(raw) {
        Err(DistfixError::ConfigError(msg)) => assert!(msg.contains("marker")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn zero_poll_interval_is_a_config_error() {
    let raw = ConfigFileBuilder::new().with_poll_interval_ms(0).build_raw();

    match ConfigFile::try_from(raw) {
        Err(DistfixError::ConfigError(msg)) => assert!(msg.contains("poll_interval_ms")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn inverted_retry_delays_are_a_config_error() {
    let raw = ConfigFileBuilder::new().with_retry(3, 500, 100).build_raw();

    match ConfigFile::try_from(raw) {
        Err(DistfixError::ConfigError(msg)) => {
            assert!(msg.contains("base_delay_ms"));
            assert!(msg.contains("max_delay_ms"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn zero_attempts_is_a_config_error() {
    let raw = ConfigFileBuilder::new().with_retry(0, 10, 100).build_raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(DistfixError::ConfigError(_))
    ));
}

#[test]
fn bad_exclude_glob_is_a_config_error() {
    let raw = ConfigFileBuilder::new().with_exclude("src/[oops").build_raw();

    match ConfigFile::try_from(raw) {
        Err(DistfixError::ConfigError(msg)) => assert!(msg.contains("exclude")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn unknown_key_is_a_toml_error() {
    let result = parse_str("[config]\nmarkr = \"typo\"\n");
    assert!(matches!(result, Err(DistfixError::TomlError(_))));
}
