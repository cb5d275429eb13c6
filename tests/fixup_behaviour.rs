// tests/fixup_behaviour.rs

mod common;
use crate::common::{init_tracing, make_dist_dir, TestResult, FIXED_JS, SHIMMED_JS};

use std::path::Path;
use std::sync::Arc;

use distfix::fixup::{FixOutcome, Fixer, RetryPolicy, ESMODULE_MARKER};
use distfix::fs::mock::MockFileSystem;
use distfix::fs::RealFileSystem;

fn real_fixer() -> Fixer {
    Fixer::new(Arc::new(RealFileSystem), ESMODULE_MARKER, RetryPolicy::default())
}

#[tokio::test]
async fn shim_between_statements_is_removed_on_disk() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let dist = make_dist_dir(tmp.path())?;
    let file = dist.join("a.js");
    std::fs::write(&file, SHIMMED_JS)?;

    let outcome = real_fixer().fix_file(&file).await?;

    assert_eq!(outcome, FixOutcome::Fixed { removed: 1 });
    assert_eq!(std::fs::read_to_string(&file)?, FIXED_JS);
    Ok(())
}

#[tokio::test]
async fn second_run_is_a_no_op() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let dist = make_dist_dir(tmp.path())?;
    let file = dist.join("a.js");
    std::fs::write(&file, SHIMMED_JS)?;

    let fixer = real_fixer();
    fixer.fix_file(&file).await?;
    let after_first = std::fs::read_to_string(&file)?;

    let outcome = fixer.fix_file(&file).await?;

    assert_eq!(outcome, FixOutcome::Unchanged);
    assert_eq!(std::fs::read_to_string(&file)?, after_first);
    Ok(())
}

#[tokio::test]
async fn non_ascii_content_survives_byte_for_byte() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let dist = make_dist_dir(tmp.path())?;
    let file = dist.join("i18n.js");
    let before = format!("\"use strict\";\r\n{ESMODULE_MARKER}\r\nconst s = \"héllo ✓ 日本\";\n");
    std::fs::write(&file, &before)?;

    real_fixer().fix_file(&file).await?;

    let expected = "\"use strict\";\r\n\r\nconst s = \"héllo ✓ 日本\";\n";
    assert_eq!(std::fs::read(&file)?, expected.as_bytes());
    Ok(())
}

#[tokio::test]
async fn missing_file_performs_no_file_operations() -> TestResult {
    let fs = MockFileSystem::new();
    let fixer = Fixer::new(Arc::new(fs.clone()), ESMODULE_MARKER, RetryPolicy::default());

    let outcome = fixer.fix_file(Path::new("/dist/gone.js")).await?;

    assert_eq!(outcome, FixOutcome::Missing);
    assert_eq!(fs.read_count(), 0);
    assert_eq!(fs.write_count(), 0);
    Ok(())
}

#[tokio::test]
async fn file_without_marker_is_not_rewritten() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/dist/clean.js", "console.log(1);");
    let fixer = Fixer::new(Arc::new(fs.clone()), ESMODULE_MARKER, RetryPolicy::default());

    let outcome = fixer.fix_file(Path::new("/dist/clean.js")).await?;

    assert_eq!(outcome, FixOutcome::Unchanged);
    assert_eq!(fs.read_count(), 1);
    assert_eq!(fs.write_count(), 0);
    Ok(())
}

#[tokio::test]
async fn dry_run_reports_but_does_not_write() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/dist/a.js", SHIMMED_JS);
    let fixer = Fixer::new(Arc::new(fs.clone()), ESMODULE_MARKER, RetryPolicy::default())
        .with_dry_run(true);

    let outcome = fixer.fix_file(Path::new("/dist/a.js")).await?;

    assert_eq!(outcome, FixOutcome::Fixed { removed: 1 });
    assert_eq!(fs.write_count(), 0);
    assert_eq!(fs.contents("/dist/a.js").as_deref(), Some(SHIMMED_JS));
    Ok(())
}

#[tokio::test]
async fn custom_marker_is_honoured() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("/dist/a.js", "keep/*STRIP*/keep");
    let fixer = Fixer::new(Arc::new(fs.clone()), "/*STRIP*/", RetryPolicy::default());

    fixer.fix_file(Path::new("/dist/a.js")).await?;

    assert_eq!(fs.contents("/dist/a.js").as_deref(), Some("keepkeep"));
    Ok(())
}
