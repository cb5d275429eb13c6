// tests/batch_mode.rs

mod common;
use crate::common::{init_tracing, make_dist_dir, TestResult, FIXED_JS, SHIMMED_JS};

use std::sync::Arc;

use distfix::engine::{fix_directory, BatchReport};
use distfix::fixup::{Fixer, RetryPolicy, ESMODULE_MARKER};
use distfix::fs::RealFileSystem;
use distfix::watch::PathFilter;

#[tokio::test]
async fn every_top_level_file_is_fixed_once() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let dist = make_dist_dir(tmp.path())?;
    std::fs::write(dist.join("a.js"), SHIMMED_JS)?;
    std::fs::write(dist.join("b.js"), format!("{ESMODULE_MARKER}exports.b = 2;"))?;
    std::fs::write(dist.join("c.js"), "exports.c = 3;")?;
    std::fs::create_dir(dist.join("chunks"))?;
    std::fs::write(dist.join("chunks/d.js"), SHIMMED_JS)?;

    let fs = RealFileSystem;
    let fixer = Fixer::new(Arc::new(RealFileSystem), ESMODULE_MARKER, RetryPolicy::default());
    let report = fix_directory(&fs, &fixer, &dist, &PathFilter::default()).await?;

    assert_eq!(
        report,
        BatchReport {
            fixed: 2,
            unchanged: 1,
            missing: 0,
            skipped: 1,
        }
    );
    assert_eq!(std::fs::read_to_string(dist.join("a.js"))?, FIXED_JS);
    assert_eq!(std::fs::read_to_string(dist.join("b.js"))?, "exports.b = 2;");
    assert_eq!(std::fs::read_to_string(dist.join("c.js"))?, "exports.c = 3;");
    // Non-recursive: nested files are left alone.
    assert_eq!(std::fs::read_to_string(dist.join("chunks/d.js"))?, SHIMMED_JS);
    Ok(())
}

#[tokio::test]
async fn excluded_files_are_skipped() -> TestResult {
    init_tracing();
    let tmp = tempfile::tempdir()?;
    let dist = make_dist_dir(tmp.path())?;
    std::fs::write(dist.join("a.js"), SHIMMED_JS)?;
    std::fs::write(dist.join("a.js.map"), SHIMMED_JS)?;

    let fs = RealFileSystem;
    let fixer = Fixer::new(Arc::new(RealFileSystem), ESMODULE_MARKER, RetryPolicy::default());
    let filter = PathFilter::new(&["*.map".to_string()])?;
    let report = fix_directory(&fs, &fixer, &dist, &filter).await?;

    assert_eq!(report.fixed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(std::fs::read_to_string(dist.join("a.js.map"))?, SHIMMED_JS);
    Ok(())
}

#[tokio::test]
async fn missing_directory_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let fs = RealFileSystem;
    let fixer = Fixer::new(Arc::new(RealFileSystem), ESMODULE_MARKER, RetryPolicy::default());

    let result = fix_directory(&fs, &fixer, &tmp.path().join("nope"), &PathFilter::default()).await;

    assert!(result.is_err());
}
