#![allow(dead_code)]

use std::error::Error;
use std::path::{Path, PathBuf};

pub use distfix_test_utils::{init_tracing, wait_until};

pub type TestResult = Result<(), Box<dyn Error>>;

/// The input from the end-to-end example: a shim between two statements.
pub const SHIMMED_JS: &str =
    r#"console.log(1);Object.defineProperty(exports, "__esModule", { value: true });console.log(2);"#;

/// The expected output for [`SHIMMED_JS`].
pub const FIXED_JS: &str = "console.log(1);console.log(2);";

/// Create `<tmp>/dist` and return its path.
pub fn make_dist_dir(tmp: &Path) -> std::io::Result<PathBuf> {
    let dist = tmp.join("dist");
    std::fs::create_dir_all(&dist)?;
    Ok(dist)
}
