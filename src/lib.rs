// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fixup;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_or_default, ConfigFile};
use crate::engine::{fix_directory, Runtime, RuntimeEvent, RuntimeOptions};
use crate::fixup::Fixer;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::PathFilter;

/// Name of the output directory looked up next to the executable.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the fixer (marker, retry policy, dry-run)
/// - batch mode, or watch mode (watcher + job runtime + Ctrl-C handling)
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;

    let dist_dir = resolve_dist_dir(args.dir.as_deref(), args.config.as_deref(), &cfg);
    let marker = args
        .marker
        .clone()
        .unwrap_or_else(|| cfg.marker().to_string());
    if marker.is_empty() {
        bail!("--marker must not be empty");
    }

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    if !fs.is_dir(&dist_dir) {
        bail!("output directory {:?} does not exist", dist_dir);
    }

    let filter = PathFilter::new(&cfg.watch_section().exclude)?;
    let fixer = Fixer::new(Arc::clone(&fs), marker, cfg.retry_policy()).with_dry_run(args.dry_run);

    debug!(?dist_dir, ?filter, dry_run = args.dry_run, watch = args.watch, "resolved settings");

    if args.watch {
        run_watch(&cfg, dist_dir, filter, fs, fixer).await
    } else {
        run_batch(&dist_dir, &filter, fs.as_ref(), &fixer).await
    }
}

async fn run_batch(
    dist_dir: &Path,
    filter: &PathFilter,
    fs: &dyn FileSystem,
    fixer: &Fixer,
) -> Result<()> {
    let report = fix_directory(fs, fixer, dist_dir, filter).await?;
    if fixer.is_dry_run() {
        println!("Dry run: {} file(s) would be fixed.", report.fixed);
    }
    println!("Finished fixing files!");
    Ok(())
}

async fn run_watch(
    cfg: &ConfigFile,
    dist_dir: PathBuf,
    filter: PathFilter,
    fs: Arc<dyn FileSystem>,
    fixer: Fixer,
) -> Result<()> {
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let watcher = crate::watch::spawn_watcher(dist_dir, filter, fs, rt_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let options = RuntimeOptions {
        poll_interval: cfg.poll_interval(),
        grace_period: cfg.grace_period(),
        root: watcher.root().to_path_buf(),
    };

    info!(root = ?watcher.root(), "watching for changes; press Ctrl-C to stop");

    let runtime = Runtime::new(rt_rx, fixer, options);
    let result = runtime.run().await;

    drop(watcher);
    println!("Watcher stopped");

    result.map_err(Into::into)
}

/// Pick the output directory.
///
/// 1. `--dir`
/// 2. `[config].dist_dir`, relative to the config file's directory
/// 3. `dist` next to the executable
pub fn resolve_dist_dir(cli_dir: Option<&Path>, config_path: Option<&Path>, cfg: &ConfigFile) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir.to_path_buf();
    }

    if let Some(dir) = &cfg.config_section().dist_dir {
        if dir.is_absolute() {
            return dir.clone();
        }
        let base = config_path
            .map(config_root_dir)
            .unwrap_or_else(program_dir);
        return base.join(dir);
    }

    program_dir().join(DEFAULT_DIST_DIR)
}

/// Directory containing the config file, or the current working directory
/// for a bare file name.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Directory containing the running executable, falling back to the current
/// working directory.
fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
