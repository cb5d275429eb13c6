// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `distfix`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "distfix",
    version,
    about = "Strip the CommonJS `__esModule` interop shim from bundler output.",
    long_about = None
)]
pub struct CliArgs {
    /// Keep watching the output directory and fix files as they are written.
    ///
    /// Without this flag every entry of the directory is fixed once and the
    /// program exits.
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Output directory to fix.
    ///
    /// Default: `[config].dist_dir`, or `dist` next to the executable.
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Optional config file (TOML).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the marker string that gets removed.
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Report which files would change, but don't write anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DISTFIX_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
