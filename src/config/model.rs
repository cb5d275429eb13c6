// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::fixup::{RetryPolicy, ESMODULE_MARKER};

/// Configuration file *as read from TOML*, before validation.
///
/// ```toml
/// [config]
/// dist_dir = "dist"
/// marker = 'Object.defineProperty(exports, "__esModule", { value: true });'
/// poll_interval_ms = 10
/// grace_period_ms = 100
///
/// [retry]
/// max_attempts = 20
/// base_delay_ms = 10
/// max_delay_ms = 1000
///
/// [watch]
/// exclude = ["**/*.map"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub retry: RetrySection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// `Default`, so the invariants checked there always hold.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config: ConfigSection,
    retry: RetrySection,
    watch: WatchSection,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.config, raw.retry, raw.watch)
    }
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        retry: RetrySection,
        watch: WatchSection,
    ) -> Self {
        Self {
            config,
            retry,
            watch,
        }
    }

    pub fn config_section(&self) -> &ConfigSection {
        &self.config
    }

    pub fn watch_section(&self) -> &WatchSection {
        &self.watch
    }

    pub fn marker(&self) -> &str {
        &self.config.marker
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.config.grace_period_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.base_delay_ms),
            Duration::from_millis(self.retry.max_delay_ms),
        )
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Output directory. Relative paths are resolved against the directory
    /// containing the config file.
    #[serde(default)]
    pub dist_dir: Option<PathBuf>,

    /// Literal string removed from every file.
    #[serde(default = "default_marker")]
    pub marker: String,

    /// How often the watch-mode runtime checks for due jobs.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// How long an executed job stays queued before it is purged.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
}

fn default_marker() -> String {
    ESMODULE_MARKER.to_string()
}

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_grace_period_ms() -> u64 {
    100
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            dist_dir: None,
            marker: default_marker(),
            poll_interval_ms: default_poll_interval_ms(),
            grace_period_ms: default_grace_period_ms(),
        }
    }
}

/// `[retry]` section: bounded retry for locked files.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    20
}

fn default_base_delay_ms() -> u64 {
    10
}

fn default_max_delay_ms() -> u64 {
    1000
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Globs (relative to the output directory) that are never fixed, in
    /// either mode.
    #[serde(default)]
    pub exclude: Vec<String>,
}
