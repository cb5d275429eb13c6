// src/config/mod.rs

//! Configuration loading and validation for distfix.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate timing, retry and pattern settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default, parse_str};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, RetrySection, WatchSection};
pub use validate::validate_raw_config;
