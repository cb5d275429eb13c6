// src/errors.rs

//! Crate-wide error type and aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistfixError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("File watch error: {0}")]
    WatchError(#[from] notify::Error),

    /// A file stayed locked (permission / sharing conflict) for every attempt
    /// the retry policy allowed.
    #[error("file {path:?} still locked after {attempts} attempts: {source}")]
    RetriesExhausted {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    /// Non-recoverable IO failure on a file (disk full, invalid UTF-8, ...).
    #[error("fatal IO error on {path:?}: {source}")]
    Fatal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DistfixError>;
