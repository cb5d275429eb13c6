// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DistfixError, Result};
use crate::watch::PathFilter;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DistfixError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.retry, raw.watch))
    }
}

pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_retry(cfg)?;
    validate_excludes(cfg)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.marker.is_empty() {
        return Err(DistfixError::ConfigError(
            "[config].marker must not be empty".to_string(),
        ));
    }

    if cfg.config.poll_interval_ms == 0 {
        return Err(DistfixError::ConfigError(
            "[config].poll_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_retry(cfg: &RawConfigFile) -> Result<()> {
    let retry = &cfg.retry;

    if retry.max_attempts == 0 {
        return Err(DistfixError::ConfigError(
            "[retry].max_attempts must be >= 1 (got 0)".to_string(),
        ));
    }

    if retry.base_delay_ms > retry.max_delay_ms {
        return Err(DistfixError::ConfigError(format!(
            "[retry].base_delay_ms ({}) must not exceed [retry].max_delay_ms ({})",
            retry.base_delay_ms, retry.max_delay_ms
        )));
    }

    Ok(())
}

fn validate_excludes(cfg: &RawConfigFile) -> Result<()> {
    PathFilter::new(&cfg.watch.exclude)
        .map(|_| ())
        .map_err(|e| DistfixError::ConfigError(format!("[watch].exclude: {e:#}")))
}
