use distfix::config::RawConfigFile;

/// Builder for `RawConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_marker(mut self, marker: &str) -> Self {
        self.config.config.marker = marker.to_string();
        self
    }

    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.config.poll_interval_ms = ms;
        self
    }

    pub fn with_retry(mut self, max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        self.config.retry.max_attempts = max_attempts;
        self.config.retry.base_delay_ms = base_delay_ms;
        self.config.retry.max_delay_ms = max_delay_ms;
        self
    }

    pub fn with_exclude(mut self, pattern: &str) -> Self {
        self.config.watch.exclude.push(pattern.to_string());
        self
    }

    /// The unvalidated config, for tests that exercise validation.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
