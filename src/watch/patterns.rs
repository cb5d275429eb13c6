// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiled `[watch].exclude` glob patterns.
///
/// Patterns are evaluated against paths relative to the output directory,
/// with forward slashes (e.g. `"js/app.js.map"`). An empty filter excludes
/// nothing.
#[derive(Clone, Default)]
pub struct PathFilter {
    patterns: Vec<String>,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFilter")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl PathFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let exclude_set = if patterns.is_empty() {
            None
        } else {
            Some(build_globset(patterns).context("building exclude globset")?)
        };
        Ok(Self {
            patterns: patterns.to_vec(),
            exclude_set,
        })
    }

    /// True if `rel_path` matches any exclude pattern.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        self.exclude_set
            .as_ref()
            .is_some_and(|set| set.is_match(rel_path))
    }
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
