// src/watch/exclude.rs

use std::path::Path;

use regex::RegexSet;

/// Compiled exclusion patterns for a single watch.
///
/// Patterns are regular expressions matched against the full event path.
/// They serve double duty: the subscription skips watching directories that
/// match, and the binding loop discards individual events whose path
/// matches before anything is logged or dispatched.
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    set: Option<RegexSet>,
}

impl ExcludeFilter {
    /// A filter that excludes nothing.
    pub fn none() -> Self {
        Self { set: None }
    }

    /// Compile a list of regex patterns. An empty list means no filtering.
    pub fn compile(patterns: &[String]) -> Result<Self, regex::Error> {
        if patterns.is_empty() {
            return Ok(Self::none());
        }

        let set = RegexSet::new(patterns)?;
        Ok(Self { set: Some(set) })
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_none()
    }

    /// Returns true if the path matches any exclusion pattern.
    pub fn matches(&self, path: &Path) -> bool {
        match &self.set {
            Some(set) => set.is_match(&path.to_string_lossy()),
            None => false,
        }
    }
}
