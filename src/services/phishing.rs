//! 钓鱼域名集合
//!
//! Loaded once from a newline-delimited file at startup and read-only
//! afterwards. Matching is exact and case-sensitive.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::{PrivacyApiError, Result};

#[derive(Debug, Clone, Default)]
pub struct PhishingDomainSet {
    domains: HashSet<String>,
    source: Option<PathBuf>,
}

impl PhishingDomainSet {
    /// Load the list, failing open.
    ///
    /// A missing or unreadable file yields an empty set: every domain then
    /// reports "not phishing". The condition is logged as a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_strict(path) {
            Ok(set) => set,
            Err(e) => {
                warn!(
                    "Phishing list unavailable ({}), serving an empty set: every domain will report not phishing",
                    e.message()
                );
                Self::default()
            }
        }
    }

    /// Load the list, failing on a missing or unreadable file.
    pub fn load_strict<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PrivacyApiError::file_operation(format!(
                "Failed to read phishing list {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut set = Self::parse(&content);
        set.source = Some(path.to_path_buf());
        info!(
            "Loaded {} phishing domains from {}",
            set.len(),
            path.display()
        );
        Ok(set)
    }

    /// Build a set from file content. Blank lines are skipped; everything
    /// else is kept verbatim.
    ///
    /// No empty entry is ever stored, so `contains("")` is always false.
    pub fn parse(content: &str) -> Self {
        content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// File the set was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl FromIterator<String> for PhishingDomainSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            domains: iter.into_iter().collect(),
            source: None,
        }
    }
}
