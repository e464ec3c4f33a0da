//! Recursive count of known data files under a root directory.

use crate::models::RuleTable;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use thiserror::Error;
use walkdir::WalkDir;

/// Per-filename counts from one scan, in rule-table order.
///
/// Every filename in the rule table has an entry, even when nothing was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    counts: IndexMap<&'static str, usize>,
}

impl ScanResult {
    fn empty(rules: &RuleTable) -> Self {
        Self {
            counts: rules.filenames().map(|name| (name, 0)).collect(),
        }
    }

    /// Count for `filename`, or 0 for names outside the rule table.
    pub fn count(&self, filename: &str) -> usize {
        self.counts.get(filename).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().map(|(name, count)| (*name, *count))
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// The directory tree could not be fully walked.
#[derive(Error, Debug)]
#[error("Failed to scan {root}: {source}")]
pub struct ScanError {
    pub root: Utf8PathBuf,
    #[source]
    pub source: walkdir::Error,
}

/// Count every non-directory entry under `root` whose file name exactly
/// matches a rule filename.
///
/// Any traversal error aborts the scan and the partial counts are dropped.
pub fn scan_directory(root: &Utf8Path, rules: &RuleTable) -> Result<ScanResult, ScanError> {
    let mut result = ScanResult::empty(rules);

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError {
            root: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        if let Some(count) = result.counts.get_mut(name) {
            *count += 1;
        }
    }

    tracing::info!(
        "Scanned {}: {} matching files ({:?})",
        root,
        result.total(),
        result.counts
    );
    Ok(result)
}
