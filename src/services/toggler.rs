//! In-place marker flip across every matching data file under a root directory.

use crate::models::rules::replace_first;
use crate::models::{ChangeHistory, ChangeRecord, FileRule, RuleTable};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur during a toggle pass
#[derive(Error, Debug)]
pub enum ToggleError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk aborted under {root}: {source}")]
    Walk {
        root: Utf8PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Result of one toggle pass.
#[derive(Debug, Default)]
pub struct ToggleOutcome {
    /// The last changes made, oldest first
    pub history: ChangeHistory,

    /// Set when the walk stopped early; `history` still holds what was done
    pub walk_error: Option<ToggleError>,

    /// Files that matched but could not be read or written
    pub file_errors: usize,

    /// Total files rewritten, including those trimmed out of `history`
    pub modified: usize,
}

impl ToggleOutcome {
    pub fn is_aborted(&self) -> bool {
        self.walk_error.is_some()
    }
}

/// Flip the marker of `selected_filename` in every matching file under `root`.
///
/// Per-file read/write failures are logged and skipped. A traversal failure
/// stops the pass but keeps the changes recorded so far. An unknown filename
/// touches nothing.
pub fn apply_toggle(root: &Utf8Path, selected_filename: &str, rules: &RuleTable) -> ToggleOutcome {
    let mut outcome = ToggleOutcome::default();

    let Some(rule) = rules.lookup(selected_filename) else {
        tracing::warn!("No rule for {}, nothing to toggle", selected_filename);
        return outcome;
    };

    tracing::info!("Toggling {} under {}", rule.filename, root);

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                tracing::error!("Error walking directory {}: {}", root, source);
                outcome.walk_error = Some(ToggleError::Walk {
                    root: root.to_path_buf(),
                    source,
                });
                break;
            }
        };

        if entry.file_type().is_dir() || entry.file_name() != rule.filename {
            continue;
        }

        match toggle_file(entry.path(), rule) {
            Ok(Some(record)) => {
                tracing::debug!("{}", record);
                outcome.modified += 1;
                outcome.history.push(record);
            }
            Ok(None) => {
                tracing::debug!("No marker in {}, left untouched", entry.path().display());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                outcome.file_errors += 1;
            }
        }
    }

    tracing::info!(
        "Toggle pass for {} finished: {} modified, {} file errors, aborted: {}",
        rule.filename,
        outcome.modified,
        outcome.file_errors,
        outcome.is_aborted()
    );
    outcome
}

/// Flip the first marker occurrence in one file.
///
/// `Ok(None)` means the file holds neither marker and was not rewritten.
pub fn toggle_file(path: &Path, rule: &FileRule) -> Result<Option<ChangeRecord>, ToggleError> {
    let display_path = utf8_lossy(path);

    let content = fs::read(path).map_err(|source| ToggleError::Read {
        path: display_path.clone(),
        source,
    })?;

    let Some((from, to)) = rule.flip_direction(&content) else {
        return Ok(None);
    };
    let Some(updated) = replace_first(&content, from, to) else {
        return Ok(None);
    };

    fs::write(path, updated).map_err(|source| ToggleError::Write {
        path: display_path.clone(),
        source,
    })?;

    Ok(Some(ChangeRecord::new(display_path, from, to)))
}

fn utf8_lossy(path: &Path) -> Utf8PathBuf {
    match Utf8Path::from_path(path) {
        Some(utf8) => utf8.to_path_buf(),
        None => Utf8PathBuf::from(path.to_string_lossy().into_owned()),
    }
}
