use camino::Utf8PathBuf;
use std::collections::VecDeque;
use std::fmt;

/// Maximum number of change records kept from a single toggle pass.
pub const HISTORY_CAPACITY: usize = 5;

/// One successful flip of a marker inside a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: Utf8PathBuf,
    pub from_marker: &'static str,
    pub to_marker: &'static str,
}

impl ChangeRecord {
    pub fn new(path: Utf8PathBuf, from_marker: &'static str, to_marker: &'static str) -> Self {
        Self {
            path,
            from_marker,
            to_marker,
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updated {}: Changed {} to {}",
            self.path, self.from_marker, self.to_marker
        )
    }
}

/// Bounded list of the most recent change records plus a highlight cursor.
///
/// Pushing past [`HISTORY_CAPACITY`] drops the oldest record. The highlight
/// always follows the newest record on push, so after a pass it sits on the
/// last entry (or is `None` when nothing changed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeHistory {
    records: VecDeque<ChangeRecord>,
    highlight: Option<usize>,
}

impl ChangeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChangeRecord) {
        if self.records.len() == HISTORY_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(record);
        self.highlight = Some(self.records.len() - 1);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn highlighted(&self) -> Option<&ChangeRecord> {
        self.highlight.and_then(|index| self.records.get(index))
    }

    /// Move the highlight towards the oldest record. Returns `true` if it moved.
    pub fn move_up(&mut self) -> bool {
        match self.highlight {
            Some(index) if index > 0 => {
                self.highlight = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Move the highlight towards the newest record. Returns `true` if it moved.
    pub fn move_down(&mut self) -> bool {
        match self.highlight {
            Some(index) if index + 1 < self.records.len() => {
                self.highlight = Some(index + 1);
                true
            }
            _ => false,
        }
    }
}

impl FromIterator<ChangeRecord> for ChangeHistory {
    fn from_iter<I: IntoIterator<Item = ChangeRecord>>(iter: I) -> Self {
        let mut history = Self::new();
        for record in iter {
            history.push(record);
        }
        history
    }
}
