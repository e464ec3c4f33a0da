/// A known data file and the two literal markers that represent the
/// on/off states of its toggleable tag.
///
/// Markers are matched as raw bytes, never parsed as XML. Whitespace or
/// attributes inside the tag will not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRule {
    pub filename: &'static str,
    pub on_marker: &'static str,
    pub off_marker: &'static str,
}

impl FileRule {
    const fn new(
        filename: &'static str,
        on_marker: &'static str,
        off_marker: &'static str,
    ) -> Self {
        Self {
            filename,
            on_marker,
            off_marker,
        }
    }

    /// Returns the `(from, to)` marker pair that applies to `content`.
    ///
    /// The on-marker wins when both are present. `None` means the file
    /// carries neither marker and must be left alone.
    pub fn flip_direction(&self, content: &[u8]) -> Option<(&'static str, &'static str)> {
        if contains(content, self.on_marker.as_bytes()) {
            Some((self.on_marker, self.off_marker))
        } else if contains(content, self.off_marker.as_bytes()) {
            Some((self.off_marker, self.on_marker))
        } else {
            None
        }
    }
}

const DEFAULT_HAVE_ON: &str = "<defaultHave>true</defaultHave>";
const DEFAULT_HAVE_OFF: &str = "<defaultHave>false</defaultHave>";

/// The fixed rules, in display order.
pub const RULES: [FileRule; 5] = [
    FileRule::new(
        "Music.xml",
        "<firstLock>true</firstLock>",
        "<firstLock>false</firstLock>",
    ),
    FileRule::new(
        "Event.xml",
        "<alwaysOpen>true</alwaysOpen>",
        "<alwaysOpen>false</alwaysOpen>",
    ),
    FileRule::new("Chara.xml", DEFAULT_HAVE_ON, DEFAULT_HAVE_OFF),
    FileRule::new("NamePlate.xml", DEFAULT_HAVE_ON, DEFAULT_HAVE_OFF),
    FileRule::new("AvatarAccessory.xml", DEFAULT_HAVE_ON, DEFAULT_HAVE_OFF),
];

/// Read-only lookup over a slice of [`FileRule`]s.
///
/// Adding a file type is a data change to [`RULES`]; the counter and the
/// toggler only ever iterate the table.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    rules: &'static [FileRule],
}

impl RuleTable {
    pub const fn new(rules: &'static [FileRule]) -> Self {
        Self { rules }
    }

    /// Find the rule for an exact, case-sensitive filename.
    pub fn lookup(&self, filename: &str) -> Option<&'static FileRule> {
        self.rules.iter().find(|rule| rule.filename == filename)
    }

    pub fn get(&self, index: usize) -> Option<&'static FileRule> {
        self.rules.get(index)
    }

    pub fn rules(&self) -> impl Iterator<Item = &'static FileRule> + '_ {
        self.rules.iter()
    }

    pub fn filenames(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.filename)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(&RULES)
    }
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
pub fn find_first(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find_first(haystack, needle).is_some()
}

/// Replace only the first occurrence of `from` with `to`.
///
/// Returns `None` when `from` does not occur, leaving the caller's buffer
/// untouched.
pub fn replace_first(content: &[u8], from: &str, to: &str) -> Option<Vec<u8>> {
    let start = find_first(content, from.as_bytes())?;
    let end = start + from.len();

    let mut updated = Vec::with_capacity(content.len() - from.len() + to.len());
    updated.extend_from_slice(&content[..start]);
    updated.extend_from_slice(to.as_bytes());
    updated.extend_from_slice(&content[end..]);
    Some(updated)
}
