// Session state module
//
// The Session owns everything one run of the tool knows: the directory being
// worked on, the last scan, and the last toggle pass. It is driven by one
// Request at a time and reports what changed as StateChange events.

use crate::metrics::Metrics;
use crate::models::{ChangeHistory, RuleTable};
use crate::services::{ScanResult, apply_toggle, scan_directory};
use camino::{Utf8Path, Utf8PathBuf};

/// Maximum length of the directory path the prompt accepts
pub const DIRECTORY_INPUT_LIMIT: usize = 200;

/// Operator input, already decoded from key presses by the UI layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Type a character into the directory prompt
    Input(char),

    /// Delete the last character of the directory prompt
    DeleteChar,

    /// Confirm the directory, or apply the toggle for the selected row
    Submit,

    /// Select a table row by index
    SelectRow(usize),

    Up,
    Down,

    /// Leave the change view
    Back,

    /// Focus or blur the file table
    ToggleFocus,

    Quit,
}

/// Change events emitted when the session is modified
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// Directory prompt text changed
    InputChanged { input: String },

    /// A directory was scanned and the session is now browsing it
    ScanCompleted { root: Utf8PathBuf, total: usize },

    /// The scan failed; the session stays at the directory prompt
    ScanFailed { root: Utf8PathBuf, message: String },

    /// A toggle pass finished
    ToggleApplied {
        filename: &'static str,
        modified: usize,
        file_errors: usize,
        aborted: bool,
    },

    SelectionChanged { index: usize },

    FocusChanged { focused: bool },

    HighlightMoved { index: usize },

    ViewChanged { view: ViewKind },

    QuitRequested,
}

/// Which browsing sub-view is showing, without its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Table,
    Changes,
}

/// Browsing sub-view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// The per-file count table
    Table,

    /// Results of the last toggle pass
    Changes {
        history: ChangeHistory,
        /// Traversal error that stopped the pass early, if any
        aborted: Option<String>,
    },
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Table => ViewKind::Table,
            View::Changes { .. } => ViewKind::Changes,
        }
    }
}

/// State while browsing a scanned directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Browser {
    pub root: Utf8PathBuf,
    pub counts: ScanResult,
    pub selected: usize,
    pub table_focused: bool,
    pub view: View,
}

/// Top-level session mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    AwaitingDirectory {
        input: String,
        /// Message from the last failed scan
        last_error: Option<String>,
    },
    Browsing(Browser),
}

/// One interactive session
///
/// Single-threaded: every request runs to completion, including any scan or
/// toggle pass it triggers, before the next one is handled.
pub struct Session {
    mode: Mode,
    rules: RuleTable,
    metrics: Metrics,
    quit: bool,
}

impl Session {
    pub fn new(rules: RuleTable) -> Self {
        Self {
            mode: Mode::AwaitingDirectory {
                input: String::new(),
                last_error: None,
            },
            rules,
            metrics: Metrics::new(),
            quit: false,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The browsing state, if a directory has been scanned
    pub fn browser(&self) -> Option<&Browser> {
        match &self.mode {
            Mode::Browsing(browser) => Some(browser),
            Mode::AwaitingDirectory { .. } => None,
        }
    }

    /// Handle one request and return the events it caused
    pub fn handle(&mut self, request: Request) -> Vec<StateChange> {
        if request == Request::Quit {
            self.quit = true;
            return vec![StateChange::QuitRequested];
        }

        match &mut self.mode {
            Mode::AwaitingDirectory { input, last_error } => match request {
                Request::Input(c) => {
                    if input.chars().count() >= DIRECTORY_INPUT_LIMIT {
                        return Vec::new();
                    }
                    input.push(c);
                    vec![StateChange::InputChanged {
                        input: input.clone(),
                    }]
                }
                Request::DeleteChar => {
                    if input.pop().is_none() {
                        return Vec::new();
                    }
                    vec![StateChange::InputChanged {
                        input: input.clone(),
                    }]
                }
                Request::Submit => {
                    if input.is_empty() {
                        return Vec::new();
                    }
                    let root = Utf8PathBuf::from(input.as_str());
                    match scan_directory(&root, &self.rules) {
                        Ok(counts) => {
                            self.metrics.record_scan();
                            let total = counts.total();
                            self.mode = Mode::Browsing(Browser {
                                root: root.clone(),
                                counts,
                                selected: 0,
                                table_focused: true,
                                view: View::Table,
                            });
                            vec![StateChange::ScanCompleted { root, total }]
                        }
                        Err(e) => {
                            tracing::error!("Error scanning directory: {}", e);
                            self.metrics.record_scan_failure();
                            let message = e.to_string();
                            *last_error = Some(message.clone());
                            vec![StateChange::ScanFailed { root, message }]
                        }
                    }
                }
                _ => Vec::new(),
            },
            Mode::Browsing(browser) => {
                handle_browsing(browser, request, &self.rules, &self.metrics)
            }
        }
    }

    /// Convenience wrapper used by tests and scripted drivers: type `path`
    /// into the prompt and submit it.
    pub fn open_directory(&mut self, path: &Utf8Path) -> Vec<StateChange> {
        let mut changes = Vec::new();
        for c in path.as_str().chars() {
            changes.extend(self.handle(Request::Input(c)));
        }
        changes.extend(self.handle(Request::Submit));
        changes
    }
}

fn handle_browsing(
    browser: &mut Browser,
    request: Request,
    rules: &RuleTable,
    metrics: &Metrics,
) -> Vec<StateChange> {
    match request {
        Request::Submit => {
            // Re-entrant apply while the results are showing is ignored
            if browser.view.kind() == ViewKind::Changes {
                return Vec::new();
            }
            let Some(rule) = rules.get(browser.selected) else {
                return Vec::new();
            };

            let outcome = apply_toggle(&browser.root, rule.filename, rules);
            metrics.record_toggle_pass(outcome.modified, outcome.file_errors, outcome.is_aborted());

            let aborted = outcome.walk_error.as_ref().map(|e| e.to_string());
            let event = StateChange::ToggleApplied {
                filename: rule.filename,
                modified: outcome.modified,
                file_errors: outcome.file_errors,
                aborted: aborted.is_some(),
            };
            browser.view = View::Changes {
                history: outcome.history,
                aborted,
            };
            vec![
                event,
                StateChange::ViewChanged {
                    view: ViewKind::Changes,
                },
            ]
        }
        Request::Back => match browser.view {
            View::Changes { .. } => {
                browser.view = View::Table;
                vec![StateChange::ViewChanged {
                    view: ViewKind::Table,
                }]
            }
            View::Table => Vec::new(),
        },
        Request::Up | Request::Down => {
            let up = request == Request::Up;
            if let View::Changes { history, .. } = &mut browser.view {
                let moved = if up {
                    history.move_up()
                } else {
                    history.move_down()
                };
                return match history.highlight() {
                    Some(index) if moved => vec![StateChange::HighlightMoved { index }],
                    _ => Vec::new(),
                };
            }

            if !browser.table_focused {
                return Vec::new();
            }
            let last = rules.len().saturating_sub(1);
            let next = if up {
                browser.selected.saturating_sub(1)
            } else {
                (browser.selected + 1).min(last)
            };
            select_row(browser, next)
        }
        Request::SelectRow(index) => {
            if index >= rules.len() {
                return Vec::new();
            }
            select_row(browser, index)
        }
        Request::ToggleFocus => {
            browser.table_focused = !browser.table_focused;
            vec![StateChange::FocusChanged {
                focused: browser.table_focused,
            }]
        }
        Request::Input(_) | Request::DeleteChar | Request::Quit => Vec::new(),
    }
}

fn select_row(browser: &mut Browser, index: usize) -> Vec<StateChange> {
    if browser.selected == index {
        return Vec::new();
    }
    browser.selected = index;
    vec![StateChange::SelectionChanged { index }]
}
