// TagFlip - flips unlock flags in game XML data files
//
// This is the library crate containing the toggle engine and session state.
// The binary crate (main.rs) provides the terminal entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ChangeHistory, ChangeRecord, FileRule, RULES, RuleTable, Settings};
pub use services::{ScanError, ScanResult, ToggleError, ToggleOutcome, apply_toggle, scan_directory};
pub use state::{Mode, Request, Session, StateChange, View};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
