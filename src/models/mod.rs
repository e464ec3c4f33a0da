//! Data models for TagFlip.
//!
//! - [`FileRule`] / [`RuleTable`]: the fixed filename → marker-pair table
//! - [`ChangeRecord`] / [`ChangeHistory`]: what a toggle pass changed, capped at
//!   [`HISTORY_CAPACITY`] entries with a highlight cursor
//! - [`Settings`]: logging settings loaded from `tagflip.yaml`

pub mod config;
pub mod history;
pub mod rules;

pub use config::Settings;
pub use history::{ChangeHistory, ChangeRecord, HISTORY_CAPACITY};
pub use rules::{FileRule, RULES, RuleTable};
