//! Services module - the filesystem side of TagFlip.
//!
//! Both services walk the tree synchronously with `walkdir`, visiting
//! entries in file-name order so results are reproducible. They have no
//! dependency on the terminal layer.
//!
//! # Components
//!
//! - [`scan_directory`]: counts files named after each rule. All or nothing:
//!   any traversal error fails the whole scan with [`ScanError`].
//! - [`apply_toggle`]: flips the first marker occurrence in every file named
//!   after the selected rule and rewrites it in place. Per-file I/O errors
//!   are logged and skipped; a traversal error stops the pass but keeps the
//!   records gathered so far in the [`ToggleOutcome`].

pub mod counter;
pub mod toggler;

pub use counter::{ScanError, ScanResult, scan_directory};
pub use toggler::{ToggleError, ToggleOutcome, apply_toggle, toggle_file};
