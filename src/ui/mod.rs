// UI module - terminal front end
//
// This module contains:
// - TuiController: owns the terminal and drives the Session from key events
// - view: renders the prompt, the count table, and the change list

pub mod controller;
pub mod view;

pub use controller::{InputMode, TuiController, map_key};
