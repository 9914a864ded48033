//! Multitool library - exposes the launcher modules for testing

pub mod errors;
pub mod listing;
pub mod logging;
pub mod menu;
pub mod tools;
pub mod tui;
