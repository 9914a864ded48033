//! TUI Module - the interactive menu
//!
//! - layout: pure screen layout computation
//! - render: draws a computed layout into a ratatui frame
//! - screen: terminal ownership (raw mode, alternate screen)
//! - session: the menu loop and the handoff to tools
//! - utils: text wrapping helpers

pub mod layout;
pub mod render;
pub mod screen;
pub mod session;
pub mod utils;

pub use screen::{Screen, TerminalHandle};
pub use session::{show_alert, show_config_error, Session, SessionError};
