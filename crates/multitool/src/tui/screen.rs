//! Screen - ownership of the terminal
//!
//! `TerminalHandle` is the only place raw mode and the alternate screen are
//! switched. It is acquired once when the session starts, released and
//! reacquired around each tool run, and restored on drop whatever path leaves
//! the session.

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, warn};

/// What the session needs from a terminal
pub trait Screen {
    type Backend: Backend;

    fn terminal(&mut self) -> &mut Terminal<Self::Backend>;

    /// Block until the next input event
    fn next_event(&mut self) -> io::Result<Event>;

    /// Give the terminal back to line-oriented mode for a tool
    fn release(&mut self) -> io::Result<()>;

    /// Take exclusive control again after a tool returned
    fn reacquire(&mut self) -> io::Result<()>;

    fn is_acquired(&self) -> bool;

    /// Keep the current frame up for `duration`
    fn pause(&mut self, duration: Duration);
}

pub struct TerminalHandle {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    acquired: bool,
}

impl TerminalHandle {
    /// Enter raw mode and the alternate screen
    pub fn acquire() -> io::Result<Self> {
        enter_raw_then(
            enable_raw_mode,
            || execute!(io::stdout(), EnterAlternateScreen, Hide),
            leave_raw_mode,
        )?;

        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = leave_raw_mode();
                return Err(e);
            }
        };

        debug!("terminal acquired");
        Ok(Self {
            terminal,
            acquired: true,
        })
    }
}

impl Screen for TerminalHandle {
    type Backend = CrosstermBackend<Stdout>;

    fn terminal(&mut self) -> &mut Terminal<Self::Backend> {
        &mut self.terminal
    }

    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }

    fn release(&mut self) -> io::Result<()> {
        if !self.acquired {
            return Ok(());
        }

        // Every step is attempted; the first failure is reported
        let shown = self.terminal.show_cursor();
        let left = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let cooked = disable_raw_mode();
        self.acquired = false;

        debug!("terminal released");
        shown.and(left).and(cooked)
    }

    fn reacquire(&mut self) -> io::Result<()> {
        if self.acquired {
            return Ok(());
        }

        let terminal = &mut self.terminal;
        enter_raw_then(
            enable_raw_mode,
            || {
                execute!(terminal.backend_mut(), EnterAlternateScreen)?;
                terminal.hide_cursor()?;
                // Forget the previous frame so the next draw repaints everything
                terminal.clear()
            },
            leave_raw_mode,
        )?;
        self.acquired = true;

        debug!("terminal reacquired");
        Ok(())
    }

    fn is_acquired(&self) -> bool {
        self.acquired
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Run `raw`, then `screen`. If `screen` fails, `undo` runs before the error is
/// returned, so a half-acquired terminal is never left behind for `Drop` to miss.
fn enter_raw_then(
    raw: impl FnOnce() -> io::Result<()>,
    screen: impl FnOnce() -> io::Result<()>,
    undo: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    raw()?;

    if let Err(e) = screen() {
        if let Err(undo_err) = undo() {
            warn!(error = %undo_err, "failed to roll back raw mode");
        }
        return Err(e);
    }
    Ok(())
}

fn leave_raw_mode() -> io::Result<()> {
    let left = execute!(io::stdout(), LeaveAlternateScreen, Show);
    let cooked = disable_raw_mode();
    left.and(cooked)
}

impl Drop for TerminalHandle {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn failing(message: &'static str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, message))
    }

    #[test]
    fn test_screen_failure_rolls_back_raw_mode() {
        let steps = RefCell::new(Vec::new());

        let result = enter_raw_then(
            || {
                steps.borrow_mut().push("raw");
                Ok(())
            },
            || {
                steps.borrow_mut().push("screen");
                failing("alternate screen refused")
            },
            || {
                steps.borrow_mut().push("undo");
                Ok(())
            },
        );

        assert_eq!(result.unwrap_err().to_string(), "alternate screen refused");
        assert_eq!(*steps.borrow(), vec!["raw", "screen", "undo"]);
    }

    #[test]
    fn test_raw_failure_touches_nothing_else() {
        let steps = RefCell::new(Vec::new());

        let result = enter_raw_then(
            || failing("not a tty"),
            || {
                steps.borrow_mut().push("screen");
                Ok(())
            },
            || {
                steps.borrow_mut().push("undo");
                Ok(())
            },
        );

        assert!(result.is_err());
        assert!(steps.borrow().is_empty());
    }

    #[test]
    fn test_success_keeps_raw_mode() {
        let steps = RefCell::new(Vec::new());

        enter_raw_then(
            || Ok(()),
            || Ok(()),
            || {
                steps.borrow_mut().push("undo");
                Ok(())
            },
        )
        .unwrap();

        assert!(steps.borrow().is_empty());
    }
}
