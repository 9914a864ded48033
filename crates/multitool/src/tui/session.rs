//! Session - the menu loop and the terminal handoff to tools
//!
//! One loop iteration renders the menu, blocks for one input event and applies
//! it. Activating a tool releases the terminal, runs the tool on this thread,
//! and reacquires the terminal whether the tool returned, failed or panicked.
//! Nothing that goes wrong inside the loop ends the session; only `q` does.

use super::layout::{alert_layout, compute_layout, MenuLayout, MenuView};
use super::render::draw_layout;
use super::screen::Screen;
use crate::menu::{Menu, MenuInput, Transition};
use crossterm::event::{Event, KeyEventKind};
use multitool_common::{BannerConfig, ConfigError, Tool, ToolDescriptor};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long a transient notice stays on screen
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

pub const NO_EXECUTABLE_TOOL: &str = "No executable tool found";
pub const NO_TOOL_SELECTED: &str = "No tool selected";
pub const RETURN_PROMPT: &str = "Press any key to return to the menu...";
pub const EXIT_PROMPT: &str = "Press any key to exit...";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    Terminal(#[from] io::Error),

    #[error("terminal is not under menu control")]
    NotAcquired,
}

enum Flow {
    Continue,
    Quit,
}

pub struct Session<S: Screen> {
    screen: S,
    menu: Menu,
    banner: BannerConfig,
}

impl<S: Screen> Session<S> {
    pub fn new(screen: S, menu: Menu, banner: BannerConfig) -> Self {
        Self {
            screen,
            menu,
            banner,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Run until the operator quits
    pub fn run(&mut self) {
        info!(categories = self.menu.categories().len(), "session started");

        if let Err(err) = self.menu.load_current() {
            let message = err.to_string();
            self.report(&message);
        }

        loop {
            match self.step() {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => self.recover(err),
            }
        }

        info!("session finished");
    }

    fn step(&mut self) -> Result<Flow, SessionError> {
        // Without the terminal the menu cannot be drawn, but keys are still
        // read so `q` keeps working
        if self.ensure_acquired() {
            self.draw_menu(None)?;
        }

        let key = match self.screen.next_event()? {
            Event::Key(key) => key,
            // Resizes and everything else just trigger the next render
            _ => return Ok(Flow::Continue),
        };
        let Some(input) = MenuInput::from_key(&key) else {
            return Ok(Flow::Continue);
        };

        match self.menu.apply(input) {
            Transition::Quit => return Ok(Flow::Quit),
            Transition::ScanFailed(message) => self.notify(&message)?,
            Transition::NoToolSelected => self.notify(NO_TOOL_SELECTED)?,
            Transition::Activate(tool) => self.activate(&tool)?,
            Transition::Moved | Transition::CategoryChanged | Transition::Unchanged => {}
        }

        Ok(Flow::Continue)
    }

    /// Loop-level failure: get the terminal back and tell the operator
    fn recover(&mut self, err: SessionError) {
        warn!(error = %err, "menu loop error");

        self.ensure_acquired();
        self.report(&format!("Error: {}", err));
    }

    /// Take the terminal back if a tool run left it released
    fn ensure_acquired(&mut self) -> bool {
        if self.screen.is_acquired() {
            return true;
        }

        match self.screen.reacquire() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to reacquire terminal");
                false
            }
        }
    }

    /// Show a notice, falling back to just waiting if even that fails
    fn report(&mut self, message: &str) {
        if let Err(e) = self.notify(message) {
            warn!(error = %e, message, "could not display notice");
            self.screen.pause(NOTICE_DURATION);
        }
    }

    /// Hand the terminal to a tool and take it back
    fn activate(&mut self, tool: &ToolDescriptor) -> Result<(), SessionError> {
        let Some(action) = tool.action().cloned() else {
            info!(tool = tool.name(), "selected tool has no action");
            return self.notify(NO_EXECUTABLE_TOOL);
        };

        self.screen.terminal().clear()?;
        self.screen.release()?;

        info!(tool = tool.name(), "terminal handed to tool");
        let outcome = run_tool(action.as_ref());
        match &outcome {
            Ok(()) => info!(tool = tool.name(), "tool finished"),
            Err(message) => warn!(tool = tool.name(), error = %message, "tool failed"),
        }

        self.screen.reacquire()?;

        if let Err(message) = outcome {
            show_alert(
                &mut self.screen,
                &format!("Error in tool: {}", message),
                RETURN_PROMPT,
            )?;
        }

        Ok(())
    }

    /// Draw the menu with a notice and hold it for `NOTICE_DURATION`
    fn notify(&mut self, message: &str) -> Result<(), SessionError> {
        debug!(message, "notice");
        self.draw_menu(Some(message))?;
        self.screen.pause(NOTICE_DURATION);
        Ok(())
    }

    fn draw_menu(&mut self, notice: Option<&str>) -> Result<(), SessionError> {
        if !self.screen.is_acquired() {
            return Err(SessionError::NotAcquired);
        }

        let view = MenuView {
            banner: &self.banner,
            categories: self.menu.categories(),
            nav: self.menu.nav(),
            tools: self.menu.tools(),
            notice,
        };

        self.screen.terminal().draw(|f| {
            let area = f.size();
            let layout = compute_layout(area.height, area.width, &view);
            draw_layout(f, &layout);
        })?;
        Ok(())
    }
}

/// Full-screen message that waits for one key press
pub fn show_alert<S: Screen>(
    screen: &mut S,
    headline: &str,
    prompt: &str,
) -> Result<(), SessionError> {
    if !screen.is_acquired() {
        return Err(SessionError::NotAcquired);
    }

    screen.terminal().draw(|f| {
        let area = f.size();
        let layout: MenuLayout = alert_layout(area.height, area.width, headline, prompt);
        draw_layout(f, &layout);
    })?;

    loop {
        if let Event::Key(key) = screen.next_event()? {
            if key.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}

/// Startup alert for a configuration the launcher cannot run with
pub fn show_config_error<S: Screen>(
    screen: &mut S,
    err: &ConfigError,
) -> Result<(), SessionError> {
    show_alert(screen, &format!("Configuration error: {}", err), EXIT_PROMPT)
}

/// Run a tool, turning both errors and panics into a message
fn run_tool(tool: &dyn Tool) -> Result<(), String> {
    match panic::catch_unwind(AssertUnwindSafe(|| tool.run())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(format!("{:#}", err)),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", text)
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("panicked: {}", text)
    } else {
        "panicked".to_string()
    }
}
