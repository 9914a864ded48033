//! External command tools declared with `command = [...]` in a manifest

use crate::descriptor::Tool;
use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use std::process::Command;

/// Runs a program with the launcher's stdin/stdout/stderr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTool {
    program: String,
    args: Vec<String>,
    pause: bool,
}

impl CommandTool {
    /// `argv` must hold at least the program name
    pub fn new(argv: &[String], pause: bool) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            pause,
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Tool for CommandTool {
    fn run(&self) -> Result<()> {
        tracing::info!(command = %self.command_line(), "spawning external tool");

        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .with_context(|| format!("failed to start `{}`", self.program))?;

        if self.pause {
            wait_for_enter()?;
        }

        if !status.success() {
            match status.code() {
                Some(code) => bail!("`{}` exited with status {}", self.command_line(), code),
                None => bail!("`{}` was terminated by a signal", self.command_line()),
            }
        }

        Ok(())
    }
}

fn wait_for_enter() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\nPress Enter to return to the menu...")?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
