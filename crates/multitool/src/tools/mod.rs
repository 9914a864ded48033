//! Built-in tools
//!
//! Registered under stable ids that manifests refer to with `tool = "<id>"`.
//! Tools run with the terminal in normal line mode and talk to the operator
//! over plain stdin/stdout.

mod hello;
mod ping;

pub use hello::HelloTool;
pub use ping::PingTool;

use multitool_common::{Tool, ToolRegistry};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Registry holding every built-in tool
pub fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry
        .register("hello", |_options| Ok(Arc::new(HelloTool) as Arc<dyn Tool>))
        .register("ping", |options| {
            Ok(Arc::new(PingTool::from_options(options)?) as Arc<dyn Tool>)
        });
    registry
}

fn heading(title: &str) {
    println!("{}", format!("=== {} ===", title).bold().cyan());
    println!();
}

/// Print `label` and read one line, without the trailing newline
fn prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn wait_for_enter() -> io::Result<()> {
    prompt(&format!("\n{}", "Press Enter to return to the menu...".dimmed())).map(|_| ())
}
