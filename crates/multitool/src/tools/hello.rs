use super::{heading, wait_for_enter};
use anyhow::Result;
use multitool_common::Tool;

/// Greets the operator; shows what a minimal tool looks like
#[derive(Debug, Clone, Copy, Default)]
pub struct HelloTool;

impl Tool for HelloTool {
    fn run(&self) -> Result<()> {
        heading("Example Tool");
        println!("Hello, World!");
        wait_for_enter()?;
        Ok(())
    }
}
