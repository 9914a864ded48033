use super::{heading, prompt, wait_for_enter};
use anyhow::{bail, Context, Result};
use multitool_common::Tool;
use owo_colors::OwoColorize;
use std::process::Command;

const DEFAULT_COUNT: u32 = 4;
const MAX_COUNT: u32 = 100;

/// Pings a host with the system `ping` and shows its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingTool {
    count: u32,
}

impl Default for PingTool {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
        }
    }
}

impl PingTool {
    /// Options: `count` (1..=100, default 4)
    pub fn from_options(options: &toml::Table) -> Result<Self> {
        let mut tool = Self::default();

        for (key, value) in options {
            match key.as_str() {
                "count" => {
                    let count = value
                        .as_integer()
                        .context("`count` must be an integer")?;
                    if !(1..=MAX_COUNT as i64).contains(&count) {
                        bail!("`count` must be between 1 and {}", MAX_COUNT);
                    }
                    tool.count = count as u32;
                }
                other => bail!("unknown option `{}`", other),
            }
        }

        Ok(tool)
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    fn args(&self, host: &str) -> Vec<String> {
        let count_flag = if cfg!(windows) { "-n" } else { "-c" };
        vec![count_flag.to_string(), self.count.to_string(), host.to_string()]
    }
}

/// Reject input `ping` would read as something other than a host
fn validate_host(host: &str) -> Result<&str> {
    let host = host.trim();
    if host.is_empty() {
        bail!("no host given");
    }
    if host.starts_with('-') || host.chars().any(char::is_whitespace) {
        bail!("'{}' is not a host name or address", host);
    }
    Ok(host)
}

impl Tool for PingTool {
    fn run(&self) -> Result<()> {
        heading("Ping Tool");

        let input = prompt("Enter host to ping: ")?;
        let host = validate_host(&input)?;

        println!("Pinging {}...\n", host.bold());
        let status = Command::new("ping")
            .args(self.args(host))
            .status()
            .context("failed to start `ping`")?;

        println!();
        if status.success() {
            println!("{}", format!("{} is reachable", host).green());
        } else {
            println!("{}", format!("{} did not answer every probe", host).yellow());
        }

        wait_for_enter()?;
        Ok(())
    }
}
