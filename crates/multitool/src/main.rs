//! Multitool - terminal launcher for a configurable set of tools
//!
//! Loads the launcher config, then either prints the catalog (`--list`) or
//! hands the terminal to the interactive menu until the operator quits.

use anyhow::Context;
use clap::Parser;
use multitool::errors::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_TERMINAL_ERROR};
use multitool::menu::Menu;
use multitool::tui::{show_config_error, Session, TerminalHandle};
use multitool::{listing, logging, tools};
use multitool_common::{Catalog, ConfigError, LauncherConfig};
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{error, info, warn};

// Version is embedded at build time
const VERSION: &str = env!("MULTITOOL_VERSION");

#[derive(Parser)]
#[command(name = "multitool")]
#[command(about = "Menu-driven launcher for terminal tools", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Launcher config file (default: $MULTITOOL_CONFIG, ./config.toml, then the user config dir)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the modules directory named in the config
    #[arg(long)]
    modules_dir: Option<PathBuf>,

    /// Print every category and tool, then exit
    #[arg(long)]
    list: bool,
}

fn main() {
    let cli = Cli::parse();
    let code = run(cli);
    // Destructors above have restored the terminal by now
    std::process::exit(code);
}

fn run(cli: Cli) -> i32 {
    let log_file = logging::init();
    info!(version = VERSION, log_file = ?log_file, "multitool starting");

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration error");
            report_config_error(&err, cli.list);
            return EXIT_CONFIG_ERROR;
        }
    };

    let catalog = Catalog::new(config.modules_dir.clone(), tools::builtin_registry());

    if cli.list {
        return list(&config, catalog);
    }

    match interactive(config, catalog) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            let message = format!("{:#}", err);
            error!(error = %message, "terminal error");
            eprintln!("{} {}", "error:".red().bold(), message);
            EXIT_TERMINAL_ERROR
        }
    }
}

fn load_config(cli: &Cli) -> Result<LauncherConfig, ConfigError> {
    let path = LauncherConfig::locate(cli.config.as_deref())?;
    let mut config = LauncherConfig::load(&path)?;

    if let Some(dir) = &cli.modules_dir {
        config.modules_dir = dir.clone();
    }

    info!(
        config = %path.display(),
        modules_dir = %config.modules_dir.display(),
        categories = config.categories.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// Show the error as a full-screen alert when a terminal is available
fn report_config_error(err: &ConfigError, list_only: bool) {
    if !list_only && io::stdout().is_terminal() {
        if let Ok(mut screen) = TerminalHandle::acquire() {
            if show_config_error(&mut screen, err).is_ok() {
                return;
            }
        }
    }

    eprintln!("{} Configuration error: {}", "error:".red().bold(), err);
}

fn list(config: &LauncherConfig, mut catalog: Catalog) -> i32 {
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();

    // A closed pipe is not worth a failure exit
    if let Err(err) = listing::write_catalog(&mut out, &config.categories, &mut catalog, color) {
        warn!(error = %err, "listing interrupted");
    }
    EXIT_SUCCESS
}

fn interactive(config: LauncherConfig, catalog: Catalog) -> anyhow::Result<()> {
    let screen = TerminalHandle::acquire().context("failed to take control of the terminal")?;

    let menu = Menu::new(config.categories, catalog);
    let mut session = Session::new(screen, menu, config.banner);
    session.run();

    Ok(())
}
