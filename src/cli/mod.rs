//! Command-line interface for navdeck.
//!
//! Every subcommand reads a permission tree in the server's JSON shape and
//! prints one derived view of it. Rendering lives in [`commands`]; the tab
//! operation grammar lives in [`tab_ops`].

pub mod commands;
pub mod tab_ops;

use crate::permission::PermissionTree;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use navdeck_config::{Config, LogLevel};
use std::path::PathBuf;
use tab_ops::TabOp;

/// navdeck - permission-driven routes, menus and tab sessions
#[derive(Parser)]
#[command(name = "navdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/navdeck/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => LogLevel::Off,
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the route tree built from a permission tree
    Routes {
        /// Permission tree JSON file
        file: PathBuf,
    },

    /// Print the pre-order flattened index
    Flatten {
        /// Permission tree JSON file
        file: PathBuf,
    },

    /// Print the breadcrumb chain for a path
    Chain {
        /// Permission tree JSON file
        file: PathBuf,
        /// Current route path
        path: String,
    },

    /// Print the navigation menu and the submenus open for a path
    Menu {
        /// Permission tree JSON file
        file: PathBuf,
        /// Current route path
        #[arg(long)]
        path: Option<String>,
        /// Include hidden entries
        #[arg(long)]
        all: bool,
        /// Print JSON instead of an indented tree
        #[arg(long)]
        json: bool,
    },

    /// Search visible menu labels, ignoring case
    Search {
        /// Permission tree JSON file
        file: PathBuf,
        /// Text to look for; empty lists every visible entry
        #[arg(default_value = "")]
        query: String,
    },

    /// Simulate a tab session and print the final tab strip
    Tabs {
        /// Permission tree JSON file
        file: PathBuf,
        /// Operations: visit:/p close:/p others:/p all activate:/p move:/p:idx
        #[arg(required = true)]
        ops: Vec<TabOp>,
    },
}

/// Load the config named on the command line, or the default one.
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Run a parsed command line and return its output.
pub fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_ref()).context("Failed to load configuration")?;
    crate::debug::apply_config_log_level(config.log_level);

    match cli.command {
        Commands::Routes { file } => Ok(commands::routes(&PermissionTree::load(&file)?)),
        Commands::Flatten { file } => Ok(commands::flatten(&PermissionTree::load(&file)?)),
        Commands::Chain { file, path } => Ok(commands::chain(
            &PermissionTree::load(&file)?,
            &config,
            &path,
        )),
        Commands::Menu {
            file,
            path,
            all,
            json,
        } => commands::menu(&PermissionTree::load(&file)?, path.as_deref(), all, json),
        Commands::Search { file, query } => {
            Ok(commands::search(&PermissionTree::load(&file)?, &query))
        }
        Commands::Tabs { file, ops } => {
            commands::tabs(PermissionTree::load(&file)?, config, &ops)
        }
    }
}

/// Process CLI arguments, run the subcommand and return the exit code.
pub fn process_cli() -> i32 {
    let cli = Cli::parse();

    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config.
    crate::debug::init_log_bridge(cli.log_level.map(Into::into));
    log::info!("Starting navdeck {}", crate::VERSION);

    match run(cli) {
        Ok(output) => {
            print!("{output}");
            0
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("navdeck: error: {e:#}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_defaults_to_empty() {
        let cli = Cli::try_parse_from(["navdeck", "search", "tree.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { ref query, .. } if query.is_empty()));
        let cli = Cli::try_parse_from(["navdeck", "search", "tree.json", "user"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { ref query, .. } if query == "user"));
    }
}
