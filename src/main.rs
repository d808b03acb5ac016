//! menutree CLI - menu and permission tree engine
//!
//! Usage: menutree [-v] [--config FILE] <COMMAND> [INPUT]
//!
//! Commands:
//!   tree    Build a tree from a flat list
//!   path    Records from a root down to one id
//!   menu    Enrich backend menus
//!   filter  Flag tree-table rows against a filter
//!   check   Derive checked/indeterminate flags

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use menutree::Config;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)?;
            for warning in &warnings {
                warn!("{}", warning);
            }
            Ok(config.with_env_overrides())
        }
        None => {
            let cwd = std::env::current_dir()?;
            Ok(Config::load_or_default(Some(&cwd)))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Tree { input } => commands::tree::cmd_tree(&config, &input.input),
        Commands::Path { input, id } => commands::tree::cmd_path(&config, &input.input, &id),
        Commands::Menu {
            input,
            visible,
            breadcrumbs,
            current,
        } => commands::menu::cmd_menu(
            &config,
            &input.input,
            visible,
            breadcrumbs,
            current.as_ref(),
        ),
        Commands::Filter {
            input,
            query,
            only_checked,
            checked,
        } => commands::table::cmd_filter(
            &config,
            &input.input,
            query.as_deref(),
            only_checked,
            checked,
        ),
        Commands::Check {
            input,
            checked,
            toggle,
            half,
            strict,
        } => commands::table::cmd_check(
            &config,
            &input.input,
            checked,
            toggle.as_ref(),
            half,
            strict,
        ),
    }
}
