use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use menutree::NodeId;

/// menutree - build and query menu and permission trees from flat JSON lists
#[derive(Parser, Debug)]
#[command(name = "menutree")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "INPUT is a JSON file, or '-' to read standard input.")]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./menutree.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input document shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON input file, or '-' for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree from a flat list of records
    Tree {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the records from a root down to the record with ID
    Path {
        #[command(flatten)]
        input: InputArgs,

        /// Id of the target record
        #[arg(long, value_parser = parse_id)]
        id: NodeId,
    },

    /// Enrich backend menus with routing data
    Menu {
        #[command(flatten)]
        input: InputArgs,

        /// Drop hidden menus
        #[arg(long)]
        visible: bool,

        /// Print the breadcrumb map (path -> ancestors) instead of the tree
        #[arg(long, conflicts_with = "current")]
        breadcrumbs: bool,

        /// Open the menu with this id and print the navigation state
        #[arg(long, value_parser = parse_id)]
        current: Option<NodeId>,
    },

    /// Flag rows of a tree table against a name filter
    Filter {
        #[command(flatten)]
        input: InputArgs,

        /// Substring to look for in record names
        #[arg(short, long)]
        query: Option<String>,

        /// Only match checked rows
        #[arg(long)]
        only_checked: bool,

        /// Checked row ids (comma-separated)
        #[arg(long, value_delimiter = ',', value_parser = parse_id)]
        checked: Vec<NodeId>,
    },

    /// Derive checked and indeterminate flags, optionally toggling a row
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Checked row ids (comma-separated)
        #[arg(long, value_delimiter = ',', value_parser = parse_id)]
        checked: Vec<NodeId>,

        /// Toggle the row with this id before deriving flags
        #[arg(long, value_parser = parse_id)]
        toggle: Option<NodeId>,

        /// Include indeterminate rows in the printed checked list
        #[arg(long)]
        half: bool,

        /// Do not cascade between parents and children
        #[arg(long)]
        strict: bool,
    },
}

fn parse_id(raw: &str) -> Result<NodeId, String> {
    if raw.trim().is_empty() {
        return Err("id must not be empty".to_string());
    }
    Ok(NodeId::parse_loose(raw))
}
