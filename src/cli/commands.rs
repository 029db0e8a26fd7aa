//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through security platform entities one call at a time
#[derive(Parser, Debug)]
#[command(name = "entity-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Host configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Bearer token, overrides the one in the config file
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered entities
    Entities,

    /// Fetch a page of records
    Page {
        /// Entity id (see `entities`)
        #[arg(short, long)]
        entity: String,

        /// Records per page (defaults to the config value)
        #[arg(long)]
        page_size: Option<u32>,

        /// Upstream filter expression
        #[arg(long)]
        filter: Option<String>,

        /// Cursor returned by the previous page
        #[arg(long)]
        cursor: Option<String>,

        /// Unique id attribute (defaults to the entity's own)
        #[arg(long)]
        unique_id: Option<String>,

        /// Additional attribute to declare (repeatable)
        #[arg(short, long = "attribute")]
        attributes: Vec<String>,

        /// Keep fetching until the last page
        #[arg(long)]
        all: bool,

        /// Stop `--all` after this many pages
        #[arg(long, requires = "all")]
        max_pages: Option<usize>,
    },

    /// Inspect or build cursors
    Cursor {
        #[command(subcommand)]
        action: CursorAction,
    },
}

/// Cursor subcommands
#[derive(Subcommand, Debug)]
pub enum CursorAction {
    /// Decode an opaque cursor into JSON
    Decode {
        /// Opaque cursor
        cursor: String,
    },

    /// Encode cursor JSON into an opaque cursor
    Encode {
        /// Cursor JSON, e.g. '{"cursor":"c1"}'
        json: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
