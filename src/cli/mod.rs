//! CLI module
//!
//! Command-line host for fetching pages by hand.
//!
//! # Commands
//!
//! - `entities` - List registered entities
//! - `page` - Fetch one page (or all pages with `--all`)
//! - `cursor decode|encode` - Inspect or build opaque cursors

mod commands;
mod runner;

pub use commands::{Cli, Commands, CursorAction, OutputFormat};
pub use runner::{PageOptions, Runner};
