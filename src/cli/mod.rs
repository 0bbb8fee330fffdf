use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod errors;

pub use commands::*;
pub use errors::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate api docs in markdown format
    #[cfg(feature = "markdown-docs")]
    #[clap(hide = true)]
    MarkdownDocs {},

    /// Split a query into free text and filter parts, printed as JSON
    Parse {
        #[clap(allow_hyphen_values = true)]
        query: String,
    },

    /// Build query text from the JSON printed by `parse`
    Construct {
        /// Read parts from a file instead of stdin
        #[clap(short, long)]
        file: Option<PathBuf>,
    },

    /// Append a filter key (e.g. `t`, `-d`, `from`) to a query
    PushKey {
        /// Filter key, with or without the colon
        #[clap(short, long, allow_hyphen_values = true)]
        key: String,

        #[clap(allow_hyphen_values = true, default_value = "")]
        query: String,
    },

    /// Add values to the first filter with the given key
    Insert {
        /// Filter key, with or without the colon
        #[clap(short, long, allow_hyphen_values = true)]
        key: String,

        /// Value to add. Repeat for several
        #[clap(short = 'v', long = "value", required = true)]
        values: Vec<String>,

        #[clap(allow_hyphen_values = true)]
        query: String,
    },

    /// Reduce a query to the search parameters it stands for, printed as JSON
    Filters {
        #[clap(allow_hyphen_values = true)]
        query: String,
    },

    /// List the filter keys
    Keys {},
}
