use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::{
    cli::{
        errors::{CliError, CliResult},
        Command,
    },
    config::Config,
    search_query::{
        self, insert_filter_to_query_string, keys, parse_search_query,
        push_filter_key_to_query_string, try_construct_query_string, FilterDetail,
        FilterIdentity, ParsedSearchQuery,
    },
};

pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::configuration(format!("{e:#}")))
}

/// Runs a command and returns what should be printed.
pub fn execute(command: Command, config: &Config) -> CliResult<String> {
    tracing::debug!(?command, "executing");

    match command {
        #[cfg(feature = "markdown-docs")]
        Command::MarkdownDocs {} => Ok(clap_markdown::help_markdown::<crate::cli::Args>()),

        Command::Parse { query } => to_json(&parse_search_query(&query), config.pretty_json),

        Command::Construct { file } => {
            let input = read_input(file.as_deref())?;
            construct_from_json(&input)
        }

        Command::PushKey { key, query } => {
            let detail = FilterDetail::new(identity_for_key(&key)?);
            Ok(push_filter_key_to_query_string(&detail, &query)?)
        }

        Command::Insert { key, values, query } => {
            let values = values
                .into_iter()
                .map(|v| v.trim().to_string())
                .collect::<Vec<_>>();
            validate_values(&values)?;

            let detail = FilterDetail::with_filters(identity_for_key(&key)?, values);
            Ok(insert_filter_to_query_string(&detail, &query)?)
        }

        Command::Filters { query } => {
            let filters = search_query::search_filters(&query, &config.date_format);
            to_json(&filters, config.pretty_json)
        }

        Command::Keys {} => Ok(keys::all()
            .iter()
            .map(|mapping| format!("{}:\t{}", mapping.key, mapping.identity))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Builds query text from the JSON that `bq parse` prints.
pub fn construct_from_json(input: &str) -> CliResult<String> {
    let parsed: ParsedSearchQuery = serde_json::from_str(input)?;
    Ok(try_construct_query_string(&parsed)?)
}

/// Accepts a key with or without its trailing colon.
pub fn identity_for_key(key: &str) -> CliResult<FilterIdentity> {
    let bare = key.strip_suffix(':').unwrap_or(key);
    keys::lookup_by_key(bare)
        .map(|mapping| mapping.identity)
        .ok_or_else(|| CliError::unknown_key(key))
}

// commas and quotes would be read back as separators
fn validate_values(values: &[String]) -> CliResult<()> {
    for value in values {
        if value.is_empty() {
            return Err(CliError::invalid_input("filter values must not be empty"));
        }
        if value.contains(',') || value.contains('"') {
            return Err(CliError::invalid_input(format!(
                "filter value {value:?} must not contain commas or quotes"
            )));
        }
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> CliResult<String> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(input)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.map_err(|e| CliError::internal(e.to_string()))
}
