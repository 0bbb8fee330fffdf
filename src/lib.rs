//! Parser and serializer for search box queries that mix free text with
//! tag, domain, list and date filters.

pub mod cli;
pub mod config;
pub mod search_query;

pub use search_query::{
    construct_query_string, insert_filter_to_query_string, parse_search_query,
    push_filter_key_to_query_string,
};
