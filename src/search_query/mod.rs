//! Search box query grammar.
//!
//! A query is free text mixed with filters such as `t:work,"side project"`,
//! `-d:example.com` or `from:2020-01-01`. [`parse_search_query`] splits it
//! into ordered parts and [`construct_query_string`] turns the parts back into
//! the exact text, so pickers can rewrite one filter without disturbing the
//! rest of what the user typed.
//!
//! Filter keys: `t`/`-t` (tags), `d`/`-d` (domains), `c`/`-c` (lists),
//! `from`/`to` (dates). A leading `-` excludes. Unknown keys stay free text.

mod editors;
mod errors;
mod filters;
pub mod keys;
mod lexer;
mod parser;
mod serialize;
mod values;

pub use editors::{insert_filter_to_query_string, push_filter_key_to_query_string};
pub use errors::QueryError;
pub use filters::{SearchFilters, DEFAULT_DATE_FORMAT};
pub use keys::{DateVariant, FilterIdentity, FilterKeyMapping, FilterType};
pub use parser::{parse_search_query, FilterDetail, ParsedSearchQuery, QueryPart};
pub use serialize::{construct_query_string, try_construct_query_string, CONSTRUCT_FAILURE};
pub use values::split_filter_values;

/// Convenience: parse + project in one call.
pub fn search_filters(query: &str, date_format: &str) -> SearchFilters {
    let parsed = parse_search_query(query);
    SearchFilters::from_parts(&parsed, date_format)
}
