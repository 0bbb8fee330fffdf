use super::errors::QueryError;
use super::keys;
use super::parser::{parse_search_query, FilterDetail};
use super::serialize;

/// Appends the key for `detail`'s filter to `query`, space separated.
///
/// The text is not reparsed; values in `detail` are ignored.
pub fn push_filter_key_to_query_string(
    detail: &FilterDetail,
    query: &str,
) -> Result<String, QueryError> {
    let identity = detail.identity();
    let mapping =
        keys::lookup_by_identity(&identity).ok_or(QueryError::UnknownFilterIdentity(identity))?;

    let mut out = String::with_capacity(query.len() + mapping.key.len() + 2);
    out.push_str(query);
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
    out.push_str(mapping.key);
    out.push(':');

    Ok(out)
}

/// Appends `detail.filters` to the first filter in `query` with the same
/// identity and renders the whole query again.
///
/// The filter key must already be present, see
/// [`push_filter_key_to_query_string`]. No filter part is ever created here.
/// Empty trailing slots left by a just-typed comma are filled, not kept.
pub fn insert_filter_to_query_string(
    detail: &FilterDetail,
    query: &str,
) -> Result<String, QueryError> {
    let identity = detail.identity();
    let mut parsed = parse_search_query(query);

    let target = parsed
        .find_filter_mut(&identity)
        .ok_or(QueryError::NoMatchingFilter(identity))?;
    while target.filters.last().is_some_and(String::is_empty) {
        target.filters.pop();
    }
    if target.query.as_deref() == Some("") {
        target.query = None;
    }
    target.filters.extend(detail.filters.iter().cloned());
    target.raw_content = serialize::render_filter(target)?;

    log::debug!("inserted {} value(s) into {identity} filter", detail.filters.len());

    serialize::try_construct_query_string(&parsed)
}
