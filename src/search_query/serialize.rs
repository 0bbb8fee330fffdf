use super::errors::QueryError;
use super::keys;
use super::parser::{FilterDetail, QueryPart};
use super::values;

/// Returned by [`construct_query_string`] when the parts cannot be rendered.
/// It is never a real query and must not be shown as one.
pub const CONSTRUCT_FAILURE: &str = "<query reconstruction failed>";

/// Renders one filter part: `key:`, committed values, then the live query.
pub(crate) fn render_filter(detail: &FilterDetail) -> Result<String, QueryError> {
    let identity = detail.identity();
    let mapping =
        keys::lookup_by_identity(&identity).ok_or(QueryError::UnknownFilterIdentity(identity))?;

    let mut out = format!("{}:", mapping.key);
    out.push_str(&values::join_filter_values(&detail.filters));
    if let Some(query) = &detail.query {
        out.push_str(&values::format_live_query(query, !detail.filters.is_empty()));
    }

    Ok(out)
}

/// Inverse of [`parse_search_query`](super::parse_search_query).
pub fn try_construct_query_string(parts: &[QueryPart]) -> Result<String, QueryError> {
    parts.iter().try_fold(String::new(), |mut out, part| {
        match part {
            QueryPart::SearchString { value, .. } => out.push_str(value),
            QueryPart::Filter { detail, .. } => out.push_str(&render_filter(detail)?),
        }
        Ok(out)
    })
}

/// Like [`try_construct_query_string`], but reports failure through
/// [`CONSTRUCT_FAILURE`] so hot UI paths never have to handle an error.
pub fn construct_query_string(parts: &[QueryPart]) -> String {
    match try_construct_query_string(parts) {
        Ok(query) => query,
        Err(err) => {
            log::error!("could not construct query string: {err}");
            CONSTRUCT_FAILURE.to_string()
        }
    }
}
