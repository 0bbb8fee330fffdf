use once_cell::sync::Lazy;
use regex::Regex;

static QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\\?""#).expect("quote pattern is valid"));

/// Splits the raw text after a filter key into its values.
///
/// Quotes are dropped (including backslash-escaped ones) before splitting on
/// commas. Empty segments are kept; callers decide what a trailing one means.
pub fn split_filter_values(text: &str) -> Vec<String> {
    QUOTE
        .replace_all(text, "")
        .split(',')
        .map(str::to_string)
        .collect()
}

// Only a plain space ends a value list, so tabs and other whitespace stay bare.
fn needs_quotes(value: &str) -> bool {
    value.contains(' ')
}

/// Inverse of [`split_filter_values`] for committed values.
///
/// An empty value before another one is written as `""` so the slot survives
/// the next parse. A trailing empty value is the comma the user just typed and
/// stays bare.
pub fn join_filter_values(values: &[String]) -> String {
    let last = values.len().saturating_sub(1);
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            if needs_quotes(value) || (value.is_empty() && i < last) {
                format!("\"{value}\"")
            } else {
                value.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders a live query as it was typed: still open, so a quote is only opened.
pub fn format_live_query(query: &str, has_values: bool) -> String {
    let mut out = String::with_capacity(query.len() + 2);
    if has_values {
        out.push(',');
    }
    if needs_quotes(query) {
        out.push('"');
    }
    out.push_str(query);
    out
}
