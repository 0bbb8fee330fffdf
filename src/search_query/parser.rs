use std::ops::{Deref, DerefMut, RangeInclusive};

use serde::{Deserialize, Serialize};

use super::keys::{self, DateVariant, FilterIdentity, FilterKeyMapping, FilterType};
use super::lexer::{Effect, ScanState};
use super::values;

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDetail {
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_exclusion: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<DateVariant>,
    /// Committed values, in source order.
    #[serde(default)]
    pub filters: Vec<String>,
    /// `key:` followed by the raw text of the value list.
    #[serde(default)]
    pub raw_content: String,
    /// Trailing value still being typed. Never set on date filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl FilterDetail {
    /// An empty filter for `identity`.
    ///
    /// `raw_content` is `key:` for identities in the key table and empty for
    /// any other; rendering such a detail fails with
    /// [`QueryError::UnknownFilterIdentity`](super::QueryError::UnknownFilterIdentity).
    pub fn new(identity: FilterIdentity) -> Self {
        let raw_content = keys::lookup_by_identity(&identity)
            .map(|mapping| format!("{}:", mapping.key))
            .unwrap_or_default();

        Self {
            filter_type: identity.filter_type,
            is_exclusion: identity.is_exclusion,
            variant: identity.variant,
            filters: Vec::new(),
            raw_content,
            query: None,
        }
    }

    pub fn with_filters<I, S>(identity: FilterIdentity, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut detail = Self::new(identity);
        detail.filters = filters.into_iter().map(Into::into).collect();
        detail
    }

    fn opened(mapping: &FilterKeyMapping) -> Self {
        Self::new(mapping.identity)
    }

    pub fn identity(&self) -> FilterIdentity {
        FilterIdentity {
            filter_type: self.filter_type,
            is_exclusion: self.is_exclusion,
            variant: self.variant,
        }
    }

    /// Committed values followed by the live query, if any.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .map(String::as_str)
            .chain(self.query.as_deref())
    }
}

/// One segment of a search box query.
///
/// Indices are inclusive char offsets into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QueryPart {
    #[serde(rename_all = "camelCase")]
    SearchString {
        start_index: usize,
        end_index: usize,
        value: String,
    },
    #[serde(rename_all = "camelCase")]
    Filter {
        start_index: usize,
        end_index: usize,
        detail: FilterDetail,
    },
}

impl QueryPart {
    pub fn start_index(&self) -> usize {
        match self {
            QueryPart::SearchString { start_index, .. } | QueryPart::Filter { start_index, .. } => {
                *start_index
            }
        }
    }

    pub fn end_index(&self) -> usize {
        match self {
            QueryPart::SearchString { end_index, .. } | QueryPart::Filter { end_index, .. } => {
                *end_index
            }
        }
    }

    pub fn span(&self) -> RangeInclusive<usize> {
        self.start_index()..=self.end_index()
    }

    pub fn as_filter(&self) -> Option<&FilterDetail> {
        match self {
            QueryPart::Filter { detail, .. } => Some(detail),
            QueryPart::SearchString { .. } => None,
        }
    }

    pub fn as_search_string(&self) -> Option<&str> {
        match self {
            QueryPart::SearchString { value, .. } => Some(value),
            QueryPart::Filter { .. } => None,
        }
    }
}

/// Parts of a query in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedSearchQuery(Vec<QueryPart>);

impl ParsedSearchQuery {
    pub fn parts(&self) -> &[QueryPart] {
        &self.0
    }

    pub fn into_parts(self) -> Vec<QueryPart> {
        self.0
    }

    /// The part whose span covers the char at `index`.
    pub fn part_at(&self, index: usize) -> Option<&QueryPart> {
        self.0.iter().find(|part| part.span().contains(&index))
    }

    /// The filter a caret at `cursor` is editing.
    ///
    /// The caret sits between chars, so a filter owns the positions after its
    /// first char up to and including the one right after its last char.
    pub fn filter_at(&self, cursor: usize) -> Option<&FilterDetail> {
        self.0.iter().find_map(|part| match part {
            QueryPart::Filter {
                start_index,
                end_index,
                detail,
            } if *start_index < cursor && cursor <= end_index + 1 => Some(detail),
            _ => None,
        })
    }

    pub fn filters_of(&self, identity: FilterIdentity) -> impl Iterator<Item = &FilterDetail> {
        self.0
            .iter()
            .filter_map(QueryPart::as_filter)
            .filter(move |detail| detail.identity() == identity)
    }

    pub(crate) fn find_filter_mut(&mut self, identity: &FilterIdentity) -> Option<&mut FilterDetail> {
        self.0.iter_mut().find_map(|part| match part {
            QueryPart::Filter { detail, .. } if detail.identity() == *identity => Some(detail),
            _ => None,
        })
    }
}

impl Deref for ParsedSearchQuery {
    type Target = [QueryPart];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ParsedSearchQuery {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<QueryPart>> for ParsedSearchQuery {
    fn from(parts: Vec<QueryPart>) -> Self {
        Self(parts)
    }
}

impl IntoIterator for ParsedSearchQuery {
    type Item = QueryPart;
    type IntoIter = std::vec::IntoIter<QueryPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParsedSearchQuery {
    type Item = &'a QueryPart;
    type IntoIter = std::slice::Iter<'a, QueryPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Default)]
struct Parser {
    parts: Vec<QueryPart>,
    state: ScanState,
    /// Text not yet assigned to a part.
    fragment: String,
    fragment_start: usize,
}

impl Parser {
    fn feed(&mut self, i: usize, c: char) {
        self.fragment.push(c);

        let (next, effect) = self.state.next(c);
        self.state = next;

        match effect {
            Effect::Continue => {}
            Effect::CheckFilterKey => self.open_filter(i),
            Effect::CloseFilter => {
                let mut committed = std::mem::take(&mut self.fragment);
                committed.pop();
                // a filter key occupies at least two chars, so i >= 2 here
                self.flush_filter(&committed, i - 1, false);

                self.fragment.push(c);
                self.fragment_start = i;
            }
        }
    }

    fn open_filter(&mut self, colon: usize) {
        let Some((key_start, mapping)) = keys::match_trailing_key(&self.fragment) else {
            return;
        };

        let preceding = self.fragment[..key_start].to_string();
        if !preceding.is_empty() {
            let end = self.fragment_start + preceding.chars().count() - 1;
            push_search_string(&mut self.parts, &preceding, self.fragment_start, end);
        }

        log::debug!("filter key {:?} at {colon}", mapping.key);

        let key_len = mapping.key.chars().count() + 1;
        self.parts.push(QueryPart::Filter {
            start_index: colon + 1 - key_len,
            end_index: colon,
            detail: FilterDetail::opened(mapping),
        });

        self.fragment.clear();
        self.fragment_start = colon + 1;
        self.state = ScanState::InFilterValues;
    }

    fn flush_filter(&mut self, text: &str, end: usize, live: bool) {
        let Some(QueryPart::Filter {
            end_index, detail, ..
        }) = self.parts.last_mut()
        else {
            // the scanner only leaves Free after pushing a filter part
            return;
        };

        *end_index = end;
        detail.raw_content.push_str(text);

        if text.is_empty() {
            return;
        }

        detail.filters.extend(values::split_filter_values(text));
        if live && detail.filter_type != FilterType::Date {
            detail.query = detail.filters.pop();
        }
    }

    fn finish(mut self, len: usize) -> ParsedSearchQuery {
        if !self.fragment.is_empty() {
            let fragment = std::mem::take(&mut self.fragment);
            if self.state.is_in_filter() {
                // a value closed by a quote is complete, anything else is still being typed
                let live = self.state != ScanState::JustClosedQuote;
                self.flush_filter(&fragment, len - 1, live);
            } else {
                push_search_string(&mut self.parts, &fragment, self.fragment_start, len - 1);
            }
        }

        ParsedSearchQuery(self.parts)
    }
}

fn push_search_string(parts: &mut Vec<QueryPart>, text: &str, start: usize, end: usize) {
    if let Some(QueryPart::SearchString {
        end_index, value, ..
    }) = parts.last_mut()
    {
        value.push_str(text);
        *end_index = end;
        return;
    }

    parts.push(QueryPart::SearchString {
        start_index: start,
        end_index: end,
        value: text.to_string(),
    });
}

/// Splits a search box query into free text and filter parts.
///
/// Never fails: anything that is not a recognised `key:` stays free text.
pub fn parse_search_query(raw: &str) -> ParsedSearchQuery {
    let mut parser = Parser::default();
    let mut len = 0;

    for (i, c) in raw.chars().enumerate() {
        parser.feed(i, c);
        len = i + 1;
    }

    parser.finish(len)
}
