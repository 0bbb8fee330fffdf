use chrono::NaiveDate;
use serde::Serialize;

use super::keys::{DateVariant, FilterType};
use super::parser::{FilterDetail, QueryPart};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Flat search parameters a query boils down to.
///
/// Only committed filter values count; a live query is still being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchFilters {
    pub query: String,
    pub tags_included: Vec<String>,
    pub tags_excluded: Vec<String>,
    pub domains_included: Vec<String>,
    pub domains_excluded: Vec<String>,
    pub lists_included: Vec<String>,
    pub lists_excluded: Vec<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl SearchFilters {
    pub fn from_parts(parts: &[QueryPart], date_format: &str) -> Self {
        let mut filters = Self::default();
        let mut text = String::new();

        for part in parts {
            match part {
                QueryPart::SearchString { value, .. } => {
                    text.push_str(value);
                    text.push(' ');
                }
                QueryPart::Filter { detail, .. } => filters.apply(detail, date_format),
            }
        }

        filters.query = text.split_whitespace().collect::<Vec<_>>().join(" ");
        filters
    }

    fn apply(&mut self, detail: &FilterDetail, date_format: &str) {
        let target = match (detail.filter_type, detail.is_exclusion) {
            (FilterType::Tag, false) => &mut self.tags_included,
            (FilterType::Tag, true) => &mut self.tags_excluded,
            (FilterType::Domain, false) => &mut self.domains_included,
            (FilterType::Domain, true) => &mut self.domains_excluded,
            (FilterType::List, false) => &mut self.lists_included,
            (FilterType::List, true) => &mut self.lists_excluded,
            (FilterType::Date, _) => {
                self.apply_date(detail, date_format);
                return;
            }
        };

        for value in detail.filters.iter().filter(|v| !v.is_empty()) {
            if !target.contains(value) {
                target.push(value.clone());
            }
        }
    }

    fn apply_date(&mut self, detail: &FilterDetail, date_format: &str) {
        let Some(value) = detail.filters.iter().rev().find(|v| !v.is_empty()) else {
            return;
        };

        let date = match NaiveDate::parse_from_str(value, date_format) {
            Ok(date) => date,
            Err(err) => {
                log::debug!("ignoring date filter value {value:?}: {err}");
                return;
            }
        };

        match detail.variant {
            Some(DateVariant::From) => self.date_from = Some(date),
            Some(DateVariant::To) => self.date_to = Some(date),
            None => log::debug!("date filter without a variant, ignoring {value:?}"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.tags_included.is_empty()
            && self.tags_excluded.is_empty()
            && self.domains_included.is_empty()
            && self.domains_excluded.is_empty()
            && self.lists_included.is_empty()
            && self.lists_excluded.is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_query::parse_search_query;

    fn filters(query: &str) -> SearchFilters {
        SearchFilters::from_parts(&parse_search_query(query), DEFAULT_DATE_FORMAT)
    }

    #[test]
    fn test_empty_query() {
        assert!(filters("").is_empty());
        assert!(filters("   ").is_empty());
    }

    #[test]
    fn test_free_text_is_collapsed() {
        let f = filters("rust  t:dev   guide ");
        assert_eq!(f.query, "rust guide");
        assert_eq!(f.tags_included, vec!["dev"]);
    }

    #[test]
    fn test_includes_and_excludes() {
        let f = filters("t:a,b -t:c d:example.com -d:spam.com c:reading -c:done ");
        assert_eq!(f.tags_included, vec!["a", "b"]);
        assert_eq!(f.tags_excluded, vec!["c"]);
        assert_eq!(f.domains_included, vec!["example.com"]);
        assert_eq!(f.domains_excluded, vec!["spam.com"]);
        assert_eq!(f.lists_included, vec!["reading"]);
        assert_eq!(f.lists_excluded, vec!["done"]);
        assert!(f.query.is_empty());
    }

    #[test]
    fn test_repeated_filters_are_merged_without_duplicates() {
        let f = filters("t:a,b hello t:b,c ");
        assert_eq!(f.tags_included, vec!["a", "b", "c"]);
        assert_eq!(f.query, "hello");
    }

    #[test]
    fn test_live_query_is_not_committed() {
        let f = filters("t:work,fu");
        assert_eq!(f.tags_included, vec!["work"]);
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let f = filters("t:a,,b ");
        assert_eq!(f.tags_included, vec!["a", "b"]);
    }

    #[test]
    fn test_dates() {
        let f = filters("from:2020-01-01 to:2020-12-31");
        assert_eq!(f.date_from, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(f.date_to, NaiveDate::from_ymd_opt(2020, 12, 31));
    }

    #[test]
    fn test_invalid_date_is_ignored() {
        let f = filters("from:yesterday");
        assert!(f.date_from.is_none());
        assert!(f.is_empty());
    }

    #[test]
    fn test_custom_date_format() {
        let parts = parse_search_query("to:31/12/2020");
        let f = SearchFilters::from_parts(&parts, "%d/%m/%Y");
        assert_eq!(f.date_to, NaiveDate::from_ymd_opt(2020, 12, 31));
    }
}
