use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Tag,
    Domain,
    List,
    Date,
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterType::Tag => "tag",
            FilterType::Domain => "domain",
            FilterType::List => "list",
            FilterType::Date => "date",
        };
        f.write_str(name)
    }
}

/// Which end of a date range a `date` filter bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateVariant {
    From,
    To,
}

/// Semantic identity of a filter, independent of its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterIdentity {
    pub filter_type: FilterType,
    pub is_exclusion: bool,
    pub variant: Option<DateVariant>,
}

impl FilterIdentity {
    pub const fn new(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            is_exclusion: false,
            variant: None,
        }
    }

    pub const fn excluded(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            is_exclusion: true,
            variant: None,
        }
    }

    pub const fn date(variant: DateVariant) -> Self {
        Self {
            filter_type: FilterType::Date,
            is_exclusion: false,
            variant: Some(variant),
        }
    }
}

impl fmt::Display for FilterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exclusion {
            f.write_str("excluded ")?;
        }
        write!(f, "{}", self.filter_type)?;
        match self.variant {
            Some(DateVariant::From) => f.write_str(" (from)"),
            Some(DateVariant::To) => f.write_str(" (to)"),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterKeyMapping {
    pub key: &'static str,
    pub identity: FilterIdentity,
}

static FILTER_KEYS: [FilterKeyMapping; 8] = [
    FilterKeyMapping {
        key: "t",
        identity: FilterIdentity::new(FilterType::Tag),
    },
    FilterKeyMapping {
        key: "-t",
        identity: FilterIdentity::excluded(FilterType::Tag),
    },
    FilterKeyMapping {
        key: "d",
        identity: FilterIdentity::new(FilterType::Domain),
    },
    FilterKeyMapping {
        key: "-d",
        identity: FilterIdentity::excluded(FilterType::Domain),
    },
    FilterKeyMapping {
        key: "c",
        identity: FilterIdentity::new(FilterType::List),
    },
    FilterKeyMapping {
        key: "-c",
        identity: FilterIdentity::excluded(FilterType::List),
    },
    FilterKeyMapping {
        key: "from",
        identity: FilterIdentity::date(DateVariant::From),
    },
    FilterKeyMapping {
        key: "to",
        identity: FilterIdentity::date(DateVariant::To),
    },
];

static BY_KEY: Lazy<HashMap<&'static str, &'static FilterKeyMapping>> =
    Lazy::new(|| FILTER_KEYS.iter().map(|m| (m.key, m)).collect());

static BY_IDENTITY: Lazy<HashMap<FilterIdentity, &'static FilterKeyMapping>> =
    Lazy::new(|| FILTER_KEYS.iter().map(|m| (m.identity, m)).collect());

// A key directly before the trailing colon, at the start of the text or after whitespace.
static TRAILING_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(-?[tdc]|from|to):$").expect("trailing filter key pattern is valid")
});

/// Table entries in canonical order.
pub fn all() -> &'static [FilterKeyMapping] {
    &FILTER_KEYS
}

pub fn lookup_by_key(key: &str) -> Option<&'static FilterKeyMapping> {
    BY_KEY.get(key).copied()
}

/// Reverse lookup. A miss means the identity was built outside the table.
pub fn lookup_by_identity(identity: &FilterIdentity) -> Option<&'static FilterKeyMapping> {
    BY_IDENTITY.get(identity).copied()
}

/// Finds a filter key that `fragment` ends with, colon included.
///
/// Returns the byte offset where the key starts together with its mapping.
pub fn match_trailing_key(fragment: &str) -> Option<(usize, &'static FilterKeyMapping)> {
    let captures = TRAILING_KEY.captures(fragment)?;
    let key = captures.get(1)?;
    let mapping = lookup_by_key(key.as_str())?;
    Some((key.start(), mapping))
}
