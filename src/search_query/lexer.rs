/// Scanner position relative to filter value lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Free text outside any filter.
    #[default]
    Free,
    /// After `key:`, reading comma-separated values.
    InFilterValues,
    /// Inside a double-quoted value; spaces do not end the list here.
    InQuotedValue,
    /// The previous char closed a quote. Only a comma keeps the list going.
    JustClosedQuote,
}

/// What the parser must do with the char it just fed to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Continue,
    /// The char is a colon in free text and may complete a filter key.
    CheckFilterKey,
    /// The value list ended before this char, which starts new free text.
    CloseFilter,
}

impl ScanState {
    pub fn next(self, c: char) -> (ScanState, Effect) {
        use Effect::*;
        use ScanState::*;

        match (self, c) {
            (Free, ':') => (Free, CheckFilterKey),
            (Free, _) => (Free, Continue),

            (InFilterValues, '"') => (InQuotedValue, Continue),
            (InFilterValues, ' ') => (Free, CloseFilter),
            (InFilterValues, _) => (InFilterValues, Continue),

            (InQuotedValue, '"') => (JustClosedQuote, Continue),
            // a comma also ends the quoted context
            (InQuotedValue, ',') => (InFilterValues, Continue),
            (InQuotedValue, _) => (InQuotedValue, Continue),

            (JustClosedQuote, ',') => (InFilterValues, Continue),
            (JustClosedQuote, _) => (Free, CloseFilter),
        }
    }

    pub fn is_in_filter(self) -> bool {
        !matches!(self, ScanState::Free)
    }
}
