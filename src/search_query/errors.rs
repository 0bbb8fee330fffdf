use super::keys::FilterIdentity;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("no filter key maps to {0}")]
    UnknownFilterIdentity(FilterIdentity),

    #[error("query has no {0} filter to insert into")]
    NoMatchingFilter(FilterIdentity),
}
