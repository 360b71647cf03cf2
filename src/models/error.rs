use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{document::Field, query::Occur};

/// Everything that can go wrong while indexing documents or
/// building and evaluating queries.
///
/// Vocabulary misses, empty indexes and queries without any
/// constraint are NOT errors. They give empty (or full) results.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A document cannot be encoded into the index.
    /// The whole build is abandoned.
    #[error("document #{position} cannot be indexed: {reason}")]
    InvalidDocument { position: usize, reason: String },

    /// Too many documents given to one build (more than u32::MAX)
    #[error("too many documents for one index (max {})", u32::MAX)]
    TooManyDocuments,

    /// The start date of a query is after its end date.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A term set was given, but it has no terms. Leave it out instead.
    #[error("empty term set for '{occur} {field}'")]
    EmptyTermSet { field: Field, occur: Occur },

    /// A date string that is not `YYYY-MM-DD`
    #[error("invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod test_error {
    use super::*;

    #[test]
    fn test_messages() {
        let e = SearchError::InvalidDocument {
            position: 3,
            reason: "missing publication date".into(),
        };
        assert_eq!(
            e.to_string(),
            "document #3 cannot be indexed: missing publication date"
        );

        let e = SearchError::EmptyTermSet {
            field: Field::Title,
            occur: Occur::MustNot,
        };
        assert_eq!(e.to_string(), "empty term set for 'not in title'");

        let e = SearchError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2011, 12, 19).unwrap(),
            end: NaiveDate::from_ymd_opt(2011, 12, 18).unwrap(),
        };
        assert_eq!(
            e.to_string(),
            "invalid date range: start 2011-12-19 is after end 2011-12-18"
        );
    }
}
