use std::fmt;

use chrono::NaiveDate;
use hashbrown::HashSet;
use itertools::Itertools;
use nonempty::NonEmpty;
use strum::{Display, IntoEnumIterator};

use crate::models::{
    analysis::Analyzer,
    document::{Document, Field},
    error::{Result, SearchError},
};

/// How a term clause constrains the documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Occur {
    /// The term must be present
    #[strum(to_string = "in")]
    Must,
    /// The term must NOT be present
    #[strum(to_string = "not in")]
    MustNot,
}

/// Parses a `YYYY-MM-DD` date.
///
/// Example:
/// ```
/// use newsdex::prelude::*;
///
/// assert!(parse_date("2011-12-18").is_ok());
/// assert!(parse_date("18/12/2011").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|source| SearchError::InvalidDate {
        input: s.to_string(),
        source,
    })
}

///
/// A structured search request.
///
/// Term clauses are given per field, as terms that MUST
/// all be there and terms that MUST NOT be there. The date range
/// includes both of its ends. A missing part does not
/// constrain anything, so the default query matches all documents.
///
/// Build one with [`Query::builder`]:
/// ```
/// use newsdex::prelude::*;
///
/// let q = Query::builder()
///     .in_title(["kim", "korea"])
///     .start_date_str("2011-12-18")
///     .build()
///     .unwrap();
/// assert_eq!(q.to_string(), "Search (in title: [kim, korea]; startDate: 2011-12-18):");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    in_title: Option<NonEmpty<String>>,
    not_in_title: Option<NonEmpty<String>>,
    in_description: Option<NonEmpty<String>>,
    not_in_description: Option<NonEmpty<String>>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl Query {
    pub fn builder() -> QueryBuilder {
        QueryBuilder::default()
    }

    /// Alias for default. A query without constraints, matching everything.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// The terms of the given field and occurence, if any.
    pub fn terms(&self, field: Field, occur: Occur) -> Option<&NonEmpty<String>> {
        match (field, occur) {
            (Field::Title, Occur::Must) => self.in_title.as_ref(),
            (Field::Title, Occur::MustNot) => self.not_in_title.as_ref(),
            (Field::Description, Occur::Must) => self.in_description.as_ref(),
            (Field::Description, Occur::MustNot) => self.not_in_description.as_ref(),
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Is there any date constraint?
    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Does this constrain nothing at all?
    pub fn is_match_all(&self) -> bool {
        self == &Self::default()
    }

    /// Does this single document match, without any index?
    /// The document text goes through the given analyzer, like at indexing time.
    pub fn matches(&self, d: &Document, analyzer: &Analyzer) -> bool {
        let fields_ok = Field::iter().all(|field| {
            let terms: HashSet<String> = analyzer.tokenize(d.text(field)).collect();
            let has = |t: &String| terms.contains(&analyzer.normalize_term(t));
            self.terms(field, Occur::Must)
                .is_none_or(|ts| ts.iter().all(has))
                && self
                    .terms(field, Occur::MustNot)
                    .is_none_or(|ts| !ts.iter().any(has))
        });
        if !fields_ok {
            return false;
        }

        if !self.has_date_range() {
            return true;
        }
        d.pub_date().is_some_and(|date| {
            self.start_date.is_none_or(|s| s <= date) && self.end_date.is_none_or(|e| date <= e)
        })
    }

    /// Checks the date range makes sense.
    pub fn validate(&self) -> Result<()> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                Err(SearchError::InvalidRange { start, end })
            }
            _ => Ok(()),
        }
    }
}

// Lists show as [a, b], date bounds in camelCase.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = [
            ("in title", &self.in_title),
            ("not in title", &self.not_in_title),
            ("in description", &self.in_description),
            ("not in description", &self.not_in_description),
        ]
        .into_iter()
        .filter_map(|(name, ts)| {
            ts.as_ref()
                .map(|ts| format!("{}: [{}]", name, ts.iter().join(", ")))
        });
        let dates = [("startDate", self.start_date), ("endDate", self.end_date)]
            .into_iter()
            .filter_map(|(name, d)| d.map(|d| format!("{}: {}", name, d)));

        write!(f, "Search ({}):", terms.chain(dates).join("; "))
    }
}

/// Collects the parts of a [`Query`]. All checks happen
/// in [`QueryBuilder::build`].
#[derive(Debug, Default, Clone)]
pub struct QueryBuilder {
    in_title: Option<Vec<String>>,
    not_in_title: Option<Vec<String>>,
    in_description: Option<Vec<String>>,
    not_in_description: Option<Vec<String>>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    // Date parsing is deferred, so the error shows at build time.
    start_date_str: Option<String>,
    end_date_str: Option<String>,
}

fn collect_terms<I, T>(terms: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    Some(terms.into_iter().map(Into::into).collect())
}

fn non_empty_terms(
    terms: Option<Vec<String>>,
    field: Field,
    occur: Occur,
) -> Result<Option<NonEmpty<String>>> {
    terms
        .map(|ts| NonEmpty::from_vec(ts).ok_or(SearchError::EmptyTermSet { field, occur }))
        .transpose()
}

fn resolve_date(date: Option<NaiveDate>, date_str: Option<String>) -> Result<Option<NaiveDate>> {
    match date_str {
        Some(s) => parse_date(&s).map(Some),
        None => Ok(date),
    }
}

impl QueryBuilder {
    /// Terms that must all be in the title
    pub fn in_title<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.in_title = collect_terms(terms);
        self
    }

    /// Terms that must not be in the title. Any of them excludes a document.
    pub fn not_in_title<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.not_in_title = collect_terms(terms);
        self
    }

    /// Terms that must all be in the description
    pub fn in_description<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.in_description = collect_terms(terms);
        self
    }

    /// Terms that must not be in the description. Any of them excludes a document.
    pub fn not_in_description<I, T>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.not_in_description = collect_terms(terms);
        self
    }

    /// Earliest publication date, included.
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self.start_date_str = None;
        self
    }

    /// Latest publication date, included.
    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self.end_date_str = None;
        self
    }

    /// Earliest publication date as `YYYY-MM-DD`, included.
    pub fn start_date_str<S: Into<String>>(mut self, date: S) -> Self {
        self.start_date_str = Some(date.into());
        self
    }

    /// Latest publication date as `YYYY-MM-DD`, included.
    pub fn end_date_str<S: Into<String>>(mut self, date: S) -> Self {
        self.end_date_str = Some(date.into());
        self
    }

    /// The query. Fails when a term set is empty, when a date does not
    /// parse, or when the start date is after the end date.
    pub fn build(self) -> Result<Query> {
        let q = Query {
            in_title: non_empty_terms(self.in_title, Field::Title, Occur::Must)?,
            not_in_title: non_empty_terms(self.not_in_title, Field::Title, Occur::MustNot)?,
            in_description: non_empty_terms(self.in_description, Field::Description, Occur::Must)?,
            not_in_description: non_empty_terms(
                self.not_in_description,
                Field::Description,
                Occur::MustNot,
            )?,
            start_date: resolve_date(self.start_date, self.start_date_str)?,
            end_date: resolve_date(self.end_date, self.end_date_str)?,
        };
        q.validate()?;
        Ok(q)
    }
}
