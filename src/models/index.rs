use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use chrono::{Datelike, NaiveDate};
use hashbrown::HashMap;
use hstats::Hstats;
use roaring::RoaringBitmap;

use crate::models::{
    analysis::Analyzer,
    document::{Document, Field},
    error::{Result, SearchError},
};

pub type DocId = u32;

/// A publication date, encoded as the integer `YYYYMMDD`
pub type DateKey = u32;

type Postings = HashMap<String, RoaringBitmap>;

/// Encodes a date as `YYYYMMDD`. Only years 0 to 9999 fit.
///
/// Example:
/// ```
/// use newsdex::models::index::date_key;
/// use chrono::NaiveDate;
///
/// let d = NaiveDate::from_ymd_opt(2011, 12, 8).unwrap();
/// assert_eq!(date_key(d), Some(20111208));
/// ```
pub fn date_key(d: NaiveDate) -> Option<DateKey> {
    let year = u32::try_from(d.year()).ok().filter(|y| *y <= 9999)?;
    Some(year * 10_000 + d.month() * 100 + d.day())
}

// Like date_key, but dates out of the encodable range
// are pulled to the nearest end of it.
fn saturating_date_key(d: NaiveDate) -> DateKey {
    date_key(d).unwrap_or(if d.year() < 0 { 0 } else { DateKey::MAX })
}

///
/// Statistics about an index, to get a feel of the
/// indexed corpus.
/// [`Display`](fmt::Display) is implemented for quick convenient output.
#[derive(Debug, Clone)]
pub struct IndexStats {
    n_documents: usize,
    n_title_terms: usize,
    n_description_terms: usize,
    n_dates: usize,
    tokens_per_title: Hstats<f64>,
    tokens_per_description: Hstats<f64>,
}

impl Default for IndexStats {
    fn default() -> Self {
        Self {
            n_documents: 0,
            n_title_terms: 0,
            n_description_terms: 0,
            n_dates: 0,
            tokens_per_title: Hstats::new(0.0, 50.0, 25),
            tokens_per_description: Hstats::new(0.0, 500.0, 25),
        }
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📰 N documents={}
🔤 Title terms={}
🔤 Description terms={}
📅 Distinct dates={}
📏 Tokens per title:
{}
📏 Tokens per description:
{}",
            self.n_documents,
            self.n_title_terms,
            self.n_description_terms,
            self.n_dates,
            self.tokens_per_title,
            self.tokens_per_description,
        )
    }
}

impl IndexStats {
    /// The number of indexed documents
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// The number of distinct terms in the given field
    pub fn n_terms(&self, field: Field) -> usize {
        match field {
            Field::Title => self.n_title_terms,
            Field::Description => self.n_description_terms,
        }
    }

    /// The number of distinct publication dates
    pub fn n_dates(&self) -> usize {
        self.n_dates
    }

    /// Distribution of the number of tokens per title
    pub fn tokens_per_title(&self) -> &Hstats<f64> {
        &self.tokens_per_title
    }

    /// Distribution of the number of tokens per description
    pub fn tokens_per_description(&self) -> &Hstats<f64> {
        &self.tokens_per_description
    }
}

fn count_to_f64(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

/// An immutable, searchable snapshot of a batch of documents.
///
/// Document IDs are the positions of the documents in the
/// batch given to [`Index::build`]. They mean nothing outside
/// of this index.
///
/// Example:
/// ```
/// use newsdex::prelude::*;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2011, 12, 18).unwrap();
/// let index = Index::build(&[Document::new("Kim visits Korea", "...", date)]).unwrap();
///
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.docs_from_term(Field::Title, "korea").len(), 1);
/// assert_eq!(index.title(0), Some("Kim visits Korea"));
/// ```
#[derive(Debug, Default)]
pub struct Index {
    // Remember the titles. Position is the DocId
    titles: Vec<String>,
    title_postings: Postings,
    description_postings: Postings,
    dates: BTreeMap<DateKey, RoaringBitmap>,
    analyzer: Analyzer,
    stats: IndexStats,
}

impl Index {
    /// An index of all the given documents, using the default [`Analyzer`]
    pub fn build(documents: &[Document]) -> Result<Self> {
        Self::build_with(documents, Analyzer::default())
    }

    /// An index of all the given documents. Fails on the first document
    /// that cannot be indexed. No partial index is ever returned.
    pub fn build_with(documents: &[Document], analyzer: Analyzer) -> Result<Self> {
        if u32::try_from(documents.len()).is_err() {
            return Err(SearchError::TooManyDocuments);
        }

        let mut index = Self::empty(analyzer);

        for (position, d) in documents.iter().enumerate() {
            // Cannot overflow, length was checked.
            let doc_id = position as DocId;

            let key = match d.pub_date() {
                None => Err("missing publication date".to_string()),
                Some(date) => date_key(date)
                    .ok_or_else(|| format!("publication date {date} cannot be encoded")),
            }
            .map_err(|reason| {
                tracing::warn!(position, title = d.title(), %reason, "refusing document");
                SearchError::InvalidDocument { position, reason }
            })?;

            index.dates.entry(key).or_default().insert(doc_id);

            let n_tokens = index.index_text(Field::Title, d.title(), doc_id);
            index.stats.tokens_per_title.add(count_to_f64(n_tokens));

            let n_tokens = index.index_text(Field::Description, d.description(), doc_id);
            index.stats.tokens_per_description.add(count_to_f64(n_tokens));

            index.titles.push(d.title().to_string());
        }

        index.stats.n_documents = index.titles.len();
        index.stats.n_title_terms = index.title_postings.len();
        index.stats.n_description_terms = index.description_postings.len();
        index.stats.n_dates = index.dates.len();

        tracing::debug!(
            n_documents = index.stats.n_documents,
            n_title_terms = index.stats.n_title_terms,
            n_description_terms = index.stats.n_description_terms,
            n_dates = index.stats.n_dates,
            "index built"
        );
        Ok(index)
    }

    /// An index without any document
    pub fn empty(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            ..Self::default()
        }
    }

    // Adds the doc_id to the postings of all terms of the text.
    // Returns the number of tokens.
    fn index_text(&mut self, field: Field, text: &str, doc_id: DocId) -> usize {
        let analyzer = self.analyzer;
        let postings = match field {
            Field::Title => &mut self.title_postings,
            Field::Description => &mut self.description_postings,
        };

        let mut n_tokens = 0;
        for term in analyzer.tokenize(text) {
            n_tokens += 1;
            // Repeated terms are no-ops on the bitmap.
            postings.entry(term).or_default().insert(doc_id);
        }
        n_tokens
    }

    fn postings(&self, field: Field) -> &Postings {
        match field {
            Field::Title => &self.title_postings,
            Field::Description => &self.description_postings,
        }
    }

    /// The number of documents in this index
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The analyzer this index was built with.
    /// Query terms must go through the same one.
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// All the document IDs of this index
    pub fn all_docs(&self) -> RoaringBitmap {
        let mut ret = RoaringBitmap::new();
        // Cannot overflow, length was checked at build time.
        ret.insert_range(0..self.len() as DocId);
        ret
    }

    /// The postings of an already normalised term, if the term is known.
    pub fn term_postings(&self, field: Field, term: &str) -> Option<&RoaringBitmap> {
        self.postings(field).get(term)
    }

    /// The documents containing the already normalised term in the field.
    /// Empty for a term outside of the vocabulary.
    pub fn docs_from_term(&self, field: Field, term: &str) -> RoaringBitmap {
        self.term_postings(field, term).cloned().unwrap_or_default()
    }

    /// All distinct terms of a field, in no specific order.
    pub fn vocabulary(&self, field: Field) -> impl Iterator<Item = &str> + '_ {
        self.postings(field).keys().map(String::as_str)
    }

    /// The documents published between start and end, both included.
    /// A missing bound does not constrain its side.
    pub fn docs_in_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RoaringBitmap {
        let lower = start.map_or(Bound::Unbounded, |d| Bound::Included(saturating_date_key(d)));
        let upper = end.map_or(Bound::Unbounded, |d| Bound::Included(saturating_date_key(d)));

        let mut ret = RoaringBitmap::new();
        if let (Bound::Included(l), Bound::Included(u)) = (lower, upper) {
            if l > u {
                // BTreeMap::range would panic.
                return ret;
            }
        }
        self.dates
            .range((lower, upper))
            .for_each(|(_, bm)| ret |= bm);
        ret
    }

    /// The title of the document, if it exists.
    pub fn title(&self, doc_id: DocId) -> Option<&str> {
        self.titles.get(doc_id as usize).map(String::as_str)
    }
}
