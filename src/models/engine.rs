use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::{
    analysis::Analyzer,
    document::Document,
    error::Result,
    evaluator::{DEFAULT_MAX_RESULTS, Evaluator},
    index::{Index, IndexStats},
    query::Query,
};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub(crate) max_results: NonZeroUsize,
    pub(crate) english_stop_words: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: NonZeroUsize::new(DEFAULT_MAX_RESULTS).unwrap_or(NonZeroUsize::MIN),
            english_stop_words: false,
        }
    }
}

impl SearchConfig {
    /// The most titles one search can return, whatever
    /// the number of matching documents.
    ///
    /// The default is 100.
    pub fn max_results(&self) -> NonZeroUsize {
        self.max_results
    }

    /// Are classic english stop words left out of the index?
    ///
    /// The default is false.
    pub fn english_stop_words(&self) -> bool {
        self.english_stop_words
    }

    pub(crate) fn analyzer(&self) -> Analyzer {
        Analyzer::new().with_english_stop_words(self.english_stop_words)
    }

    pub(crate) fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.max_results)
    }
}

#[derive(Default)]
/// A builder should you want to build a search engine
/// with different parameters
pub struct SearchBuilder {
    config: SearchConfig,
}

impl SearchBuilder {
    pub fn build(self) -> SearchEngine {
        SearchEngine::from_config(self.config)
    }

    /// See [`SearchConfig::max_results`]
    pub fn max_results(mut self, n: NonZeroUsize) -> Self {
        self.config.max_results = n;
        self
    }

    /// See [`SearchConfig::english_stop_words`]
    pub fn english_stop_words(mut self, enabled: bool) -> Self {
        self.config.english_stop_words = enabled;
        self
    }
}

///
/// Holds the current [`Index`] snapshot, and searches it.
///
/// Indexing builds a whole new snapshot and swaps it in. Searches
/// running at that time finish on the snapshot they started with.
/// The engine can be shared between threads.
///
/// Example:
/// ```
/// use newsdex::prelude::*;
/// use chrono::NaiveDate;
///
/// let engine = SearchEngine::default();
/// let date = NaiveDate::from_ymd_opt(2011, 12, 18).unwrap();
/// engine.index(&[Document::new("Kim visits Korea", "...", date)]).unwrap();
///
/// let q = Query::builder().start_date(date).end_date(date).build().unwrap();
/// assert_eq!(engine.search(&q).unwrap(), vec!["Kim visits Korea"]);
/// ```
#[derive(Debug)]
pub struct SearchEngine {
    config: SearchConfig,
    current: RwLock<Arc<Index>>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::from_config(SearchConfig::default())
    }
}

impl SearchEngine {
    pub fn builder() -> SearchBuilder {
        SearchBuilder::default()
    }

    /// An engine with an empty index.
    pub fn from_config(config: SearchConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(Index::empty(config.analyzer()))),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replaces the current index with an index of these documents.
    ///
    /// On error, the current index is left untouched.
    pub fn index(&self, documents: &[Document]) -> Result<()> {
        let new_index = Index::build_with(documents, self.config.analyzer())?;
        tracing::info!(n_documents = new_index.len(), "swapping in new index");
        *self.current.write() = Arc::new(new_index);
        Ok(())
    }

    /// The current index. It will not change under your feet,
    /// even if the engine is re-indexed.
    pub fn snapshot(&self) -> Arc<Index> {
        self.current.read().clone()
    }

    /// Statistics of the current index
    pub fn stats(&self) -> IndexStats {
        self.snapshot().stats().clone()
    }

    /// The titles of the documents of the current index matching the query.
    /// See [`Evaluator::evaluate`].
    pub fn search(&self, query: &Query) -> Result<Vec<String>> {
        tracing::debug!(%query, "searching");
        self.config.evaluator().evaluate(&self.snapshot(), query)
    }
}
