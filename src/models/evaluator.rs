use std::num::NonZeroUsize;

use itertools::Itertools;
use roaring::RoaringBitmap;
use strum::IntoEnumIterator;

use crate::models::{
    document::Field,
    error::Result,
    index::{DocId, Index},
    query::{Occur, Query},
};

/// The most titles a search ever returns, however many documents match.
pub const DEFAULT_MAX_RESULTS: usize = 100;

///
/// Evaluates [`Query`]s against an [`Index`].
///
/// There is no scoring. Matching documents are returned in index order
/// (the order documents were given at build time), and only the first
/// `max_results` of them are kept.
///
/// Example:
/// ```
/// use newsdex::prelude::*;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2011, 12, 18).unwrap();
/// let index = Index::build(&[
///     Document::new("Kim visits Korea", "...", date),
///     Document::new("US dawn", "american confession", date.pred_opt().unwrap()),
/// ]).unwrap();
///
/// let q = Query::builder().in_title(["kim", "korea"]).build().unwrap();
/// assert_eq!(Evaluator::default().evaluate(&index, &q).unwrap(), vec!["Kim visits Korea"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    max_results: NonZeroUsize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            max_results: NonZeroUsize::new(DEFAULT_MAX_RESULTS).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Evaluator {
    pub fn new(max_results: NonZeroUsize) -> Self {
        Self { max_results }
    }

    /// The hard ceiling on the number of returned titles
    pub fn max_results(&self) -> NonZeroUsize {
        self.max_results
    }

    /// The IDs of all documents matching the query, before truncation.
    ///
    /// Starting from the whole index, each term that MUST be in a field
    /// intersects, each term that MUST NOT be in a field subtracts,
    /// and the date range (if any) intersects.
    pub fn matching_docs(&self, index: &Index, query: &Query) -> Result<RoaringBitmap> {
        query.validate()?;

        let analyzer = index.analyzer();
        let mut candidates = index.all_docs();

        for field in Field::iter() {
            // Intersect the smallest postings first, so an empty result shows early.
            let musts = query
                .terms(field, Occur::Must)
                .into_iter()
                .flat_map(|ts| ts.iter())
                .map(|t| analyzer.normalize_term(t))
                .map(|t| (index.term_postings(field, &t).map_or(0, |bm| bm.len()), t))
                .sorted_by_key(|(n, _)| *n);

            for (_, term) in musts {
                if candidates.is_empty() {
                    break;
                }
                match index.term_postings(field, &term) {
                    Some(bm) => candidates &= bm,
                    None => candidates.clear(),
                }
                tracing::trace!(%field, %term, remaining = candidates.len(), "MUST");
            }

            let must_nots = query
                .terms(field, Occur::MustNot)
                .into_iter()
                .flat_map(|ts| ts.iter())
                .map(|t| analyzer.normalize_term(t));

            for term in must_nots {
                if candidates.is_empty() {
                    break;
                }
                if let Some(bm) = index.term_postings(field, &term) {
                    candidates -= bm;
                }
                tracing::trace!(%field, %term, remaining = candidates.len(), "MUST_NOT");
            }
        }

        if query.has_date_range() && !candidates.is_empty() {
            candidates &= index.docs_in_date_range(query.start_date(), query.end_date());
            tracing::trace!(remaining = candidates.len(), "date range");
        }

        Ok(candidates)
    }

    /// The titles of the documents matching the query, in index order,
    /// at most `max_results` of them.
    ///
    /// Fails only when the query has a start date after its end date.
    pub fn evaluate(&self, index: &Index, query: &Query) -> Result<Vec<String>> {
        let matching = self.matching_docs(index, query)?;

        let titles = matching
            .iter()
            .take(self.max_results.get())
            .filter_map(|doc_id: DocId| index.title(doc_id))
            .map(String::from)
            .collect_vec();

        tracing::debug!(
            n_matching = matching.len(),
            n_returned = titles.len(),
            "query evaluated"
        );
        Ok(titles)
    }
}

/// Evaluates the query with a default [`Evaluator`]
pub fn evaluate(index: &Index, query: &Query) -> Result<Vec<String>> {
    Evaluator::default().evaluate(index, query)
}

#[cfg(test)]
mod test_evaluator {
    use super::*;
    use crate::models::document::Document;
    use chrono::NaiveDate;

    fn index() -> Index {
        let date = NaiveDate::from_ymd_opt(2011, 12, 18).unwrap();
        Index::build(&[
            Document::new("alpha beta", "one", date),
            Document::new("beta gamma", "two", date),
            Document::new("gamma delta", "one two", date),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_cap() {
        assert_eq!(Evaluator::default().max_results().get(), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_matching_docs() {
        let index = index();
        let e = Evaluator::default();

        let q = Query::builder().in_title(["beta"]).build().unwrap();
        assert_eq!(
            e.matching_docs(&index, &q).unwrap().iter().collect_vec(),
            vec![0, 1]
        );

        let q = Query::builder()
            .in_title(["gamma"])
            .not_in_description(["one"])
            .build()
            .unwrap();
        assert_eq!(
            e.matching_docs(&index, &q).unwrap().iter().collect_vec(),
            vec![1]
        );

        // Query terms are normalised like the indexed text.
        let q = Query::builder().in_title([" GAMMA"]).build().unwrap();
        assert_eq!(e.matching_docs(&index, &q).unwrap().len(), 2);

        // Only exclusions: everything else.
        let q = Query::builder().not_in_title(["beta"]).build().unwrap();
        assert_eq!(
            e.matching_docs(&index, &q).unwrap().iter().collect_vec(),
            vec![2]
        );
    }

    #[test]
    fn test_small_cap() {
        let index = index();
        let e = Evaluator::new(NonZeroUsize::new(2).unwrap());
        assert_eq!(
            e.evaluate(&index, &Query::match_all()).unwrap(),
            vec!["alpha beta", "beta gamma"]
        );
    }
}
