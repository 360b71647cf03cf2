/// Testing oriented utilities.
use chrono::{Days, NaiveDate};
use rand::seq::IndexedRandom;

use crate::prelude::{Document, Query};

// A small vocabulary, so random queries do match random documents.
const WORDS: &[&str] = &[
    "kim", "korea", "us", "dawn", "american", "confession", "video", "canada", "iraq", "israel",
    "election", "market", "storm", "summit", "visit", "oil", "court", "strike",
];

// Random documents are published within the 31 days after this.
fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 12, 1).unwrap_or_default()
}

fn random_date<U: rand::Rng>(rng: &mut U) -> NaiveDate {
    let d = epoch();
    d.checked_add_days(Days::new(rng.random_range(0..31)))
        .unwrap_or(d)
}

fn random_words<U: rand::Rng>(rng: &mut U, min: usize, max: usize) -> Vec<&'static str> {
    let n = rng.random_range(min..=max);
    (0..n).filter_map(|_| WORDS.choose(rng).copied()).collect()
}

fn maybe_terms<U: rand::Rng>(rng: &mut U) -> Option<Vec<&'static str>> {
    rng.random_bool(0.3).then(|| random_words(rng, 1, 3))
}

impl Document {
    /// Builds a random, always indexable document.
    /// This is mainly useful for testing and benchmarking.
    ///
    /// Example:
    /// ```
    /// use newsdex::prelude::*;
    ///
    /// let mut rng = rand::rng();
    /// let d = Document::random(&mut rng);
    /// assert!(d.pub_date().is_some());
    /// ```
    pub fn random<U: rand::Rng>(rng: &mut U) -> Self {
        let title = random_words(rng, 1, 6).join(" ");
        // Some punctuation and case, so the analyzer has work to do.
        let description = random_words(rng, 0, 12)
            .into_iter()
            .enumerate()
            .map(|(i, w)| if i % 3 == 0 { w.to_uppercase() } else { format!("{w},") })
            .collect::<Vec<_>>()
            .join(" ");
        Document::new(title, description, random_date(rng))
    }
}

impl Query {
    /// Builds a random valid query, using the same vocabulary
    /// and dates as [`Document::random`].
    /// This is mainly useful for testing and benchmarking.
    ///
    /// Example:
    /// ```
    /// use newsdex::prelude::*;
    ///
    /// let mut rng = rand::rng();
    /// let q = Query::random(&mut rng);
    /// assert!(q.validate().is_ok());
    /// ```
    pub fn random<U: rand::Rng>(rng: &mut U) -> Self {
        let mut b = Query::builder();
        if let Some(ts) = maybe_terms(rng) {
            b = b.in_title(ts);
        }
        if let Some(ts) = maybe_terms(rng) {
            b = b.not_in_title(ts);
        }
        if let Some(ts) = maybe_terms(rng) {
            b = b.in_description(ts);
        }
        if let Some(ts) = maybe_terms(rng) {
            b = b.not_in_description(ts);
        }

        let (d1, d2) = (random_date(rng), random_date(rng));
        let (start, end) = (d1.min(d2), d1.max(d2));
        if rng.random_bool(0.3) {
            b = b.start_date(start);
        }
        if rng.random_bool(0.3) {
            b = b.end_date(end);
        }

        // Terms are never empty, dates are ordered.
        b.build().unwrap_or_default()
    }
}
