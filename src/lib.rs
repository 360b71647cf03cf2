//! A small in-memory search engine for news feed items.
//!
//! Documents (title, description, publication date) are indexed in one go
//! into an immutable [`Index`](models::index::Index). Queries combine terms
//! that must or must not appear in the title or the description with an
//! optional publication date range. A search returns the matching titles,
//! at most 100 of them by default. There is no scoring.
//!
//! ```
//! use newsdex::prelude::*;
//! use chrono::NaiveDate;
//!
//! let engine = SearchEngine::default();
//! engine.index(&[
//!     Document::new("Kim visits Korea", "A state visit", NaiveDate::from_ymd_opt(2011, 12, 18).unwrap()),
//!     Document::new("US dawn", "american confession", NaiveDate::from_ymd_opt(2011, 12, 17).unwrap()),
//! ]).unwrap();
//!
//! let q = Query::builder().in_title(["us"]).not_in_title(["dawn"]).build().unwrap();
//! assert!(engine.search(&q).unwrap().is_empty());
//!
//! let q = Query::builder().end_date_str("2011-12-17").build().unwrap();
//! assert_eq!(engine.search(&q).unwrap(), vec!["US dawn"]);
//! ```
pub mod models;
pub mod prelude;
pub mod testing;
