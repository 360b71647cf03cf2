pub use crate::models::analysis::Analyzer;
pub use crate::models::document::{Document, Field};
pub use crate::models::engine::{SearchBuilder, SearchConfig, SearchEngine};
pub use crate::models::error::SearchError;
pub use crate::models::evaluator::{Evaluator, evaluate};
pub use crate::models::index::{DocId, Index, IndexStats};
pub use crate::models::query::{Occur, Query, QueryBuilder, parse_date};
