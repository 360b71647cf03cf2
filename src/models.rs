pub mod analysis;
pub mod document;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod index;
pub mod query;
