//! occoder-match
//!
//! The matching pipeline: exact title lookup, TF-IDF candidate retrieval,
//! fuzzy re-ranking, and the row-wise batch driver.

pub mod batch;
pub mod coder;
pub mod fuzzy;

pub use batch::{code_table, BatchOptions, RecordAccessor};
pub use coder::Coder;
