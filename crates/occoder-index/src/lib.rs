//! occoder-index
//!
//! Sparse lexical similarity over scheme bucket texts. Built once per
//! scheme, queried per record.

pub mod tfidf;

pub use tfidf::TfidfIndex;
