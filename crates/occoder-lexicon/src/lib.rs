//! occoder-lexicon
//!
//! Per-scheme lookup dictionaries: exact-title lists, vocabulary and synonym
//! dictionaries, bucket texts and code labels. See `store` for the query
//! surface and `load` for the on-disk JSON formats.

pub mod load;
pub mod store;

pub use store::{Bucket, SchemeLexicon};
