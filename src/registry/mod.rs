//! Keyword and employer list loading.
//!
//! The pipeline reads its inputs through `KeywordLoader` and
//! `SourceLoader`. The JSON file stores also provide the add/remove
//! operations used to manage the lists from the command line.

mod keywords;
mod sources;

pub use keywords::{KeywordFile, KeywordLoader};
pub use sources::{SourceFile, SourceLoader};
