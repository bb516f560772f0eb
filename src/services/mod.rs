//! Service layer for the job tracker.
//!
//! This module contains the business logic for:
//! - Keyword pattern compilation and title matching (`KeywordMatcher`)
//! - Page fetching and link extraction (`PageFetcher`, `HttpFetcher`)
//! - Within-run duplicate suppression (`Deduplicator`)
//! - Notification digest rendering (`Digest`)

mod dedup;
mod digest;
mod fetcher;
mod keywords;

pub use dedup::Deduplicator;
pub use digest::Digest;
pub use fetcher::{HttpFetcher, PageFetcher, extract_anchors};
pub use keywords::{KeywordMatcher, normalize_keywords};
