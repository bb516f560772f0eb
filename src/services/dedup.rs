// src/services/dedup.rs

//! Within-run duplicate suppression.

use std::collections::HashSet;

use crate::models::JobPosting;

/// Remembers every `(source, title, url)` key accepted during one run.
///
/// Keys compare as literal strings: two titles differing only in case are
/// distinct postings.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<(String, String, String)>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the posting's key. Returns `false` if it was already seen.
    pub fn accept(&mut self, posting: &JobPosting) -> bool {
        let (source, title, url) = posting.key();
        self.seen
            .insert((source.to_string(), title.to_string(), url.to_string()))
    }

    /// Keep the first occurrence of each key, preserving order.
    pub fn filter(&mut self, postings: impl IntoIterator<Item = JobPosting>) -> Vec<JobPosting> {
        postings
            .into_iter()
            .filter(|posting| {
                let accepted = self.accept(posting);
                if !accepted {
                    log::debug!(
                        "Dropping duplicate posting '{}' from {}",
                        posting.title,
                        posting.source_name
                    );
                }
                accepted
            })
            .collect()
    }

    /// Number of distinct keys accepted so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(source: &str, title: &str, url: &str) -> JobPosting {
        JobPosting::new(source, title, url)
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut dedup = Deduplicator::new();
        let first = posting("A", "IT Analyst", "http://a.test/1");
        assert!(dedup.accept(&first));
        assert!(!dedup.accept(&first.clone()));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_title_case_is_literal() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.accept(&posting("A", "IT Analyst", "http://a.test/1")));
        assert!(dedup.accept(&posting("A", "it analyst", "http://a.test/1")));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn test_key_includes_source_and_url() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.accept(&posting("A", "IT Analyst", "http://a.test/1")));
        assert!(dedup.accept(&posting("B", "IT Analyst", "http://a.test/1")));
        assert!(dedup.accept(&posting("A", "IT Analyst", "http://a.test/2")));
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut dedup = Deduplicator::new();
        let kept = dedup.filter(vec![
            posting("A", "One", "u1"),
            posting("A", "Two", "u2"),
            posting("A", "One", "u1"),
            posting("B", "Three", "u3"),
            posting("A", "Two", "u2"),
        ]);
        let titles: Vec<_> = kept.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }
}
