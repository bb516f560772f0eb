// src/services/digest.rs

//! Notification digest rendering.
//!
//! Turns a run's postings into a subject and plain-text body. Sending the
//! message is left to whatever delivery channel consumes the digest.

use crate::models::{JobPosting, OutputConfig};

const BODY_HEADER: &str = "Here are the new job postings:\n";

/// Rendered notification message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub body: String,
}

impl Digest {
    /// Render postings with the configured subject and line template.
    ///
    /// Returns `None` when there is nothing to announce.
    pub fn render(postings: &[JobPosting], output: &OutputConfig) -> Option<Self> {
        if postings.is_empty() {
            return None;
        }

        let mut lines = Vec::with_capacity(postings.len() + 1);
        lines.push(BODY_HEADER.to_string());
        lines.extend(postings.iter().map(|p| p.format(&output.digest_line)));

        Some(Self {
            subject: output.digest_subject.clone(),
            body: lines.join("\n"),
        })
    }
}
