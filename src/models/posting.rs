//! Anchor and job posting data structures.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A hyperlink extracted from a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Visible link text, whitespace-collapsed and trimmed (may be empty)
    pub text: String,

    /// Raw `href` attribute (empty when absent)
    pub href: String,
}

impl Anchor {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// A link whose title matched a job title keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct JobPosting {
    /// Name of the source the link was found on
    pub source_name: String,

    /// Link text exactly as extracted
    pub title: String,

    /// Absolute link target
    pub url: String,
}

impl JobPosting {
    pub fn new(
        source_name: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    /// Identity key used for within-run deduplication.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.source_name, &self.title, &self.url)
    }

    /// Stable short identifier derived from the identity key.
    pub fn id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.source_name.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.title.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.url.as_bytes());
        hex::encode(&hasher.finalize()[..8])
    }

    /// Flat `(source, title, url)` row for tabular consumers.
    pub fn row(&self) -> [&str; 3] {
        [&self.source_name, &self.title, &self.url]
    }

    /// Format posting for display using a template.
    ///
    /// Supported placeholders: `{source}`, `{title}`, `{url}`, `{id}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{source}", &self.source_name)
            .replace("{title}", &self.title)
            .replace("{url}", &self.url)
            .replace("{id}", &self.id())
    }
}
