//! Employer source definitions.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// An employer job board to crawl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    /// Unique display name (e.g., a city or employer)
    pub name: String,

    /// Job board URL, used both as fetch target and link base
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Check that the name is non-empty and the URL is absolute http(s).
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("source name is empty"));
        }
        let parsed = Url::parse(self.url.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "source '{}' has unsupported scheme '{}'",
                self.name,
                parsed.scheme()
            )));
        }
        Ok(())
    }
}
