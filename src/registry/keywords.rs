// src/registry/keywords.rs

//! Job title keyword list.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::services::normalize_keywords;
use crate::utils::fs::{read_json_optional, write_json_atomic};

/// Supplies the job title keywords for a run.
///
/// An empty list means "not configured"; an `Err` means the list could not
/// be read at all.
pub trait KeywordLoader: Send + Sync {
    fn load_keywords(&self) -> Result<Vec<String>>;
}

impl KeywordLoader for Vec<String> {
    fn load_keywords(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

/// Keyword list stored as a JSON array of strings.
#[derive(Debug, Clone)]
pub struct KeywordFile {
    path: PathBuf,
}

impl KeywordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a title. Blank and already-listed titles are rejected.
    pub fn add(&self, title: &str) -> Result<Vec<String>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::registry("job title is empty"));
        }

        let mut titles = self.load_keywords()?;
        if titles.iter().any(|t| t == title) {
            return Err(AppError::registry(format!(
                "'{title}' is already in the list"
            )));
        }

        titles.push(title.to_string());
        self.save(&titles)?;
        log::info!("Added job title '{}'", title);
        Ok(titles)
    }

    /// Remove a title by exact text.
    pub fn remove(&self, title: &str) -> Result<Vec<String>> {
        let title = title.trim();
        let mut titles = self.load_keywords()?;
        let before = titles.len();
        titles.retain(|t| t != title);

        if titles.len() == before {
            return Err(AppError::registry(format!("'{title}' is not in the list")));
        }

        self.save(&titles)?;
        log::info!("Removed job title '{}'", title);
        Ok(titles)
    }

    /// Overwrite the stored list.
    pub fn save(&self, titles: &[String]) -> Result<()> {
        write_json_atomic(&self.path, titles)
    }
}

impl KeywordLoader for KeywordFile {
    /// A missing file loads as an empty list.
    fn load_keywords(&self) -> Result<Vec<String>> {
        let titles: Vec<String> = read_json_optional(&self.path)?.unwrap_or_default();
        Ok(normalize_keywords(&titles))
    }
}
