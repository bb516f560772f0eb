// src/registry/sources.rs

//! Employer source registry.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::Source;
use crate::utils::fs::{read_json_optional, write_json_atomic};

/// Supplies the ordered list of sources to crawl.
///
/// Order is significant: it fixes crawl order and therefore which
/// duplicate wins.
pub trait SourceLoader: Send + Sync {
    fn load_sources(&self) -> Result<Vec<Source>>;
}

impl SourceLoader for Vec<Source> {
    fn load_sources(&self) -> Result<Vec<Source>> {
        Ok(self.clone())
    }
}

/// Registry stored as a JSON object of `name -> url`, in file order.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a new source. The name must be unused and the URL absolute.
    pub fn add(&self, name: &str, url: &str) -> Result<Vec<Source>> {
        let source = Source::new(name.trim(), url.trim());
        if source.name.is_empty() || source.url.is_empty() {
            return Err(AppError::registry("both name and URL are required"));
        }
        source.validate()?;

        let mut sources = self.load_sources()?;
        if sources.iter().any(|s| s.name == source.name) {
            return Err(AppError::registry(format!(
                "source '{}' already exists",
                source.name
            )));
        }

        log::info!("Added source '{}' ({})", source.name, source.url);
        sources.push(source);
        self.save(&sources)?;
        Ok(sources)
    }

    /// Remove a source by name.
    pub fn remove(&self, name: &str) -> Result<Vec<Source>> {
        let name = name.trim();
        let mut sources = self.load_sources()?;
        let before = sources.len();
        sources.retain(|s| s.name != name);

        if sources.len() == before {
            return Err(AppError::registry(format!("source '{name}' not found")));
        }

        self.save(&sources)?;
        log::info!("Removed source '{}'", name);
        Ok(sources)
    }

    /// Overwrite the stored registry.
    pub fn save(&self, sources: &[Source]) -> Result<()> {
        let map: Map<String, Value> = sources
            .iter()
            .map(|s| (s.name.clone(), Value::String(s.url.clone())))
            .collect();
        write_json_atomic(&self.path, &map)
    }
}

impl SourceLoader for SourceFile {
    /// A missing file loads as an empty registry.
    fn load_sources(&self) -> Result<Vec<Source>> {
        let map: Map<String, Value> = read_json_optional(&self.path)?.unwrap_or_default();

        map.into_iter()
            .map(|(name, value)| match value {
                Value::String(url) => Ok(Source::new(name, url)),
                other => Err(AppError::config(format!(
                    "source '{name}' in {:?} must map to a URL string, found {other}",
                    self.path
                ))),
            })
            .collect()
    }
}
