//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Locations of the keyword and employer lists
    #[serde(default)]
    pub paths: PathsConfig,

    /// Export and digest settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.paths.keywords_file.trim().is_empty() {
            return Err(AppError::validation("paths.keywords_file is empty"));
        }
        if self.paths.sources_file.trim().is_empty() {
            return Err(AppError::validation("paths.sources_file is empty"));
        }
        if self.output.csv_file.trim().is_empty() && self.output.json_file.trim().is_empty() {
            return Err(AppError::validation(
                "at least one of output.csv_file or output.json_file must be set",
            ));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-source request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum sources fetched at once (1 = sequential)
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Delay after each completed source in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,

    /// Deadline for the whole crawl in seconds (0 = none)
    #[serde(default = "defaults::crawl_deadline")]
    pub crawl_deadline_secs: u64,

    /// Drop matches whose link resolves to nothing navigable
    #[serde(default)]
    pub skip_unusable_links: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            request_delay_ms: 0,
            crawl_deadline_secs: defaults::crawl_deadline(),
            skip_unusable_links: false,
        }
    }
}

/// File locations, relative to the data directory unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON array of job title keywords
    #[serde(default = "defaults::keywords_file")]
    pub keywords_file: String,

    /// JSON object mapping employer name to job board URL
    #[serde(default = "defaults::sources_file")]
    pub sources_file: String,

    /// Directory receiving run exports
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl PathsConfig {
    /// Resolve the keyword file against a data directory.
    pub fn keywords_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.keywords_file)
    }

    /// Resolve the employer file against a data directory.
    pub fn sources_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.sources_file)
    }

    /// Resolve the output directory against a data directory.
    pub fn output_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.output_dir)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            keywords_file: defaults::keywords_file(),
            sources_file: defaults::sources_file(),
            output_dir: defaults::output_dir(),
        }
    }
}

/// Export and notification digest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Tabular export file name (empty disables)
    #[serde(default = "defaults::csv_file")]
    pub csv_file: String,

    /// JSON snapshot file name (empty disables)
    #[serde(default = "defaults::json_file")]
    pub json_file: String,

    /// Digest subject line
    #[serde(default = "defaults::digest_subject")]
    pub digest_subject: String,

    /// Per-posting digest template.
    ///
    /// Placeholders: `{source}`, `{title}`, `{url}`, `{id}`
    #[serde(default = "defaults::digest_line")]
    pub digest_line: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_file: defaults::csv_file(),
            json_file: defaults::json_file(),
            digest_subject: defaults::digest_subject(),
            digest_line: defaults::digest_line(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; job-tracker/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn crawl_deadline() -> u64 {
        300
    }

    // Path defaults
    pub fn keywords_file() -> String {
        "job_titles.json".into()
    }
    pub fn sources_file() -> String {
        "employers.json".into()
    }
    pub fn output_dir() -> String {
        "output".into()
    }

    // Output defaults
    pub fn csv_file() -> String {
        "jobs.csv".into()
    }
    pub fn json_file() -> String {
        "jobs.json".into()
    }
    pub fn digest_subject() -> String {
        "New IT Job Postings Found".into()
    }
    pub fn digest_line() -> String {
        "{source} - {title}\n{url}\n".into()
    }
}
