// src/error.rs

//! Unified error handling for the job tracker.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Reasons a run cannot start crawling.
///
/// These never escape `run_pipeline` as an `Err`; they are reported on the
/// `RunReport` so the caller can show an actionable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The keyword list is empty
    #[error("no job title keywords configured")]
    NoKeywordsConfigured,

    /// The source registry is empty
    #[error("no employer sources configured")]
    NoSourcesConfigured,

    /// The keyword loader itself failed
    #[error("job title keywords could not be loaded: {0}")]
    KeywordsUnavailable(String),

    /// The source loader itself failed
    #[error("employer sources could not be loaded: {0}")]
    SourcesUnavailable(String),

    /// The keywords produced a pattern the regex engine rejected
    #[error("keyword pattern could not be compiled: {0}")]
    InvalidPattern(String),
}

/// Why a single source contributed nothing to a run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchError {
    /// Connection, DNS, TLS or body read failure
    #[error("request failed: {0}")]
    Request(String),

    /// The per-source timeout elapsed
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The response was not an HTML document
    #[error("response is not HTML ({0})")]
    NotHtml(String),

    /// The page could not be turned into anchors
    #[error("page could not be parsed: {0}")]
    Parse(String),

    /// The overall crawl deadline passed first
    #[error("crawl deadline of {0}s reached before the source finished")]
    Deadline(u64),
}

impl FetchError {
    /// Short machine-friendly label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request(_) => "request",
            Self::Timeout(_) => "timeout",
            Self::Status(_) => "status",
            Self::NotHtml(_) => "not_html",
            Self::Parse(_) => "parse",
            Self::Deadline(_) => "deadline",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Request(error.to_string())
        }
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Settings file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Keyword or source list cannot be used for a run
    #[error(transparent)]
    NotConfigured(#[from] ConfigError),

    /// Keyword or source list management error
    #[error("Registry error: {0}")]
    Registry(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a registry error.
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry(message.into())
    }
}
