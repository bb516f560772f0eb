// src/pipeline/report.rs

//! Run results and per-source outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FetchError};
use crate::models::{JobPosting, Source};

/// Orchestrator lifecycle.
///
/// `Idle -> LoadingConfig -> Crawling -> Aggregating -> Done`, with
/// `Failed` reachable only from `LoadingConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    LoadingConfig,
    Crawling,
    Aggregating,
    Done,
    Failed(ConfigError),
}

impl RunState {
    /// Whether `next` is a legal successor of this state.
    pub fn can_advance_to(&self, next: &RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Idle, RunState::LoadingConfig)
                | (RunState::LoadingConfig, RunState::Crawling)
                | (RunState::LoadingConfig, RunState::Failed(_))
                | (RunState::Crawling, RunState::Aggregating)
                | (RunState::Aggregating, RunState::Done)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed(_))
    }
}

/// A source that contributed nothing because it could not be scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source_name: String,
    pub url: String,
    pub error: FetchError,
}

impl SourceFailure {
    pub fn new(source: &Source, error: FetchError) -> Self {
        Self {
            source_name: source.name.clone(),
            url: source.url.clone(),
            error,
        }
    }
}

/// Result of crawling one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The page was fetched; `postings` are its matches in document order
    Scraped {
        source_name: String,
        anchors_seen: usize,
        postings: Vec<JobPosting>,
    },
    /// The page could not be fetched or parsed
    Failed(SourceFailure),
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Terminal state: `Done` or `Failed`
    pub state: RunState,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Number of sources the run attempted
    pub sources_total: usize,
    /// Deduplicated matches in registry-then-document order
    pub postings: Vec<JobPosting>,
    /// Sources that failed, in registry order
    pub failures: Vec<SourceFailure>,
}

impl RunReport {
    /// Report for a run that stopped before crawling.
    pub fn config_failure(error: ConfigError, started_at: DateTime<Utc>) -> Self {
        Self {
            state: RunState::Failed(error),
            started_at,
            finished_at: Utc::now(),
            sources_total: 0,
            postings: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// The configuration problem that stopped the run, if any.
    pub fn config_error(&self) -> Option<&ConfigError> {
        match &self.state {
            RunState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_config_failure(&self) -> bool {
        self.config_error().is_some()
    }

    pub fn sources_scraped(&self) -> usize {
        self.sources_total.saturating_sub(self.failures.len())
    }

    /// Flat `(source, title, url)` rows for storage and notification.
    pub fn rows(&self) -> impl Iterator<Item = [&str; 3]> {
        self.postings.iter().map(JobPosting::row)
    }

    /// Give up ownership of the matches and failures.
    pub fn into_parts(self) -> (Vec<JobPosting>, Vec<SourceFailure>) {
        (self.postings, self.failures)
    }

    /// One-line human summary, e.g.
    /// `12 of 14 sources scraped; 3 matching postings; 2 failed: A, B`.
    pub fn summary(&self) -> String {
        if let Some(error) = self.config_error() {
            return format!("Run aborted: {error}");
        }

        let mut summary = format!(
            "{} of {} sources scraped; {} matching posting{}",
            self.sources_scraped(),
            self.sources_total,
            self.postings.len(),
            if self.postings.len() == 1 { "" } else { "s" }
        );

        if !self.failures.is_empty() {
            let names: Vec<&str> = self
                .failures
                .iter()
                .map(|f| f.source_name.as_str())
                .collect();
            summary.push_str(&format!(
                "; {} failed: {}",
                self.failures.len(),
                names.join(", ")
            ));
        }

        summary
    }
}
