//! Persistence of run results.
//!
//! ## Directory Structure
//!
//! ```text
//! output/
//! ├── jobs.csv     # source,title,url table of the latest run
//! └── jobs.json    # snapshot with posting ids and failed sources
//! ```

pub mod csv;
pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::JobPosting;
use crate::pipeline::{RunReport, SourceFailure};

pub use local::LocalStorage;

/// Header row of the postings table.
pub const CSV_HEADER: [&str; 3] = ["source", "title", "url"];

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of postings written
    pub posting_count: usize,
    /// Files written, in write order
    pub files: Vec<String>,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// A posting together with its stable id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostingRecord {
    pub id: String,
    #[serde(flatten)]
    pub posting: JobPosting,
}

impl From<&JobPosting> for PostingRecord {
    fn from(posting: &JobPosting) -> Self {
        Self {
            id: posting.id(),
            posting: posting.clone(),
        }
    }
}

/// Contents of the JSON snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// ISO 8601 timestamp of the run's end
    pub updated_at: DateTime<Utc>,
    /// Total posting count
    pub count: usize,
    /// Sources attempted
    pub sources_total: usize,
    pub postings: Vec<PostingRecord>,
    pub failures: Vec<SourceFailure>,
}

impl Snapshot {
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            updated_at: report.finished_at,
            count: report.postings.len(),
            sources_total: report.sources_total,
            postings: report.postings.iter().map(PostingRecord::from).collect(),
            failures: report.failures.clone(),
        }
    }
}

/// Receiver of finished runs.
#[async_trait]
pub trait PostingSink: Send + Sync {
    /// Persist a run's postings. Runs without postings write nothing.
    async fn write_report(&self, report: &RunReport) -> Result<WriteMetadata>;

    /// Load the last written snapshot, if any.
    async fn load_snapshot(&self) -> Result<Option<Snapshot>>;
}
