//! Local filesystem storage implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::OutputConfig;
use crate::pipeline::RunReport;
use crate::storage::{CSV_HEADER, PostingSink, Snapshot, WriteMetadata, csv};
use crate::utils::fs;

/// Writes run exports into a directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    csv_file: String,
    json_file: String,
}

impl LocalStorage {
    /// Create a LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, output: &OutputConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            csv_file: output.csv_file.trim().to_string(),
            json_file: output.json_file.trim().to_string(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write one export file atomically.
    async fn write_bytes(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.path(key);
        fs::run_blocking(move || fs::write_bytes_atomic(&path, &bytes)).await
    }

    /// Read and parse a JSON export, `None` if it was never written.
    async fn read_json<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path(key);
        fs::run_blocking(move || fs::read_json_optional(&path)).await
    }
}

#[async_trait]
impl PostingSink for LocalStorage {
    async fn write_report(&self, report: &RunReport) -> Result<WriteMetadata> {
        let mut files = Vec::new();

        if report.postings.is_empty() {
            log::info!("No matching postings; nothing written");
            return Ok(WriteMetadata {
                posting_count: 0,
                files,
                timestamp: Utc::now(),
            });
        }

        if !self.csv_file.is_empty() {
            let bytes = csv::to_bytes(&CSV_HEADER, report.rows())?;
            self.write_bytes(&self.csv_file, bytes).await?;
            log::info!(
                "{} postings written to {}",
                report.postings.len(),
                self.path(&self.csv_file).display()
            );
            files.push(self.csv_file.clone());
        }

        if !self.json_file.is_empty() {
            let bytes = serde_json::to_vec_pretty(&Snapshot::from_report(report))?;
            self.write_bytes(&self.json_file, bytes).await?;
            log::info!("Snapshot written to {}", self.path(&self.json_file).display());
            files.push(self.json_file.clone());
        }

        Ok(WriteMetadata {
            posting_count: report.postings.len(),
            files,
            timestamp: Utc::now(),
        })
    }

    async fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        if self.json_file.is_empty() {
            return Ok(None);
        }
        self.read_json(&self.json_file).await
    }
}
