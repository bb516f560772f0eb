// src/models/mod.rs

//! Domain models for the job tracker.

mod config;
mod posting;
mod source;

pub use config::{Config, CrawlerConfig, OutputConfig, PathsConfig};
pub use posting::{Anchor, JobPosting};
pub use source::Source;
