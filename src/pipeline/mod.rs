//! Pipeline entry points.
//!
//! - `run_pipeline`: load inputs, crawl every source, dedup, report
//! - `run_with_config`: same, wired to the JSON files and a live HTTP client

pub mod report;
pub mod run;

pub use report::{RunReport, RunState, SourceFailure, SourceOutcome};
pub use run::{RunContext, match_anchors, run_pipeline, run_with_config};
