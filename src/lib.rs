// src/lib.rs

//! Job posting tracker library.
//!
//! Scrapes employer job boards, keeps links whose text matches a job title
//! keyword, and hands back a deduplicated list of postings.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod services;
pub mod storage;
pub mod utils;
