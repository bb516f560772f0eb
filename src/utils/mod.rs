//! Utility functions and helpers.

pub mod fs;
pub mod http;
pub mod url;

pub use self::url::resolve;
