// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Whether a `Content-Type` value can hold an HTML document.
///
/// A missing header is given the benefit of the doubt.
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return true;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.is_empty()
        || mime.contains("html")
        || mime == "text/plain"
        || mime.ends_with("/xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client(&CrawlerConfig::default()).is_ok());
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html_content_type(None));
        assert!(is_html_content_type(Some("text/html")));
        assert!(is_html_content_type(Some("text/html; charset=UTF-8")));
        assert!(is_html_content_type(Some("application/xhtml+xml")));
        assert!(is_html_content_type(Some("TEXT/PLAIN")));
    }

    #[test]
    fn test_non_html_content_types() {
        assert!(!is_html_content_type(Some("application/pdf")));
        assert!(!is_html_content_type(Some("application/json")));
        assert!(!is_html_content_type(Some("image/png")));
    }
}
