// src/services/fetcher.rs

//! Job board page fetching and link extraction.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};

use crate::error::{AppError, FetchError, Result};
use crate::models::{Anchor, CrawlerConfig};
use crate::utils::http;

/// Source of raw page HTML.
///
/// The pipeline only talks to this trait so runs can be driven from
/// fixtures instead of the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the HTML document at `url`.
    async fn fetch_html(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// Fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured user agent and timeout.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::with_client(http::create_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self.client.get(url.trim()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !http::is_html_content_type(content_type.as_deref()) {
            return Err(FetchError::NotHtml(content_type.unwrap_or_default()));
        }

        Ok(response.text().await?)
    }
}

/// Extract every `<a>` element in document order.
///
/// Text nodes are concatenated, whitespace runs collapse to one space and
/// the result is trimmed. A missing `href` becomes an empty string.
pub fn extract_anchors(html: &str) -> Result<Vec<Anchor>> {
    let document = Html::parse_document(html);
    let selector = parse_selector("a")?;

    Ok(document
        .select(&selector)
        .map(|element| {
            let raw_text: String = element.text().collect();
            Anchor {
                text: normalize_whitespace(&raw_text),
                href: element.value().attr("href").unwrap_or("").to_string(),
            }
        })
        .collect())
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
