// src/pipeline/run.rs

//! Scrape-and-match orchestration.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::time::{Instant, timeout_at};

use crate::error::{ConfigError, FetchError, Result};
use crate::models::{Anchor, Config, CrawlerConfig, JobPosting, Source};
use crate::pipeline::report::{RunReport, RunState, SourceFailure, SourceOutcome};
use crate::registry::{KeywordFile, KeywordLoader, SourceFile, SourceLoader};
use crate::services::{Deduplicator, HttpFetcher, KeywordMatcher, PageFetcher, extract_anchors};
use crate::utils::url::{is_unusable_href, resolve};

/// Everything a run reads from, passed in explicitly.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    pub crawler: &'a CrawlerConfig,
    pub keywords: &'a dyn KeywordLoader,
    pub sources: &'a dyn SourceLoader,
    pub fetcher: &'a dyn PageFetcher,
}

/// Run the pipeline once.
///
/// Never fails: a missing keyword list or registry ends the run in
/// `RunState::Failed` with no postings, and each unreachable source is
/// recorded as a `SourceFailure` while the others carry on.
pub async fn run_pipeline(ctx: RunContext<'_>) -> RunReport {
    let started_at = Utc::now();
    let mut state = RunState::Idle;

    advance(&mut state, RunState::LoadingConfig);
    let (matcher, sources) = match load_inputs(&ctx) {
        Ok(inputs) => inputs,
        Err(error) => {
            log::error!("Run aborted: {}", error);
            advance(&mut state, RunState::Failed(error.clone()));
            return RunReport::config_failure(error, started_at);
        }
    };
    log::info!(
        "Matching {} job titles across {} sources",
        matcher.keywords().len(),
        sources.len()
    );

    advance(&mut state, RunState::Crawling);
    let outcomes = crawl_sources(&ctx, &matcher, &sources).await;

    advance(&mut state, RunState::Aggregating);
    let (postings, failures) = aggregate(outcomes);

    advance(&mut state, RunState::Done);
    let report = RunReport {
        state,
        started_at,
        finished_at: Utc::now(),
        sources_total: sources.len(),
        postings,
        failures,
    };
    log::info!("{}", report.summary());
    report
}

/// Run against the keyword and employer files named in `config`.
pub async fn run_with_config(config: &Config, data_dir: &Path) -> Result<RunReport> {
    let keywords = KeywordFile::new(config.paths.keywords_path(data_dir));
    let sources = SourceFile::new(config.paths.sources_path(data_dir));
    let fetcher = HttpFetcher::new(&config.crawler)?;

    Ok(run_pipeline(RunContext {
        crawler: &config.crawler,
        keywords: &keywords,
        sources: &sources,
        fetcher: &fetcher,
    })
    .await)
}

fn advance(state: &mut RunState, next: RunState) {
    debug_assert!(
        state.can_advance_to(&next),
        "illegal run transition {state:?} -> {next:?}"
    );
    log::debug!("Run state: {:?} -> {:?}", state, next);
    *state = next;
}

/// Load keywords and sources, compiling the matcher.
fn load_inputs(ctx: &RunContext<'_>) -> std::result::Result<(KeywordMatcher, Vec<Source>), ConfigError> {
    let keywords = ctx
        .keywords
        .load_keywords()
        .map_err(|e| ConfigError::KeywordsUnavailable(e.to_string()))?;
    let matcher = KeywordMatcher::compile(&keywords)?;

    let sources = ctx
        .sources
        .load_sources()
        .map_err(|e| ConfigError::SourcesUnavailable(e.to_string()))?;
    let sources = unique_by_name(sources);
    if sources.is_empty() {
        return Err(ConfigError::NoSourcesConfigured);
    }

    Ok((matcher, sources))
}

/// Drop sources whose name was already registered (first wins).
fn unique_by_name(sources: Vec<Source>) -> Vec<Source> {
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|source| {
            let fresh = seen.insert(source.name.clone());
            if !fresh {
                log::warn!("Ignoring repeated source name '{}'", source.name);
            }
            fresh
        })
        .collect()
}

/// Crawl every source, at most `max_concurrent` at a time.
///
/// Outcomes come back in registry order regardless of which fetch finishes
/// first, so deduplication stays deterministic. With a request delay the
/// n-th fetch starts no earlier than `n * delay` after the crawl began; the
/// wait happens inside each source's future so the stream keeps polling
/// fetches already in flight.
async fn crawl_sources(
    ctx: &RunContext<'_>,
    matcher: &KeywordMatcher,
    sources: &[Source],
) -> Vec<SourceOutcome> {
    let concurrency = ctx.crawler.max_concurrent.max(1);
    let delay = Duration::from_millis(ctx.crawler.request_delay_ms);
    let started = Instant::now();
    let deadline_secs = ctx.crawler.crawl_deadline_secs;
    let deadline =
        (deadline_secs > 0).then(|| started + Duration::from_secs(deadline_secs));

    stream::iter(sources.iter().enumerate())
        .map(move |(index, source)| async move {
            let crawl = async {
                if !delay.is_zero() && index > 0 {
                    tokio::time::sleep_until(started + delay * index as u32).await;
                }
                crawl_source(ctx, matcher, source).await
            };
            match deadline {
                Some(at) => timeout_at(at, crawl).await.unwrap_or_else(|_| {
                    log::warn!(
                        "Crawl deadline reached before {} ({}) finished",
                        source.name,
                        source.url
                    );
                    SourceOutcome::Failed(SourceFailure::new(
                        source,
                        FetchError::Deadline(deadline_secs),
                    ))
                }),
                None => crawl.await,
            }
        })
        .buffered(concurrency)
        .collect::<Vec<_>>()
        .await
}

/// Fetch, extract, resolve and filter a single source.
async fn crawl_source(
    ctx: &RunContext<'_>,
    matcher: &KeywordMatcher,
    source: &Source,
) -> SourceOutcome {
    log::info!("Scraping {}...", source.name);

    let html = match ctx.fetcher.fetch_html(&source.url).await {
        Ok(html) => html,
        Err(error) => return failed(source, error),
    };

    let anchors = match extract_anchors(&html) {
        Ok(anchors) => anchors,
        Err(error) => return failed(source, FetchError::Parse(error.to_string())),
    };

    let postings = match_anchors(source, &anchors, matcher, ctx.crawler.skip_unusable_links);
    log::debug!(
        "{}: {} links, {} matching",
        source.name,
        anchors.len(),
        postings.len()
    );

    SourceOutcome::Scraped {
        source_name: source.name.clone(),
        anchors_seen: anchors.len(),
        postings,
    }
}

fn failed(source: &Source, error: FetchError) -> SourceOutcome {
    log::warn!(
        "Could not scrape {} ({}): {}",
        source.name,
        source.url,
        error
    );
    SourceOutcome::Failed(SourceFailure::new(source, error))
}

/// Turn a page's anchors into postings, in document order.
///
/// Only the visible text decides a match. Hrefs are resolved against the
/// source URL and kept even when unusable, unless `skip_unusable` is set.
pub fn match_anchors(
    source: &Source,
    anchors: &[Anchor],
    matcher: &KeywordMatcher,
    skip_unusable: bool,
) -> Vec<JobPosting> {
    anchors
        .iter()
        .filter(|anchor| matcher.matches(anchor))
        .filter(|anchor| !(skip_unusable && is_unusable_href(&anchor.href)))
        .map(|anchor| {
            JobPosting::new(
                source.name.as_str(),
                anchor.text.as_str(),
                resolve(&source.url, &anchor.href),
            )
        })
        .collect()
}

/// Dedup postings in registry-then-document order and collect failures.
fn aggregate(outcomes: Vec<SourceOutcome>) -> (Vec<JobPosting>, Vec<SourceFailure>) {
    let mut dedup = Deduplicator::new();
    let mut postings = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            SourceOutcome::Scraped { postings: found, .. } => {
                postings.extend(dedup.filter(found));
            }
            SourceOutcome::Failed(failure) => failures.push(failure),
        }
    }

    (postings, failures)
}
