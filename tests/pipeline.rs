//! End-to-end runs against a local HTTP server.

use std::time::Duration;

use job_tracker::error::{ConfigError, FetchError};
use job_tracker::models::{Config, CrawlerConfig, JobPosting, Source};
use job_tracker::pipeline::{RunContext, RunReport, RunState, run_pipeline, run_with_config};
use job_tracker::registry::{KeywordFile, SourceFile};
use job_tracker::services::HttpFetcher;
use job_tracker::storage::{LocalStorage, PostingSink};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPRINGFIELD_PAGE: &str = r#"
<html>
  <body>
    <h1>Current Openings</h1>
    <ul>
      <li><a href="/job/1">Senior IT Analyst</a></li>
      <li><a href="/job/2">Bus Driver</a></li>
    </ul>
  </body>
</html>"#;

async fn serve(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

fn keywords(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

async fn run(crawler: &CrawlerConfig, keywords: Vec<String>, sources: Vec<Source>) -> RunReport {
    let fetcher = HttpFetcher::new(crawler).unwrap();
    run_pipeline(RunContext {
        crawler,
        keywords: &keywords,
        sources: &sources,
        fetcher: &fetcher,
    })
    .await
}

#[tokio::test]
async fn matches_single_posting_and_resolves_link() {
    let server = MockServer::start().await;
    serve(&server, "/jobs", SPRINGFIELD_PAGE).await;
    let base = format!("{}/jobs", server.uri());

    let report = run(
        &CrawlerConfig::default(),
        keywords(&["IT Analyst"]),
        vec![Source::new("Springfield", &base)],
    )
    .await;

    assert_eq!(report.state, RunState::Done);
    assert_eq!(
        report.postings,
        vec![JobPosting::new(
            "Springfield",
            "Senior IT Analyst",
            format!("{}/job/1", server.uri())
        )]
    );
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn duplicate_anchor_on_page_is_reported_once() {
    let server = MockServer::start().await;
    let page = r#"
        <a href="/job/1">Senior IT Analyst</a>
        <p>Featured:</p>
        <a href="/job/1">Senior IT Analyst</a>"#;
    serve(&server, "/jobs", page).await;

    let report = run(
        &CrawlerConfig::default(),
        keywords(&["IT Analyst"]),
        vec![Source::new("Springfield", format!("{}/jobs", server.uri()))],
    )
    .await;

    assert_eq!(report.postings.len(), 1);
}

#[tokio::test]
async fn failing_sources_do_not_stop_the_run() {
    let server = MockServer::start().await;
    serve(&server, "/springfield", SPRINGFIELD_PAGE).await;
    serve(&server, "/shelbyville/", r#"<a href="apply/7">IT Analyst (Temporary)</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.7", "application/pdf"))
        .mount(&server)
        .await;

    let report = run(
        &CrawlerConfig::default(),
        keywords(&["IT Analyst"]),
        vec![
            Source::new("Springfield", format!("{}/springfield", server.uri())),
            Source::new("Capital City", format!("{}/broken", server.uri())),
            Source::new("Ogdenville", format!("{}/report.pdf", server.uri())),
            Source::new("Shelbyville", format!("{}/shelbyville/", server.uri())),
        ],
    )
    .await;

    assert_eq!(report.sources_total, 4);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].source_name, "Capital City");
    assert_eq!(report.failures[0].error, FetchError::Status(503));
    assert_eq!(report.failures[1].source_name, "Ogdenville");
    assert_eq!(report.failures[1].error.kind(), "not_html");

    let found: Vec<(&str, String)> = report
        .postings
        .iter()
        .map(|p| (p.source_name.as_str(), p.url.clone()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("Springfield", format!("{}/job/1", server.uri())),
            ("Shelbyville", format!("{}/shelbyville/apply/7", server.uri())),
        ]
    );
    assert!(report.summary().contains("2 failed: Capital City, Ogdenville"));
}

#[tokio::test]
async fn request_delay_does_not_time_out_answered_sources() {
    let server = MockServer::start().await;
    serve(&server, "/a", r#"<a href="/a/1">IT Analyst</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<a href="/b/1">IT Analyst</a>"#, "text/html")
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let crawler = CrawlerConfig {
        timeout_secs: 1,
        max_concurrent: 2,
        request_delay_ms: 1500,
        ..CrawlerConfig::default()
    };
    let report = run(
        &crawler,
        keywords(&["IT Analyst"]),
        vec![
            Source::new("A", format!("{}/a", server.uri())),
            Source::new("B", format!("{}/b", server.uri())),
        ],
    )
    .await;

    assert!(report.failures.is_empty(), "{:?}", report.failures);
    let sources: Vec<&str> = report.postings.iter().map(|p| p.source_name.as_str()).collect();
    assert_eq!(sources, vec!["A", "B"]);
}

#[tokio::test]
async fn slow_source_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(SPRINGFIELD_PAGE, "text/html")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    serve(&server, "/fast", SPRINGFIELD_PAGE).await;

    let crawler = CrawlerConfig {
        timeout_secs: 1,
        ..CrawlerConfig::default()
    };
    let report = run(
        &crawler,
        keywords(&["IT Analyst"]),
        vec![
            Source::new("Slowtown", format!("{}/slow", server.uri())),
            Source::new("Springfield", format!("{}/fast", server.uri())),
        ],
    )
    .await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].error.kind(), "timeout");
    assert_eq!(report.postings.len(), 1);
    assert_eq!(report.postings[0].source_name, "Springfield");
}

#[tokio::test]
async fn empty_keyword_set_returns_config_error() {
    let server = MockServer::start().await;
    serve(&server, "/jobs", SPRINGFIELD_PAGE).await;

    let report = run(
        &CrawlerConfig::default(),
        Vec::new(),
        vec![Source::new("Springfield", format!("{}/jobs", server.uri()))],
    )
    .await;

    assert_eq!(report.config_error(), Some(&ConfigError::NoKeywordsConfigured));
    assert!(report.postings.is_empty());
    assert!(report.failures.is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn file_backed_run_writes_exports() {
    let server = MockServer::start().await;
    serve(&server, "/jobs", SPRINGFIELD_PAGE).await;

    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    KeywordFile::new(config.paths.keywords_path(dir.path()))
        .add("IT Analyst")
        .unwrap();
    SourceFile::new(config.paths.sources_path(dir.path()))
        .add("Springfield", &format!("{}/jobs", server.uri()))
        .unwrap();

    let report = run_with_config(&config, dir.path()).await.unwrap();
    assert_eq!(report.postings.len(), 1);

    let storage = LocalStorage::new(config.paths.output_path(dir.path()), &config.output);
    storage.write_report(&report).await.unwrap();

    let csv = std::fs::read_to_string(dir.path().join("output/jobs.csv")).unwrap();
    assert!(csv.starts_with("source,title,url\r\n"));
    assert!(csv.contains("Springfield,Senior IT Analyst,"));

    let snapshot = storage.load_snapshot().await.unwrap().unwrap();
    assert_eq!(snapshot.count, 1);
    assert_eq!(snapshot.postings[0].posting.title, "Senior IT Analyst");
}

#[tokio::test]
async fn file_backed_run_without_sources_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    KeywordFile::new(config.paths.keywords_path(dir.path()))
        .add("IT Analyst")
        .unwrap();

    let report = run_with_config(&config, dir.path()).await.unwrap();
    assert_eq!(report.config_error(), Some(&ConfigError::NoSourcesConfigured));
}
