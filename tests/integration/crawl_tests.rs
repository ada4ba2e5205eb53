//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use huntsman::config::{CrawlerConfig, FetchConfig};
use huntsman::crawler::{
    Coordinator, CrawlOutcome, Fetcher, Resource, ResourceKind, ResourceStatus, RetryFetcher,
    StaticFetcher,
};
use huntsman::output::{write_csv, CrawlStatistics};
use huntsman::EngineState;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler configuration for tests
fn create_test_config() -> CrawlerConfig {
    CrawlerConfig {
        concurrency: 4,
        frontier_capacity: 100,
        results_capacity: 100,
    }
}

fn create_fetch_config() -> FetchConfig {
    FetchConfig {
        timeout_secs: 5,
        user_agent: "HuntsmanTest/1.0".to_string(),
        ..FetchConfig::default()
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Runs a crawl to completion and returns the outcome and every resource
async fn run_crawl(fetcher: Arc<dyn Fetcher>, seed: &str) -> (CrawlOutcome, Vec<Resource>) {
    let coordinator = Coordinator::new(fetcher, &create_test_config());
    let results = coordinator.results().expect("result stream");
    let collector = tokio::spawn(results.collect());

    let outcome = tokio::time::timeout(
        Duration::from_secs(10),
        coordinator.start(&CancellationToken::new(), seed),
    )
    .await
    .expect("crawl should finish")
    .expect("crawl should start");

    assert_eq!(coordinator.state(), EngineState::Closed);
    (outcome, collector.await.unwrap())
}

fn find<'a>(resources: &'a [Resource], url: &str) -> &'a Resource {
    resources
        .iter()
        .find(|r| r.url == url)
        .unwrap_or_else(|| panic!("no resource for {}", url))
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(
        &server,
        "/",
        html(r#"
            <link rel="stylesheet" href="/site.css">
            <a href="/about">About</a>
            <a href="/blog/">Blog</a>
            <img src="/logo.png">
        "#),
    )
    .await;
    mount(&server, "/about", html(r#"<a href="/">Home</a>"#)).await;
    mount(
        &server,
        "/blog/",
        html(r#"<a href="post-1">Post</a><a href="/about#team">Team</a>"#),
    )
    .await;
    mount(&server, "/blog/post-1", html("<p>Hello</p>")).await;
    mount(
        &server,
        "/site.css",
        ResponseTemplate::new(200).set_body_raw("body { color: red; }", "text/css"),
    )
    .await;
    mount(
        &server,
        "/logo.png",
        ResponseTemplate::new(200).set_body_raw(vec![0u8; 2048], "image/png"),
    )
    .await;

    let fetcher = Arc::new(StaticFetcher::new(&create_fetch_config()).unwrap());
    let (outcome, resources) = run_crawl(fetcher, &format!("{}/", base)).await;

    assert_eq!(outcome, CrawlOutcome::Completed);
    assert_eq!(resources.len(), 6);

    assert_eq!(find(&resources, &format!("{}/", base)).kind, ResourceKind::Document);
    assert_eq!(
        find(&resources, &format!("{}/site.css", base)).kind,
        ResourceKind::Stylesheet
    );
    let logo = find(&resources, &format!("{}/logo.png", base));
    assert_eq!(logo.kind, ResourceKind::Png);
    assert_eq!(logo.size, 2048);
    assert!(logo.links.is_empty());

    let post = find(&resources, &format!("{}/blog/post-1", base));
    assert_eq!(post.status, ResourceStatus::Http(200));
}

#[tokio::test]
async fn test_crawl_stays_on_seed_host() {
    let server = MockServer::start().await;
    let base = server.uri();
    let port = url::Url::parse(&base).unwrap().port().unwrap();
    // Same server, different host string: out of scope
    let foreign = format!("http://localhost:{}/elsewhere", port);

    mount(
        &server,
        "/",
        html(&format!(
            r#"<a href="/a">A</a><a href="/b">B</a><a href="{}">Elsewhere</a>"#,
            foreign
        )),
    )
    .await;
    mount(&server, "/a", html("")).await;
    mount(&server, "/b", html("")).await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(html(""))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = Arc::new(StaticFetcher::new(&create_fetch_config()).unwrap());
    let (_, resources) = run_crawl(fetcher, &format!("{}/", base)).await;

    assert_eq!(resources.len(), 3);
    let seed = find(&resources, &format!("{}/", base));
    assert!(seed.links.contains(&foreign));
}

#[tokio::test]
async fn test_http_errors_are_reported_not_fatal() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(
        &server,
        "/",
        html(r#"<a href="/missing">Missing</a><a href="/broken">Broken</a><a href="/ok">Ok</a>"#),
    )
    .await;
    mount(&server, "/missing", ResponseTemplate::new(404)).await;
    mount(&server, "/broken", ResponseTemplate::new(500)).await;
    mount(&server, "/ok", html("")).await;

    let fetcher = Arc::new(RetryFetcher::new(
        StaticFetcher::new(&create_fetch_config()).unwrap(),
        3,
        Duration::from_millis(10),
    ));
    let (outcome, resources) = run_crawl(fetcher, &format!("{}/", base)).await;

    assert_eq!(outcome, CrawlOutcome::Completed);
    assert_eq!(resources.len(), 4);
    assert_eq!(
        find(&resources, &format!("{}/missing", base)).status,
        ResourceStatus::Http(404)
    );
    assert_eq!(
        find(&resources, &format!("{}/broken", base)).status,
        ResourceStatus::Http(500)
    );
}

#[tokio::test]
async fn test_unreachable_seed_is_reported_once() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = Arc::new(RetryFetcher::new(
        StaticFetcher::new(&create_fetch_config()).unwrap(),
        2,
        Duration::from_millis(10),
    ));
    let (outcome, resources) = run_crawl(fetcher, &format!("http://{}/", addr)).await;

    assert_eq!(outcome, CrawlOutcome::Completed);
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].status, ResourceStatus::Error);
    assert_eq!(resources[0].kind, ResourceKind::NotApplicable);
}

#[tokio::test]
async fn test_stop_drains_slow_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: String = (0..20)
        .map(|i| format!(r#"<a href="/slow/{}">{}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&links))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(html("").set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let fetcher = Arc::new(StaticFetcher::new(&create_fetch_config()).unwrap());
    let coordinator = Arc::new(Coordinator::new(fetcher, &create_test_config()));
    let collector = tokio::spawn(coordinator.results().unwrap().collect());

    let stopper = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            coordinator.stop();
        })
    };

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        coordinator.start(&CancellationToken::new(), &format!("{}/", base)),
    )
    .await
    .expect("stop should end the crawl promptly")
    .unwrap();
    stopper.await.unwrap();

    assert_eq!(outcome, CrawlOutcome::Cancelled);
    let resources = collector.await.unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].url, format!("{}/", base));
}

#[tokio::test]
async fn test_crawl_export_and_statistics() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount(&server, "/", html(r#"<a href="/page">Page</a><script src="/app.js"></script>"#)).await;
    mount(&server, "/page", html("")).await;
    mount(
        &server,
        "/app.js",
        ResponseTemplate::new(200).set_body_raw("console.log(1);", "application/javascript"),
    )
    .await;

    let fetcher = Arc::new(StaticFetcher::new(&create_fetch_config()).unwrap());
    let (_, resources) = run_crawl(fetcher, &format!("{}/", base)).await;

    let stats = CrawlStatistics::from_resources(&resources);
    assert_eq!(stats.total_resources, 3);
    assert_eq!(stats.by_kind[&ResourceKind::Document], 2);
    assert_eq!(stats.by_kind[&ResourceKind::Script], 1);
    assert_eq!(stats.failures, 0);

    let dir = tempfile::TempDir::new().unwrap();
    let export = dir.path().join("crawl.csv");
    write_csv(&export, &resources).unwrap();

    let content = std::fs::read_to_string(&export).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("URL,Status,Type,Size"));
    assert_eq!(lines.count(), 3);
    assert!(content.contains(&format!("{}/app.js,200,script,", base)));
}
