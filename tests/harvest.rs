//! End-to-end harvest runs against mocked proxy list sites.

use proxy_harvester::{run, Config, CrawlerConfig, ProxyKind, ProxySource};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TABLE_PAGE: &str = r#"
<html><body>
<table class="table table-striped table-bordered">
  <thead>
    <tr><th>IP Address</th><th>Port</th><th>Code</th><th>Https</th></tr>
  </thead>
  <tbody>
    <tr><td>9.9.9.9</td><td>80</td><td>US</td><td>yes</td></tr>
    <tr><td>300.1.1.1</td><td>8080</td><td>FR</td><td>yes</td></tr>
    <tr><td>10.0.0.1</td><td>8080</td><td>DE</td><td>yes</td></tr>
  </tbody>
</table>
</body></html>
"#;

fn config(output: String, sources: Vec<ProxySource>, kind: ProxyKind) -> Config {
    Config {
        proxy_kind: kind,
        output,
        sources,
        crawler: CrawlerConfig::new().with_timeout(Duration::from_secs(1)),
    }
}

#[tokio::test]
async fn test_harvest_survives_timed_out_source() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/table"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TABLE_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("1.2.3.4:80")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("proxies.txt");
    let sources = vec![
        ProxySource::new(&format!("{}/table", server.uri())),
        ProxySource::new(&format!("{}/slow", server.uri())),
    ];

    let summary = run(&config(
        output.to_str().unwrap().to_string(),
        sources,
        ProxyKind::Https,
    ))
    .await
    .unwrap();

    assert_eq!(summary.total_scraped, 3);
    assert_eq!(summary.valid, 2);
    assert_eq!(summary.failed_sources, 1);
    assert_eq!(summary.added, 2);
    assert_eq!(summary.total, 2);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "10.0.0.1:8080\n9.9.9.9:80"
    );
}

#[tokio::test]
async fn test_harvest_merges_raw_list_into_existing_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw.githubusercontent.com/http.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("1.1.1.1:80\n2.2.2.2:3128\nbroken\n"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("proxies.txt");
    fs::write(&output, "1.1.1.1:80\n5.5.5.5:8080\n").unwrap();

    let sources = vec![
        ProxySource::new(&format!("{}/gone", server.uri())),
        ProxySource::new(&format!("{}/raw.githubusercontent.com/http.txt", server.uri())),
    ];
    let summary = run(&config(
        output.to_str().unwrap().to_string(),
        sources,
        ProxyKind::All,
    ))
    .await
    .unwrap();

    assert_eq!(summary.total_scraped, 2);
    assert_eq!(summary.valid, 2);
    assert_eq!(summary.failed_sources, 1);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "1.1.1.1:80\n2.2.2.2:3128\n5.5.5.5:8080"
    );
}

#[tokio::test]
async fn test_https_filter_drops_unflagged_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raw.githubusercontent.com/list.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1.1.1.1:80\n"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let sources = vec![ProxySource::new(&format!(
        "{}/raw.githubusercontent.com/list.txt",
        server.uri()
    ))];
    let summary = run(&config(
        dir.path().to_str().unwrap().to_string(),
        sources,
        ProxyKind::Https,
    ))
    .await
    .unwrap();

    // Text lists carry no https column, so nothing qualifies as https.
    assert_eq!(summary.total_scraped, 1);
    assert_eq!(summary.valid, 0);
    assert_eq!(summary.failed_sources, 0);
    assert!(summary.output.ends_with("proxies.txt"));
    assert_eq!(fs::read_to_string(&summary.output).unwrap(), "");
}
