//! Article extraction tests over HTTP

use crate::common::{article_page, create_test_config, http_provider, mount_page};
use newsline_crawler::crawler::ExtractionCoordinator;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_extract_single_article() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/articles/1",
        article_page("Central bank holds", &["Rates were unchanged.", "Markets rose."]),
    )
    .await;

    let url = format!("{}/articles/1", mock_server.uri());
    let config = create_test_config(&mock_server.uri());
    let coordinator = ExtractionCoordinator::new(http_provider(&config), &config).unwrap();

    let record = coordinator.extract_one(&url).await.unwrap();

    assert_eq!(record.title, "Central bank holds");
    assert_eq!(record.date, "2025-04-22T21:22:54.000+08:00");
    assert_eq!(record.content, "Rates were unchanged.\nMarkets rose.");
    assert_eq!(record.source_url, url);
    assert!(record.error.is_none());
}

#[tokio::test]
async fn test_page_without_container_has_empty_content() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/articles/2",
        "<html><body><h1>Gallery</h1><div>Photos only</div></body></html>".to_string(),
    )
    .await;

    let url = format!("{}/articles/2", mock_server.uri());
    let config = create_test_config(&mock_server.uri());
    let coordinator = ExtractionCoordinator::new(http_provider(&config), &config).unwrap();

    let record = coordinator.extract_one(&url).await.unwrap();

    assert_eq!(record.title, "Gallery");
    assert!(record.content.is_empty());
    assert!(record.error.is_none());
    assert_eq!(record.source_url, url);
}

#[tokio::test]
async fn test_unreachable_url_returns_error_record() {
    let url = "http://127.0.0.1:1/articles/3";
    let config = create_test_config("http://127.0.0.1:1/news");
    let coordinator = ExtractionCoordinator::new(http_provider(&config), &config).unwrap();

    let start = Instant::now();
    let record = coordinator.extract_one(url).await.unwrap();

    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(record.error.is_some());
    assert!(record.title.is_empty());
    assert!(record.content.is_empty());
    assert_eq!(record.source_url, url);
}

#[tokio::test]
async fn test_slow_page_hits_load_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_page("Late", &["Too late."]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/articles/4", mock_server.uri());
    let config = create_test_config(&mock_server.uri());
    let coordinator = ExtractionCoordinator::new(http_provider(&config), &config).unwrap();

    let record = coordinator.extract_one(&url).await.unwrap();

    let error = record.error.expect("expected an error record");
    assert!(error.contains("Timed out"), "unexpected error: {}", error);
}

#[tokio::test]
async fn test_batch_of_five_with_three_workers() {
    let mock_server = MockServer::start().await;
    let mut urls = Vec::new();
    for i in 1..=5 {
        let route = format!("/articles/{}", 300 + i);
        mount_page(
            &mock_server,
            &route,
            article_page(&format!("Story {}", i), &["Body."]),
        )
        .await;
        urls.push(format!("{}{}", mock_server.uri(), route));
    }

    let config = create_test_config(&mock_server.uri());
    let coordinator = ExtractionCoordinator::new(http_provider(&config), &config).unwrap();

    let records = coordinator.extract_many(&urls, 3).await.unwrap();

    assert_eq!(records.len(), 5);
    let mut sources: Vec<_> = records.iter().map(|r| r.source_url.clone()).collect();
    sources.sort();
    let mut expected = urls.clone();
    expected.sort();
    assert_eq!(sources, expected);
    assert!(records.iter().all(|r| r.error.is_none()));
}

#[tokio::test]
async fn test_batch_with_missing_page_keeps_going() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/articles/1", article_page("One", &["Body."])).await;

    let urls = vec![
        format!("{}/articles/1", mock_server.uri()),
        format!("{}/articles/404", mock_server.uri()),
    ];
    let config = create_test_config(&mock_server.uri());
    let coordinator = ExtractionCoordinator::new(http_provider(&config), &config).unwrap();

    let records = coordinator.extract_many(&urls, 3).await.unwrap();

    assert_eq!(records.len(), 2);
    let failed = records
        .iter()
        .find(|r| r.source_url == urls[1])
        .expect("missing record for 404 page");
    assert!(failed.error.as_deref().unwrap_or_default().contains("404"));
}

#[tokio::test]
async fn test_empty_batch() {
    let config = create_test_config("https://news.example.com/news/global");
    let coordinator = ExtractionCoordinator::new(http_provider(&config), &config).unwrap();

    let records = coordinator.extract_many(&[], 3).await.unwrap();
    assert!(records.is_empty());
}
