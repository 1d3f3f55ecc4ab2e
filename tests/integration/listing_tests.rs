//! Listing crawl tests over HTTP

use crate::common::{create_test_config, http_provider, listing_item, listing_page, mount_page};
use chrono::{Duration, Utc};
use newsline_crawler::crawler::ListCrawler;
use wiremock::MockServer;

#[tokio::test]
async fn test_listing_keeps_recent_and_undated_articles() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let now = Utc::now();

    mount_page(
        &mock_server,
        "/news/global",
        listing_page(&[
            listing_item("/articles/102", "Stale story", Some(now - Duration::hours(3))),
            listing_item("/articles/101", "Fresh story", Some(now - Duration::hours(1))),
            listing_item("/articles/103", "Undated story", None),
            listing_item("/about", "About us", None),
            listing_item("/articles/104/comments", "Comments", None),
        ]),
    )
    .await;

    let listing_url = format!("{}/news/global", base_url);
    let config = create_test_config(&listing_url);
    let crawler = ListCrawler::new(http_provider(&config), &config);

    let entries = crawler.crawl(&listing_url, 2).await.expect("crawl failed");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, 1);
    assert_eq!(entries[0].title, "Fresh story");
    assert_eq!(entries[0].url, format!("{}/articles/101", base_url));
    assert_eq!(entries[1].id, 2);
    assert_eq!(entries[1].title, "Undated story");
    assert_eq!(entries[1].url, format!("{}/articles/103", base_url));
}

#[tokio::test]
async fn test_ids_are_contiguous_in_document_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let now = Utc::now();

    let items: Vec<String> = (1..=6)
        .map(|i| {
            listing_item(
                &format!("/articles/{}", 200 + i),
                &format!("Story {}", i),
                Some(now - Duration::minutes(10 * i)),
            )
        })
        .collect();
    mount_page(&mock_server, "/news/global", listing_page(&items)).await;

    let listing_url = format!("{}/news/global", base_url);
    let config = create_test_config(&listing_url);
    let entries = ListCrawler::new(http_provider(&config), &config)
        .crawl(&listing_url, 24)
        .await
        .expect("crawl failed");

    let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(entries[5].title, "Story 6");
}

#[tokio::test]
async fn test_listing_without_articles_is_empty() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/news/global",
        listing_page(&[listing_item("/about", "About us", None)]),
    )
    .await;

    let listing_url = format!("{}/news/global", mock_server.uri());
    let config = create_test_config(&listing_url);
    let entries = ListCrawler::new(http_provider(&config), &config)
        .crawl(&listing_url, 24)
        .await
        .expect("crawl failed");

    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_missing_listing_page_is_empty_not_error() {
    let mock_server = MockServer::start().await;

    let listing_url = format!("{}/news/global", mock_server.uri());
    let config = create_test_config(&listing_url);
    let entries = ListCrawler::new(http_provider(&config), &config)
        .crawl(&listing_url, 24)
        .await
        .expect("crawl failed");

    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_invalid_listing_url_is_an_error() {
    let config = create_test_config("https://news.example.com/news/global");
    let result = ListCrawler::new(http_provider(&config), &config)
        .crawl("not a url", 24)
        .await;

    assert!(result.is_err());
}
