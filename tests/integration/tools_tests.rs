//! Tool surface tests

use crate::common::{article_page, create_test_config, http_provider, listing_item, listing_page, mount_page};
use newsline_crawler::{ArticleRecord, ListEntry, NewsTools};
use wiremock::MockServer;

#[tokio::test]
async fn test_list_recent_entries_returns_json_array() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/news/global",
        listing_page(&[
            listing_item("/articles/1", "First", None),
            listing_item("/articles/2", "Second", None),
        ]),
    )
    .await;

    let config = create_test_config(&format!("{}/news/global", mock_server.uri()));
    let tools = NewsTools::new(http_provider(&config), config);

    let json = tools.list_recent_entries(Some(24)).await.unwrap();
    let entries: Vec<ListEntry> = serde_json::from_str(&json).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].id, 2);
    assert_eq!(entries[1].title, "Second");
}

#[tokio::test]
async fn test_list_recent_entries_legacy_empty() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/news/global", listing_page(&[])).await;

    let mut config = create_test_config(&format!("{}/news/global", mock_server.uri()));
    config.listing.legacy_envelope = true;
    let tools = NewsTools::new(http_provider(&config), config);

    assert_eq!(tools.list_recent_entries(None).await.unwrap(), "{}");
}

#[tokio::test]
async fn test_extract_content_batch_returns_one_document_per_url() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/articles/1", article_page("One", &["First body."])).await;
    mount_page(&mock_server, "/articles/2", article_page("Two", &["Second body."])).await;

    let config = create_test_config(&format!("{}/news/global", mock_server.uri()));
    let tools = NewsTools::new(http_provider(&config), config);
    let urls = vec![
        format!("{}/articles/1", mock_server.uri()),
        format!("{}/articles/2", mock_server.uri()),
    ];

    let documents = tools.extract_content_batch(&urls).await.unwrap();
    assert_eq!(documents.len(), 2);

    let mut titles: Vec<String> = documents
        .iter()
        .map(|json| serde_json::from_str::<ArticleRecord>(json).unwrap().title)
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["One", "Two"]);
}
