//! Shared fixtures for the integration tests

use chrono::{DateTime, Utc};
use newsline_crawler::config::Config;
use newsline_crawler::provider::{DocumentProvider, HttpProvider};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at `listing_url`, with short waits
pub fn create_test_config(listing_url: &str) -> Config {
    let mut config = Config::default();
    config.listing.url = listing_url.to_string();
    config.listing.ready_timeout_secs = 1;
    config.listing.settle_millis = 10;
    config.provider.page_load_timeout_secs = 2;
    config.extraction.container_timeout_secs = 1;
    config.extraction.task_timeout_secs = 5;
    config
}

pub fn http_provider(config: &Config) -> Arc<dyn DocumentProvider> {
    Arc::new(HttpProvider::new(config.provider.clone()))
}

/// Serves `body` as HTML at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// A listing item with an optional machine-readable publication time
pub fn listing_item(href: &str, title: &str, published: Option<DateTime<Utc>>) -> String {
    let time = published
        .map(|at| format!(r#"<time datetime="{}">{}</time>"#, at.to_rfc3339(), at.format("%H:%M")))
        .unwrap_or_default();
    format!(r#"<li class="news-item"><a href="{}">{}</a>{}</li>"#, href, title, time)
}

/// Wraps each item in its own list, so items never share a parent
pub fn listing_page(items: &[String]) -> String {
    let lists: Vec<String> = items.iter().map(|item| format!("<ul>{}</ul>", item)).collect();
    format!(
        "<html><head><title>Latest</title></head><body>{}</body></html>",
        lists.join("\n")
    )
}

pub fn article_page(title: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{}</p>", p)).collect();
    format!(
        r#"<html><body><nav>Menu</nav><article><h1>{}</h1>
        <time datetime="2025-04-22T21:22:54.000+08:00">April 22</time>
        {}<div class="social-share">Share</div></article></body></html>"#,
        title, body
    )
}
