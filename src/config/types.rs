use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Newsline
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listing: ListingConfig,
    pub extraction: ExtractionConfig,
    pub provider: ProviderConfig,
}

/// Listing page discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ListingConfig {
    /// The news-listing page to crawl
    pub url: String,

    /// First path segment of article URLs (`/articles/<digits>`)
    pub article_path: String,

    /// Default time window, in hours, when the caller does not supply one
    pub hours_window: u32,

    /// How long to wait for the first article link to appear (seconds)
    pub ready_timeout_secs: u64,

    /// Pause after each scroll before re-measuring the page (milliseconds)
    pub settle_millis: u64,

    /// Emit the brace-wrapped list document instead of a JSON array
    pub legacy_envelope: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            url: "https://wallstreetcn.com/news/global".to_string(),
            article_path: "articles".to_string(),
            hours_window: 24,
            ready_timeout_secs: 10,
            settle_millis: 3000,
            legacy_envelope: false,
        }
    }
}

impl ListingConfig {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_millis)
    }
}

/// Article content extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExtractionConfig {
    /// Requested number of concurrent workers (capped at 5)
    pub max_workers: usize,

    /// How long to wait for the article container to appear (seconds)
    pub container_timeout_secs: u64,

    /// Upper bound for one URL's whole extraction (seconds)
    pub task_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_workers: 3,
            container_timeout_secs: 5,
            task_timeout_secs: 30,
        }
    }
}

impl ExtractionConfig {
    pub fn container_timeout(&self) -> Duration {
        Duration::from_secs(self.container_timeout_secs)
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }
}

/// Which document provider backs the sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Plain HTTP fetch; the document is the server-rendered HTML
    #[default]
    Http,
    /// Headless Chromium over CDP (requires the `browser` feature)
    Browser,
}

/// Document provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProviderConfig {
    pub kind: ProviderKind,

    /// Page load timeout (seconds)
    pub page_load_timeout_secs: u64,

    /// User agent sent with every page load
    pub user_agent: String,

    /// Run the browser without a window
    pub headless: bool,

    /// Extra Chromium command-line arguments
    pub chrome_args: Vec<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Http,
            page_load_timeout_secs: 20,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            headless: true,
            chrome_args: Vec::new(),
        }
    }
}

impl ProviderConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}
