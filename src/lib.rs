//! Newsline: a news-listing crawler and article text extractor
//!
//! This crate discovers recently published article links on a news-listing
//! page and extracts the cleaned text of individual articles, either one at a
//! time or across a bounded pool of isolated document sessions.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod models;
pub mod output;
pub mod provider;
pub mod tools;
pub mod url;

use std::time::Duration;
use thiserror::Error;

/// Main error type for Newsline operations
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Document provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by a document provider or one of its sessions
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Timed out after {timeout:?} loading {url}")]
    LoadTimeout { url: String, timeout: Duration },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Failed to start session: {0}")]
    Launch(String),

    #[error("Page script failed: {0}")]
    Script(String),

    #[error("No document loaded in this session")]
    NoDocument,
}

/// Errors raised while extracting links or article content
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Extraction exceeded the {timeout:?} task timeout")]
    TaskTimeout { timeout: Duration },
}

/// Result type alias for Newsline operations
pub type Result<T> = std::result::Result<T, NewsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for document provider operations
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ExtractionCoordinator, ListCrawler};
pub use models::{ArticleRecord, ListEntry};
pub use provider::{DocumentProvider, Session};
pub use tools::NewsTools;
