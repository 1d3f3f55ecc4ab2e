use crate::config::types::{Config, ExtractionConfig, ListingConfig, ProviderConfig};
use crate::crawler::HARD_WORKER_CAP;
use crate::ConfigError;
use url::Url;

/// Upper bound for the post-scroll settle pause
const MAX_SETTLE_MILLIS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_listing_config(&config.listing)?;
    validate_extraction_config(&config.extraction)?;
    validate_provider_config(&config.provider)?;
    Ok(())
}

/// Validates listing configuration
fn validate_listing_config(config: &ListingConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing url '{}': {}", config.url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Listing url '{}' must use http or https",
            config.url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Listing url '{}' has no host",
            config.url
        )));
    }

    validate_article_path(&config.article_path)?;

    if config.ready_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "ready_timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.settle_millis > MAX_SETTLE_MILLIS {
        return Err(ConfigError::Validation(format!(
            "settle_millis must be <= {}ms, got {}ms",
            MAX_SETTLE_MILLIS, config.settle_millis
        )));
    }

    Ok(())
}

/// The article path is a single literal segment
fn validate_article_path(path: &str) -> Result<(), ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::Validation(
            "article_path cannot be empty".to_string(),
        ));
    }

    if !path
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "article_path must be a single path segment, got '{}'",
            path
        )));
    }

    Ok(())
}

/// Validates extraction configuration
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 || config.max_workers > HARD_WORKER_CAP {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and {}, got {}",
            HARD_WORKER_CAP, config.max_workers
        )));
    }

    if config.container_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "container_timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.task_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "task_timeout_secs must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates provider configuration
fn validate_provider_config(config: &ProviderConfig) -> Result<(), ConfigError> {
    if config.page_load_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "page_load_timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
