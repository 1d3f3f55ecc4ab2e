use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Matcher for canonical article URLs
///
/// An article URL is `scheme://host[:port]/<article-path>/<digits>` where the
/// scheme, host and port are those of the listing page. Anything after the
/// numeric segment (a trailing slash, a query string, a fragment) disqualifies
/// the URL.
#[derive(Debug, Clone)]
pub struct ArticleUrlPattern {
    regex: Regex,
}

impl ArticleUrlPattern {
    /// Builds the pattern for articles linked from `listing`
    ///
    /// # Examples
    ///
    /// ```
    /// use newsline_crawler::url::ArticleUrlPattern;
    /// use url::Url;
    ///
    /// let listing = Url::parse("https://news.example.com/live").unwrap();
    /// let pattern = ArticleUrlPattern::for_listing(&listing, "articles").unwrap();
    ///
    /// assert!(pattern.matches("https://news.example.com/articles/3745696"));
    /// assert!(!pattern.matches("https://news.example.com/articles/3745696?ref=home"));
    /// assert!(!pattern.matches("https://other.example.com/articles/3745696"));
    /// ```
    pub fn for_listing(listing: &Url, article_path: &str) -> Result<Self, ConfigError> {
        if listing.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "Listing url '{}' has no host",
                listing
            )));
        }

        let origin = listing.origin().ascii_serialization();
        let source = format!(
            "^{}/{}/\\d+$",
            regex::escape(&origin),
            regex::escape(article_path)
        );

        let regex = Regex::new(&source)
            .map_err(|e| ConfigError::Validation(format!("Invalid article pattern: {}", e)))?;

        Ok(Self { regex })
    }

    /// Returns true if `url` is exactly a canonical article URL
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}
