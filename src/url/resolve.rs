use url::Url;

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use newsline_crawler::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/news/global").unwrap();
/// let resolved = resolve_link("/articles/12", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/articles/12");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Returns the last non-empty segment of a URL path
///
/// Used to synthesize a title for links that carry no text.
pub fn last_path_segment(url: &Url) -> &str {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/news/global").unwrap()
    }

    #[test]
    fn test_resolve_absolute_link() {
        let resolved = resolve_link("https://other.com/articles/1", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://other.com/articles/1");
    }

    #[test]
    fn test_resolve_root_relative_link() {
        let resolved = resolve_link("/articles/1", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/articles/1");
    }

    #[test]
    fn test_resolve_path_relative_link() {
        let resolved = resolve_link("other", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/news/other");
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let resolved = resolve_link("  /articles/5 \n", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/articles/5");
    }

    #[test]
    fn test_skip_special_schemes() {
        assert!(resolve_link("javascript:void(0)", &base_url()).is_none());
        assert!(resolve_link("mailto:desk@example.com", &base_url()).is_none());
        assert!(resolve_link("tel:+1234567890", &base_url()).is_none());
        assert!(resolve_link("data:text/html,<h1>x</h1>", &base_url()).is_none());
        assert!(resolve_link("ftp://example.com/file", &base_url()).is_none());
    }

    #[test]
    fn test_skip_fragment_and_empty() {
        assert!(resolve_link("#top", &base_url()).is_none());
        assert!(resolve_link("   ", &base_url()).is_none());
    }

    #[test]
    fn test_last_path_segment() {
        let url = Url::parse("https://example.com/articles/3745696").unwrap();
        assert_eq!(last_path_segment(&url), "3745696");

        let url = Url::parse("https://example.com/articles/12/").unwrap();
        assert_eq!(last_path_segment(&url), "12");

        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(last_path_segment(&url), "");
    }
}
