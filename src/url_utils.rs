//! URL utility functions.
//!
//! Host extraction for link classification and the authority heuristic,
//! plus the normalisation key used to de-duplicate search candidates.

use url::Url;

/// Parse `s` as an absolute http(s) URL with a host.
#[must_use]
pub fn parse_absolute(s: &str) -> Option<Url> {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }
    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Extract the host (without port) from a URL.
///
/// # Returns
/// * The lower-cased host, or an empty string if the URL is not absolute
#[must_use]
pub fn host_of(url_str: &str) -> String {
    parse_absolute(url_str)
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_default()
}

/// Key under which two candidate URLs count as the same page.
///
/// Drops the fragment and a trailing slash on the path, lower-cases the
/// host. Unparseable input is returned trimmed.
#[must_use]
pub fn dedup_key(url_str: &str) -> String {
    let Some(mut url) = parse_absolute(url_str) else {
        return url_str.trim().to_string();
    };
    url.set_fragment(None);
    let mut key = url.to_string();
    if url.query().is_none() && key.ends_with('/') {
        key.pop();
    }
    key
}

/// Whether an `href` points at the page's own site.
///
/// An href is internal when it is root-relative or contains the page host.
/// Protocol-relative hrefs (`//host/path`) are not root-relative.
#[must_use]
pub fn is_internal_href(href: &str, page_host: &str) -> bool {
    let href = href.trim();
    let root_relative = href.starts_with('/') && !href.starts_with("//");
    root_relative || (!page_host.is_empty() && href.contains(page_host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_of_strips_port_and_lowercases() {
        assert_eq!(host_of("https://Example.COM:8443/path"), "example.com");
        assert_eq!(host_of("http://blog.example.com/a?b=c"), "blog.example.com");
    }

    #[test]
    fn host_of_rejects_relative_urls() {
        assert_eq!(host_of("/relative/path"), "");
        assert_eq!(host_of("mailto:someone@example.com"), "");
        assert_eq!(host_of(""), "");
    }

    #[test]
    fn dedup_key_ignores_fragment_and_trailing_slash() {
        assert_eq!(
            dedup_key("https://example.com/guide/#section-2"),
            dedup_key("https://example.com/guide")
        );
        assert_ne!(dedup_key("https://example.com/a?x=1"), dedup_key("https://example.com/a?x=2"));
    }

    #[test]
    fn internal_href_rules() {
        assert!(is_internal_href("/pricing", "example.com"));
        assert!(is_internal_href("https://example.com/blog", "example.com"));
        assert!(!is_internal_href("https://other.org/", "example.com"));
        assert!(!is_internal_href("#top", "example.com"));
        assert!(!is_internal_href("https://other.org/", ""));
    }

    #[test]
    fn protocol_relative_href_is_not_root_relative() {
        assert!(!is_internal_href("//cdn.other.net/x", "example.com"));
        assert!(is_internal_href("//example.com/img.png", "example.com"));
    }
}
