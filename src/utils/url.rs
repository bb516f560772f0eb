// src/utils/url.rs

//! Link resolution against a source's base URL.

use url::Url;

/// Resolve an `href` against a base URL.
///
/// Hrefs that already carry a scheme come back unchanged (after trimming).
/// Everything else goes through RFC 3986 reference resolution. This never
/// fails: if the base cannot be parsed the two are joined as strings, and an
/// href the resolver rejects is returned as-is.
///
/// # Examples
/// ```
/// use job_tracker::utils::url::resolve;
///
/// assert_eq!(
///     resolve("http://example.test/jobs", "/job/1"),
///     "http://example.test/job/1"
/// );
/// ```
pub fn resolve(base: &str, href: &str) -> String {
    let href = href.trim();

    if has_scheme(href) {
        return href.to_string();
    }

    match Url::parse(base.trim()) {
        Ok(base_url) => resolve_url(&base_url, href),
        Err(_) => join_path(base, href),
    }
}

/// Resolve an `href` against an already parsed base.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Whether an href points at nothing a reader could open.
///
/// Empty hrefs, fragment-only hrefs and non-http schemes such as
/// `javascript:` or `mailto:` count as unusable.
pub fn is_unusable_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return true;
    }
    if has_scheme(href) {
        let lower = href.to_ascii_lowercase();
        return !(lower.starts_with("http:") || lower.starts_with("https:"));
    }
    false
}

/// `scheme ":"` prefix check, `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn has_scheme(href: &str) -> bool {
    let Some(colon) = href.find(':') else {
        return false;
    };
    let scheme = &href[..colon];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Plain string join used when the base is not a parseable URL.
fn join_path(base: &str, href: &str) -> String {
    let base = base.trim();
    if href.is_empty() {
        return base.to_string();
    }
    if href.starts_with('#') || href.starts_with('?') {
        return format!("{base}{href}");
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://example.test/jobs";

    #[test]
    fn test_resolve_absolute_url_unchanged() {
        for href in [
            "https://other.test/page",
            "http://Example.TEST",
            "HTTPS://example.test/a/../b",
            "javascript:void(0)",
            "mailto:hr@example.test",
        ] {
            assert_eq!(resolve(BASE, href), href);
        }
    }

    #[test]
    fn test_resolve_absolute_path() {
        assert_eq!(resolve(BASE, "/job/1"), "http://example.test/job/1");
        assert_eq!(
            resolve("https://example.com/path/index.html", "/root.html"),
            "https://example.com/root.html"
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve("https://example.com/path/", "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve("https://example.com/path/index.html", "other.html"),
            "https://example.com/path/other.html"
        );
        assert_eq!(
            resolve("https://example.com/a/b/c", "../x"),
            "https://example.com/a/x"
        );
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            resolve("https://example.test/jobs", "//cdn.example.test/post/9"),
            "https://cdn.example.test/post/9"
        );
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        assert_eq!(resolve(BASE, "  /job/3 \n"), "http://example.test/job/3");
    }

    #[test]
    fn test_resolve_empty_and_fragment_stay_on_base() {
        assert_eq!(resolve(BASE, ""), BASE);
        assert!(resolve(BASE, "#").starts_with(BASE));
        assert!(resolve(BASE, "#top").ends_with("#top"));
    }

    #[test]
    fn test_resolve_unparseable_base_joins_strings() {
        assert_eq!(resolve("example.test/jobs/", "/job/1"), "example.test/jobs/job/1");
        assert_eq!(resolve("example.test/jobs", "job/1"), "example.test/jobs/job/1");
        assert_eq!(resolve("example.test/jobs", ""), "example.test/jobs");
    }

    #[test]
    fn test_unusable_hrefs() {
        assert!(is_unusable_href(""));
        assert!(is_unusable_href("  "));
        assert!(is_unusable_href("#"));
        assert!(is_unusable_href("javascript:void(0)"));
        assert!(is_unusable_href("mailto:hr@example.test"));
        assert!(!is_unusable_href("/job/1"));
        assert!(!is_unusable_href("job/1"));
        assert!(!is_unusable_href("HTTPS://example.test/job"));
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://x"));
        assert!(has_scheme("svn+ssh://x"));
        assert!(!has_scheme("/path:with-colon"));
        assert!(!has_scheme("job?at=10:30"));
        assert!(!has_scheme("1abc:foo"));
    }
}
