//! URL Utility Functions
//!
//! Filtering of non-navigable hrefs and resolution of relative hrefs
//! against the page URL.

use url::Url;

/// Whether `s` is an absolute http(s) URL with a host.
#[must_use]
pub fn is_absolute_url(s: &str) -> bool {
    let s = s.trim();
    (s.starts_with("http://") || s.starts_with("https://")) && Url::parse(s).is_ok_and(|url| url.host().is_some())
}

/// Whether an href leads to another document.
///
/// Empty hrefs, fragment-only links (`#top`) and `javascript:` pseudo-links
/// do not.
#[must_use]
pub fn is_navigable_href(href: &str) -> bool {
    let href = href.trim();
    !href.is_empty()
        && !href.starts_with('#')
        && !href
            .get(..11)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
}

/// Convert a relative or absolute URL to absolute form.
///
/// # Arguments
/// * `url_str` - The URL to resolve (can be relative or absolute)
/// * `base` - The base URL for resolution
///
/// # Returns
/// * The absolute URL string, or the trimmed original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    // Preserve special URLs unchanged
    if url_str.starts_with("data:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    if is_absolute_url(url_str) {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Resolve `href` against an optional base.
#[must_use]
pub fn resolve_href(href: &str, base: Option<&Url>) -> String {
    match base {
        Some(base) => create_absolute_url(href, base),
        None => href.trim().to_string(),
    }
}
