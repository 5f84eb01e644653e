//! Href normalization: raw link values from the collaborator become
//! origin-relative logical paths, or are discarded.

use url::Url;

/// Resolve a raw href against the page it was found on and reduce it to an
/// origin-relative path.
///
/// Returns `None` for hrefs that leave the target origin, use non-navigable
/// schemes (`javascript:`, `mailto:`, `tel:`, ...), or fail to parse.
/// Fragments are dropped; query strings are kept since they distinguish
/// logical routes.
pub fn normalize_href(page_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = page_url.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    if !same_origin(page_url, &resolved) {
        return None;
    }

    Some(logical_path(&resolved))
}

/// The origin-relative logical path of a URL: path plus query, no fragment.
pub fn logical_path(url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme() && a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
