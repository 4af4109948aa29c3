//! URL helper functions

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::SiteConfig;

lazy_static! {
    static ref LIQUID_SITE_VAR: Regex = Regex::new(r"\{\{\s*site\.(baseurl|url)\s*\}\}").unwrap();
}

/// Generate a URL under the site base URL
///
/// # Examples
/// ```ignore
/// url_for(&config, "/img/tree.png") // -> "/react-notes/img/tree.png"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.baseurl.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.github.io/react-notes/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// Whether `src` points off-site or carries its own data
pub fn is_absolute_url(src: &str) -> bool {
    let lower = src.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
}

/// Substitute `{{ site.baseurl }}` and `{{ site.url }}` placeholders
pub fn expand_site_vars(config: &SiteConfig, src: &str) -> String {
    LIQUID_SITE_VAR
        .replace_all(src, |caps: &Captures| match &caps[1] {
            "baseurl" => config.baseurl.trim_end_matches('/').to_string(),
            _ => config.url.trim_end_matches('/').to_string(),
        })
        .into_owned()
}

/// Resolve an image reference from a post body to the URL a browser requests
///
/// # Examples
/// ```ignore
/// resolve_asset(&config, "{{ site.baseurl }}/img/a.png") // -> "/react-notes/img/a.png"
/// resolve_asset(&config, "img/a.png")                    // -> "/react-notes/img/a.png"
/// ```
pub fn resolve_asset(config: &SiteConfig, src: &str) -> String {
    let src = src.trim();
    let expanded = expand_site_vars(config, src);
    if is_absolute_url(&expanded) {
        return expanded;
    }
    // A substituted placeholder already carries the base URL
    if expanded != src && expanded.starts_with('/') {
        return expanded;
    }
    url_for(config, &expanded)
}

/// Site-relative path of a local asset, or `None` for off-site references
///
/// # Examples
/// ```ignore
/// asset_path(&config, "{{ site.baseurl }}/img/a.png?v=2") // -> Some("img/a.png")
/// ```
pub fn asset_path(config: &SiteConfig, src: &str) -> Option<String> {
    let resolved = resolve_asset(config, src);
    if is_absolute_url(&resolved) {
        return None;
    }
    let base = config.baseurl.trim_end_matches('/');
    let path = match resolved.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '?', '#']) => rest,
        _ => resolved.as_str(),
    };
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}
