//! Image URL resolution for catalog records.
//!
//! The backend stores image references inconsistently: absolute CDN URLs,
//! API-relative paths, bare upload filenames, Windows paths from the admin
//! machine, and paths whose prefix was prepended more than once by earlier
//! client-side fix-ups (`/api/admin/products/api/admin/products/a.jpg`).
//! [`ImageUrlResolver::resolve`] turns any of these into one absolute URL, or
//! the placeholder, and is idempotent.

use std::sync::LazyLock;

use regex::Regex;

/// Served by the storefront itself; shown when a product has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "/assets/images/no_image.png";

/// Directory the admin upload endpoint serves product images from.
const PRODUCT_IMAGES_PREFIX: &str = "/admin/products/images/";

static ABSOLUTE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:https?:)?//").expect("valid regex"));
static DATA_URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^data:").expect("valid regex"));
static BARE_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/]+\.[a-zA-Z0-9]+$").expect("valid regex"));

/// Path prefixes known to be duplicated by the backend. A run of two or more
/// consecutive copies collapses to one, but only when the run ends on a
/// segment boundary (`/uploads/uploads-2024/` is left alone).
static REPEATED_SEGMENT_RES: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"/api/admin/products(?:/api/admin/products)+(/|$)").expect("valid regex"),
            "/api/admin/products${1}",
        ),
        (
            Regex::new(r"/api/uploads(?:/api/uploads)+(/|$)").expect("valid regex"),
            "/api/uploads${1}",
        ),
        (
            Regex::new(r"/uploads(?:/uploads)+(/|$)").expect("valid regex"),
            "/uploads${1}",
        ),
        (
            Regex::new(r"/admin/products/images(?:/admin/products/images)+(/|$)")
                .expect("valid regex"),
            "/admin/products/images${1}",
        ),
    ]
});

/// Resolves raw image references against the catalog API origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlResolver {
    api_base: String,
}

impl ImageUrlResolver {
    /// `api_base` is the backend origin, e.g. `"http://localhost:8080"`.
    /// Trailing slashes are ignored; an empty base yields origin-relative URLs.
    #[must_use]
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &parampare_core::AppConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Turns any stored image reference into a displayable URL. Never empty.
    #[must_use]
    pub fn resolve(&self, input: Option<&str>) -> String {
        let Some(url) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return PLACEHOLDER_IMAGE.to_string();
        };

        if url == PLACEHOLDER_IMAGE || ABSOLUTE_URL_RE.is_match(url) || DATA_URI_RE.is_match(url)
        {
            return url.to_string();
        }

        let mut url = collapse_repeated_segments(url);

        if url.contains('\\') {
            let filename = url.rsplit(['\\', '/']).next().unwrap_or_default();
            if filename.is_empty() {
                tracing::debug!(input = %url, "OS path has no filename; using placeholder");
                return PLACEHOLDER_IMAGE.to_string();
            }
            url = filename.to_string();
        }

        if BARE_FILENAME_RE.is_match(&url) {
            url = format!("{PRODUCT_IMAGES_PREFIX}{url}");
        }

        // Prefixing `/api` can complete a run that was split at the start
        // of a relative path, so the assembled path is collapsed again.
        let path = collapse_repeated_segments(&origin_path(&url));
        format!("{}{path}", self.api_base)
    }
}

/// Path below the API base: `/admin/...` and relative paths live under `/api`.
fn origin_path(path: &str) -> String {
    if path.starts_with("/admin/") {
        format!("/api{path}")
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/api/{path}")
    }
}

/// Collapses duplicated known prefixes until nothing changes.
///
/// Iterating to a fixpoint keeps the result stable when collapsing one
/// pattern exposes a run of another.
fn collapse_repeated_segments(path: &str) -> String {
    let mut current = path.to_string();
    loop {
        let mut next = current.clone();
        for (re, replacement) in &*REPEATED_SEGMENT_RES {
            next = re.replace_all(&next, *replacement).into_owned();
        }
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;
