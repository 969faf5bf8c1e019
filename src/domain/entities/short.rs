//! Short record entity: a redirect token and the URL components it points to.

/// A persisted short link.
///
/// `path`, `query` and `fragment` use `None` for "absent". An empty string is
/// never stored; [`ShortRecord::new`] collapses it to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortRecord {
    pub redirect_path: String,
    pub scheme: String,
    pub host: String,
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl ShortRecord {
    /// Creates a new ShortRecord, treating empty optional components as absent.
    pub fn new(
        redirect_path: impl Into<String>,
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: Option<String>,
        query: Option<String>,
        fragment: Option<String>,
    ) -> Self {
        Self {
            redirect_path: redirect_path.into(),
            scheme: scheme.into(),
            host: host.into(),
            path: non_empty(path),
            query: non_empty(query),
            fragment: non_empty(fragment),
        }
    }

    /// Reassembles the canonical URL this record redirects to.
    pub fn raw_url(&self) -> String {
        canonical_url(
            &self.scheme,
            &self.host,
            self.path.as_deref().unwrap_or_default(),
            self.query.as_deref().unwrap_or_default(),
            self.fragment.as_deref().unwrap_or_default(),
        )
    }
}

/// Builds `scheme://host[path][?query][#fragment]`.
///
/// Each delimiter is written only when its component is non-empty, so a URL
/// with no optional parts is exactly `scheme://host`.
pub fn canonical_url(scheme: &str, host: &str, path: &str, query: &str, fragment: &str) -> String {
    let mut url = format!("{scheme}://{host}");

    if !path.is_empty() {
        url.push_str(path);
    }

    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }

    if !fragment.is_empty() {
        url.push('#');
        url.push_str(fragment);
    }

    url
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
