//! URL parsing and canonicalization.
//!
//! Turns user input such as `lucastephens.com/resume.pdf` into the components
//! a short record is built from.

use url::Url;

/// Scheme inserted when the input carries neither `http://` nor `https://`.
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// URL split into the components stored on a short record.
///
/// Optional parts use the empty string for "absent". `query` and `fragment`
/// never carry their leading `?` / `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

/// Parses and canonicalizes a raw URL string.
///
/// # Normalization Rules
///
/// 1. **Scheme**: `http://` is prepended unless the input starts with
///    `http://` or `https://`
/// 2. **Host**: Required; includes an explicit non-default port
/// 3. **Path**: Empty when the input has none, otherwise starts with `/`
/// 4. **Query / fragment**: Stored without delimiter, empty when absent
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidUrl`] if the input cannot be parsed
/// or has an empty host (`""`, `"http://"`, a bare path).
///
/// # Examples
///
/// ```ignore
/// let url = normalize_url("https://mail.google.com/mail/u/2/#inbox").unwrap();
/// assert_eq!(url.host, "mail.google.com");
/// assert_eq!(url.path, "/mail/u/2/");
/// assert_eq!(url.fragment, "inbox");
/// ```
pub fn normalize_url(input: &str) -> Result<NormalizedUrl, UrlNormalizationError> {
    let input = with_default_scheme(&strip_tabs_and_newlines(input));

    if authority(&input).is_empty() {
        return Err(UrlNormalizationError::InvalidUrl(format!(
            "missing host in '{input}'"
        )));
    }

    let url = Url::parse(&input).map_err(|e| UrlNormalizationError::InvalidUrl(e.to_string()))?;

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => {
            return Err(UrlNormalizationError::InvalidUrl(format!(
                "missing host in '{input}'"
            )));
        }
    };

    let host = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let path = if has_explicit_path(&input) {
        canonical_path(url.path())
    } else {
        String::new()
    };

    Ok(NormalizedUrl {
        scheme: url.scheme().to_string(),
        host,
        path,
        query: url.query().unwrap_or_default().to_string(),
        fragment: url.fragment().unwrap_or_default().to_string(),
    })
}

/// Ensures a non-empty path starts with `/`. An empty path stays empty.
pub fn canonical_path(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Removes ASCII tab, LF and CR, which the URL parser drops anywhere in the
/// input. The authority checks must see the same string the parser does.
fn strip_tabs_and_newlines(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

fn with_default_scheme(input: &str) -> String {
    let lowercase = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    if lowercase.starts_with("http://") || lowercase.starts_with("https://") {
        input.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{input}")
    }
}

/// Returns the part of the input between `://` and the first path, query or
/// fragment delimiter.
fn authority(input: &str) -> &str {
    let Some((_, rest)) = input.split_once("://") else {
        return "";
    };

    let end = rest.find(['/', '\\', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// Reports whether the authority is followed by a path segment.
///
/// The parser always reports `/` for http(s) URLs, so a missing path has to
/// be detected on the input itself.
fn has_explicit_path(input: &str) -> bool {
    let Some((_, rest)) = input.split_once("://") else {
        return false;
    };

    matches!(rest[authority(input).len()..].chars().next(), Some('/' | '\\'))
}
