//! Redirect token derivation.
//!
//! A token is the first [`TOKEN_LENGTH`] hex characters of a SHA-256 digest
//! over the canonical URL and a time-based salt. The salt makes every
//! submission mint a fresh token, including repeat submissions of a URL that
//! was already shortened.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::domain::entities::{ShortRecord, canonical_url};
use crate::utils::url_normalizer::{NormalizedUrl, canonical_path};

/// Number of hex characters kept from the digest (28 bits).
pub const TOKEN_LENGTH: usize = 7;

/// Tie-breaker for salts taken within the same clock tick.
static SALT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Errors that can occur while deriving a token.
#[derive(Debug, thiserror::Error)]
pub enum CodeGenerationError {
    #[error("Failed to hash URL: {0}")]
    Hashing(String),
    #[error("Cannot build a short link without a host")]
    MissingHost,
}

/// Builds a new [`ShortRecord`] for normalized URL components.
///
/// Components are re-canonicalized first: the path gains a leading `/` when
/// missing and a leading `?` / `#` is dropped from query and fragment.
///
/// The store is not consulted; a token collision surfaces as a conflict when
/// the record is inserted.
///
/// # Errors
///
/// Returns [`CodeGenerationError::MissingHost`] if `url.host` is empty.
/// Returns [`CodeGenerationError::Hashing`] if the digest cannot be computed.
pub fn generate_short(url: &NormalizedUrl) -> Result<ShortRecord, CodeGenerationError> {
    if url.host.is_empty() {
        return Err(CodeGenerationError::MissingHost);
    }

    let path = canonical_path(&url.path);
    let query = url.query.strip_prefix('?').unwrap_or(&url.query);
    let fragment = url.fragment.strip_prefix('#').unwrap_or(&url.fragment);

    let canonical = canonical_url(&url.scheme, &url.host, &path, query, fragment);
    let redirect_path = derive_token(&canonical, &salt())?;

    Ok(ShortRecord::new(
        redirect_path,
        url.scheme.as_str(),
        url.host.as_str(),
        Some(path),
        Some(query.to_string()),
        Some(fragment.to_string()),
    ))
}

/// Hashes `canonical_url + salt` and keeps the first [`TOKEN_LENGTH`] hex
/// characters.
///
/// # Errors
///
/// Returns [`CodeGenerationError::Hashing`] if writing to the hasher fails.
pub fn derive_token(canonical_url: &str, salt: &str) -> Result<String, CodeGenerationError> {
    let mut hasher = Sha256::new();

    hasher
        .write_all(canonical_url.as_bytes())
        .and_then(|()| hasher.write_all(salt.as_bytes()))
        .map_err(|e| CodeGenerationError::Hashing(e.to_string()))?;

    let digest = hex::encode(hasher.finalize());

    digest
        .get(..TOKEN_LENGTH)
        .map(str::to_owned)
        .ok_or_else(|| {
            CodeGenerationError::Hashing(format!(
                "digest has fewer than {TOKEN_LENGTH} hex characters"
            ))
        })
}

/// Wall-clock timestamp with nanosecond precision plus a monotonic sequence.
fn salt() -> String {
    let sequence = SALT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "{} m={sequence}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::url_normalizer::normalize_url;
    use std::collections::HashSet;

    fn components(path: &str, query: &str) -> NormalizedUrl {
        NormalizedUrl {
            scheme: "http".to_string(),
            host: "lucastephens.com".to_string(),
            path: path.to_string(),
            query: query.to_string(),
            fragment: String::new(),
        }
    }

    fn is_token(token: &str) -> bool {
        token.len() == TOKEN_LENGTH
            && token
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn test_duplicate_urls_are_unique() {
        let short1 = generate_short(&components("resume.pdf", "")).unwrap();
        let short2 = generate_short(&components("resume.pdf", "")).unwrap();

        assert!(!short1.redirect_path.is_empty());
        assert!(!short2.redirect_path.is_empty());
        assert_ne!(short1.redirect_path, short2.redirect_path);

        assert_eq!(short1.scheme, short2.scheme);
        assert_eq!(short1.host, short2.host);
        assert_eq!(short1.path, short2.path);
        assert_eq!(short1.query, short2.query);
        assert_eq!(short1.fragment, short2.fragment);
        assert_eq!(short1.raw_url(), short2.raw_url());
        assert_eq!(short1.raw_url(), "http://lucastephens.com/resume.pdf");
    }

    #[test]
    fn test_generate_short_canonicalizes_components() {
        let cases = [
            ("resume.pdf", "?a=b&c=d", "http://lucastephens.com/resume.pdf?a=b&c=d"),
            ("resume.pdf", "", "http://lucastephens.com/resume.pdf"),
            ("", "?a=b&c=d", "http://lucastephens.com?a=b&c=d"),
            ("", "", "http://lucastephens.com"),
        ];

        for (path, query, raw_url) in cases {
            let short = generate_short(&components(path, query)).unwrap();

            assert!(is_token(&short.redirect_path), "bad token for {raw_url}");
            assert_eq!(short.scheme, "http");
            assert_eq!(short.host, "lucastephens.com");
            assert_eq!(short.raw_url(), raw_url);
            assert!(!short.query.as_deref().unwrap_or_default().starts_with('?'));
        }
    }

    #[test]
    fn test_generate_short_strips_fragment_delimiter() {
        let mut url = components("", "");
        url.fragment = "#info".to_string();

        let short = generate_short(&url).unwrap();
        assert_eq!(short.fragment.as_deref(), Some("info"));
        assert_eq!(short.raw_url(), "http://lucastephens.com#info");
    }

    #[test]
    fn test_generate_short_rejects_empty_host() {
        let mut url = components("resume.pdf", "");
        url.host = String::new();

        assert!(matches!(
            generate_short(&url),
            Err(CodeGenerationError::MissingHost)
        ));
    }

    #[test]
    fn test_token_is_seven_lowercase_hex_chars() {
        for input in ["a.io", "lucastephens.com/resume.pdf?a=b#c", "https://x.y/z"] {
            let short = generate_short(&normalize_url(input).unwrap()).unwrap();
            assert!(is_token(&short.redirect_path), "{}", short.redirect_path);
        }
    }

    #[test]
    fn test_derive_token_is_deterministic_for_same_salt() {
        let first = derive_token("http://lucastephens.com", "salt").unwrap();
        let second = derive_token("http://lucastephens.com", "salt").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_derive_token_depends_on_salt() {
        let first = derive_token("http://lucastephens.com", "salt-1").unwrap();
        let second = derive_token("http://lucastephens.com", "salt-2").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_salts_are_unique() {
        let salts: HashSet<String> = (0..1000).map(|_| salt()).collect();
        assert_eq!(salts.len(), 1000);
    }

    #[test]
    fn test_generated_record_round_trips_through_normalizer() {
        let inputs = [
            "lucastephens.com",
            "lucastephens.com/resume.pdf",
            "lucastephens.com?a=b&c=d",
            "lucastephens.com#info",
            "lucastephens.com/resume.pdf?a=b&c=d#info",
            "https://mail.google.com/mail/u/2/#inbox",
            "http://localhost:3000/",
        ];

        for input in inputs {
            let normalized = normalize_url(input).unwrap();
            let short = generate_short(&normalized).unwrap();
            let reparsed = normalize_url(&short.raw_url()).unwrap();

            assert_eq!(reparsed, normalized, "round trip failed for {input}");
        }
    }
}
