//! Mock URL-shortening domain data.
//!
//! There is no server: codes are random, history is synthetic, and the
//! artificial latency lives at the web boundary. Only URL validation here is
//! real.

use rand::Rng;
use thiserror::Error;

use crate::constants::{MAX_URL_LENGTH, SHORT_CODE_LEN, SHORT_LINK_BASE};

#[derive(Debug, Error, PartialEq)]
pub enum UrlError {
    #[error("enter a URL first")]
    Empty,
    #[error("URL is longer than {MAX_URL_LENGTH} characters")]
    TooLong,
    #[error("URL must start with http:// or https://")]
    BadScheme,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShortenedUrl {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
    /// Unix epoch ms, supplied by the caller.
    pub created_at_ms: f64,
    pub clicks: u32,
}

pub fn validate_url(url: &str) -> Result<(), UrlError> {
    if url.is_empty() {
        return Err(UrlError::Empty);
    }
    if url.len() > MAX_URL_LENGTH {
        return Err(UrlError::TooLong);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(UrlError::BadScheme);
    }
    Ok(())
}

// Lowercase base-36, the alphabet the service hands out codes in.
const CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn generate_short_code(rng: &mut impl Rng) -> String {
    (0..SHORT_CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Validate and "shorten" a URL with a freshly generated code.
pub fn shorten(
    original_url: &str,
    now_ms: f64,
    rng: &mut impl Rng,
) -> Result<ShortenedUrl, UrlError> {
    validate_url(original_url)?;
    let short_code = generate_short_code(rng);
    Ok(ShortenedUrl {
        short_url: format!("{SHORT_LINK_BASE}{short_code}"),
        short_code,
        original_url: original_url.to_owned(),
        created_at_ms: now_ms,
        clicks: 0,
    })
}

/// Canned history rows returned by the mock backend, newest first.
pub fn sample_history(now_ms: f64) -> Vec<ShortenedUrl> {
    const DAY_MS: f64 = 86_400_000.0;
    vec![
        ShortenedUrl {
            short_url: format!("{SHORT_LINK_BASE}abc123"),
            short_code: "abc123".to_owned(),
            original_url: "https://example.com/very-long-url-here".to_owned(),
            created_at_ms: now_ms - DAY_MS,
            clicks: 42,
        },
        ShortenedUrl {
            short_url: format!("{SHORT_LINK_BASE}def456"),
            short_code: "def456".to_owned(),
            original_url: "https://another-example.com/another-long-url".to_owned(),
            created_at_ms: now_ms - 2.0 * DAY_MS,
            clicks: 17,
        },
    ]
}
