//! Deterministic short code derivation.
//!
//! The same long URL always yields the same short code, so resubmitting a URL
//! collides with its existing mapping instead of creating a second one.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a short code.
const SHORT_CODE_BYTES: usize = 6;

/// Length of every derived short code.
pub const SHORT_CODE_LEN: usize = 8;

/// Derives the short code for a normalized long URL.
///
/// Takes the first six bytes of the SHA-256 digest and encodes them as
/// URL-safe base64 without padding, producing an 8-character code.
///
/// # Examples
///
/// ```ignore
/// let code = derive_short("https://example.com/");
/// assert_eq!(code, derive_short("https://example.com/"));
/// assert_eq!(code.len(), 8);
/// ```
pub fn derive_short(long_url: &str) -> String {
    let digest = Sha256::digest(long_url.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&digest[..SHORT_CODE_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_derive_short_is_deterministic() {
        let first = derive_short("https://example.com/path");
        let second = derive_short("https://example.com/path");
        assert_eq!(first, second);
    }

    #[test]
    fn test_derive_short_has_fixed_length() {
        let long = "https://example.com/".repeat(50);
        assert_eq!(derive_short("https://a.com/").len(), SHORT_CODE_LEN);
        assert_eq!(derive_short(&long).len(), SHORT_CODE_LEN);
    }

    #[test]
    fn test_derive_short_url_safe_characters() {
        let code = derive_short("https://example.com/?q=1&b=2");
        assert!(
            code.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_shared_prefixes_do_not_collide() {
        let a = derive_short("https://a.com/");
        let b = derive_short("https://b.com/");
        assert_ne!(a, b);

        let codes: HashSet<_> = (0..1000)
            .map(|i| derive_short(&format!("https://example.com/page/{i}")))
            .collect();
        assert_eq!(codes.len(), 1000);
    }
}
