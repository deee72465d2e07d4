//! Token claim extraction.
//!
//! The backend issues three-segment tokens whose middle segment is
//! base64-encoded JSON. The client does NOT validate signatures; it only
//! reads claims, for two purposes: checking expiry at session
//! initialization, and deriving the current user's id as a fallback in
//! one admin view. This module is the single place that parsing lives.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Claims the client cares about. Anything else in the payload is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// The user this token was issued to.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl TokenClaims {
    /// Whether the token has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Decode the claims of a three-segment token.
///
/// Returns `None` for anything malformed: wrong segment count, invalid
/// base64, or a payload that is not a JSON object with an `exp` number.
/// Callers treat `None` as a corrupt session and clear persisted state.
#[must_use]
pub fn decode_token_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let _signature = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    // Tokens in the wild use url-safe base64; tolerate standard too.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .ok()?;

    serde_json::from_slice(&bytes).ok()
}

/// Build an unsigned token carrying the given claims.
///
/// Only for tests and mocks; the signature segment is a placeholder the
/// client never inspects.
#[cfg(feature = "test-utils")]
#[must_use]
pub fn encode_unsigned_token(exp: i64, user_id: Option<&str>) -> String {
    let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"none\",\"typ\":\"JWT\"}");
    let payload = match user_id {
        Some(id) => format!("{{\"exp\":{exp},\"user_id\":\"{id}\"}}"),
        None => format!("{{\"exp\":{exp}}}"),
    };
    let payload = URL_SAFE_NO_PAD.encode(payload.as_bytes());
    format!("{header}.{payload}.unsigned")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_exp_and_user_id() {
        let token = encode_unsigned_token(1_900_000_000, Some("user-42"));
        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims.exp, 1_900_000_000);
        assert_eq!(claims.user_id.as_deref(), Some("user-42"));
    }

    #[test]
    fn user_id_claim_is_optional() {
        let token = encode_unsigned_token(1_900_000_000, None);
        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims.user_id, None);
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert_eq!(decode_token_claims("just-one-segment"), None);
        assert_eq!(decode_token_claims("a.b"), None);
        assert_eq!(decode_token_claims("a.b.c.d"), None);
    }

    #[test]
    fn rejects_garbage_payload() {
        assert_eq!(decode_token_claims("head.!!!not-base64!!!.sig"), None);

        let not_json = URL_SAFE_NO_PAD.encode(b"plain text");
        assert_eq!(decode_token_claims(&format!("h.{not_json}.s")), None);
    }

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let claims = TokenClaims {
            exp: 1_000,
            user_id: None,
        };
        let at_expiry = Utc.timestamp_opt(1_000, 0).unwrap();
        let before = Utc.timestamp_opt(999, 0).unwrap();
        assert!(claims.is_expired(at_expiry));
        assert!(!claims.is_expired(before));
    }
}
