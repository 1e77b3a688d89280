//! Bearer token domain type.
//!
//! Tokens are immutable once minted. An access token owns an optional
//! paired refresh token; refresh tokens never reference their access
//! token back, so the structure stays a simple owned tree.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Token type tag used for all tokens minted by this crate.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// A bearer token and its lifecycle metadata.
///
/// The `value` is an opaque unique string; with an enhancer configured it
/// is the enhanced (e.g. JWT-encoded) representation, otherwise a raw
/// UUID. `expires_at` of `None` means the token never expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Token {
    /// Opaque token value presented by callers.
    pub value: String,

    /// Token type tag, always "bearer" for tokens minted here.
    pub token_type: String,

    /// Absolute expiry timestamp. `None` means non-expiring.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub expires_at: Option<OffsetDateTime>,

    /// Paired refresh token. Present only on access tokens; a refresh
    /// token always carries `None` here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<Box<OAuth2Token>>,
}

impl OAuth2Token {
    /// Creates a token with a fresh random value.
    #[must_use]
    pub fn new(expires_at: Option<OffsetDateTime>, refresh_token: Option<OAuth2Token>) -> Self {
        Self {
            value: Uuid::new_v4().to_string(),
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_at,
            refresh_token: refresh_token.map(Box::new),
        }
    }

    /// Returns `true` if this token has expired.
    ///
    /// A token is expired iff its expiry timestamp is set and the current
    /// time is not strictly before it. This is the single expiry check
    /// used throughout the engine.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| !(OffsetDateTime::now_utc() < expires_at))
    }

    /// Returns the number of whole seconds until expiry, or `None` for
    /// non-expiring tokens. Clamped at zero for already-expired tokens.
    #[must_use]
    pub fn expires_in_secs(&self) -> Option<i64> {
        self.expires_at
            .map(|expires_at| (expires_at - OffsetDateTime::now_utc()).whole_seconds().max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn test_non_expiring_token() {
        let token = OAuth2Token::new(None, None);
        assert!(!token.is_expired());
        assert_eq!(token.expires_in_secs(), None);
    }

    #[test]
    fn test_future_expiry_not_expired() {
        let token = OAuth2Token::new(Some(OffsetDateTime::now_utc() + Duration::hours(1)), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_past_expiry_expired() {
        let token = OAuth2Token::new(Some(OffsetDateTime::now_utc() - Duration::seconds(1)), None);
        assert!(token.is_expired());
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        // A token whose expiry is exactly now (or earlier) counts as expired:
        // "now is not strictly before expiry".
        let token = OAuth2Token::new(Some(OffsetDateTime::now_utc()), None);
        assert!(token.is_expired());
    }

    #[test]
    fn test_fresh_values_are_unique() {
        let a = OAuth2Token::new(None, None);
        let b = OAuth2Token::new(None, None);
        assert_ne!(a.value, b.value);
    }

    #[test]
    fn test_access_token_owns_refresh_token() {
        let refresh = OAuth2Token::new(None, None);
        let access = OAuth2Token::new(None, Some(refresh.clone()));

        let nested = access.refresh_token.as_deref().unwrap();
        assert_eq!(nested.value, refresh.value);
        assert!(nested.refresh_token.is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let refresh = OAuth2Token::new(Some(OffsetDateTime::now_utc() + Duration::hours(5)), None);
        let access = OAuth2Token::new(
            Some(OffsetDateTime::now_utc() + Duration::minutes(30)),
            Some(refresh),
        );

        let json = serde_json::to_string(&access).unwrap();
        let parsed: OAuth2Token = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.value, access.value);
        assert_eq!(parsed.token_type, BEARER_TOKEN_TYPE);
        assert_eq!(
            parsed.refresh_token.as_deref().map(|t| t.value.clone()),
            access.refresh_token.as_deref().map(|t| t.value.clone())
        );
    }
}
