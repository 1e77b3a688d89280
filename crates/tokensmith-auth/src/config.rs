//! Token service configuration.
//!
//! Configuration is explicit: every component receives the settings it
//! needs at construction time. Nothing in this crate reads process-wide
//! mutable state.
//!
//! # Example (TOML)
//!
//! ```toml
//! [lifetimes]
//! access_token_validity = "30m"
//! refresh_token_validity = "5h"
//!
//! [enhancer]
//! jwt_secret = "replace-me"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the token lifecycle engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Fallback token validity windows, used when a client registration
    /// leaves its own windows unset.
    pub lifetimes: TokenLifetimes,

    /// Token enhancer settings.
    pub enhancer: EnhancerConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            lifetimes: TokenLifetimes::default(),
            enhancer: EnhancerConfig::default(),
        }
    }
}

/// Fallback validity windows for minted tokens.
///
/// A client registration may carry its own windows; these values apply
/// only when it does not.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenLifetimes {
    /// Access token validity window.
    #[serde(with = "humantime_serde")]
    pub access_token_validity: Duration,

    /// Refresh token validity window.
    #[serde(with = "humantime_serde")]
    pub refresh_token_validity: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access_token_validity: Duration::from_secs(1800),
            refresh_token_validity: Duration::from_secs(18000),
        }
    }
}

impl TokenLifetimes {
    /// Creates lifetimes from explicit second counts.
    #[must_use]
    pub fn from_secs(access_secs: u64, refresh_secs: u64) -> Self {
        Self {
            access_token_validity: Duration::from_secs(access_secs),
            refresh_token_validity: Duration::from_secs(refresh_secs),
        }
    }
}

/// Settings for the JWT token enhancer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnhancerConfig {
    /// HMAC secret used to sign and verify enhanced tokens.
    pub jwt_secret: String,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "replace-me".to_string(),
        }
    }
}
