//! Client registration domain types.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

// =============================================================================
// Grant Type
// =============================================================================

/// OAuth 2.0 grant types.
///
/// Names a credential-exchange strategy. The composite granter keys its
/// registry on this type; adding a flow means adding a variant and
/// registering a strategy, never branching in the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Resource Owner Password Credentials flow.
    Password,
    /// Refresh Token flow.
    RefreshToken,
    /// Authorization Code flow. Carried on registrations but no strategy
    /// ships for it yet.
    AuthorizationCode,
    /// Client Credentials flow. Carried on registrations but no strategy
    /// ships for it yet.
    ClientCredentials,
}

impl GrantType {
    /// Returns the OAuth 2.0 `grant_type` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::RefreshToken => "refresh_token",
            Self::AuthorizationCode => "authorization_code",
            Self::ClientCredentials => "client_credentials",
        }
    }

    /// Parses a `grant_type` parameter value.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedGrantType` for any unrecognized name.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "password" => Ok(Self::Password),
            "refresh_token" => Ok(Self::RefreshToken),
            "authorization_code" => Ok(Self::AuthorizationCode),
            "client_credentials" => Ok(Self::ClientCredentials),
            other => Err(AuthError::unsupported_grant_type(other)),
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Client Details
// =============================================================================

/// A registered client application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    /// Unique client identifier used in grant requests.
    pub client_id: String,

    /// Client secret, verified on every grant request.
    pub client_secret: String,

    /// Access token validity window in seconds. `None` falls back to the
    /// configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_validity: Option<i64>,

    /// Refresh token validity window in seconds. `None` falls back to the
    /// configured default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_validity: Option<i64>,

    /// Redirect URI for authorization-code flows. Carried on the
    /// registration but unexercised by the grants in scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,

    /// Grant types this client is authorized to use.
    pub grant_types: Vec<GrantType>,
}

impl ClientDetails {
    /// Creates a client registration.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        grant_types: Vec<GrantType>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            access_token_validity: None,
            refresh_token_validity: None,
            redirect_uri: None,
            grant_types,
        }
    }

    /// Sets explicit validity windows in seconds.
    #[must_use]
    pub fn with_validity(mut self, access_secs: i64, refresh_secs: i64) -> Self {
        self.access_token_validity = Some(access_secs);
        self.refresh_token_validity = Some(refresh_secs);
        self
    }

    /// Sets the redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Returns the access token validity window in seconds.
    #[must_use]
    pub fn access_token_validity_secs(&self, fallback: std::time::Duration) -> i64 {
        self.access_token_validity
            .unwrap_or(fallback.as_secs() as i64)
    }

    /// Returns the refresh token validity window in seconds.
    #[must_use]
    pub fn refresh_token_validity_secs(&self, fallback: std::time::Duration) -> i64 {
        self.refresh_token_validity
            .unwrap_or(fallback.as_secs() as i64)
    }

    /// Checks if the given grant type is allowed for this client.
    #[must_use]
    pub fn is_grant_type_allowed(&self, grant_type: GrantType) -> bool {
        self.grant_types.contains(&grant_type)
    }
}
