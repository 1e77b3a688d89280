//! Axum handlers for the token endpoints.
//!
//! The transport layer owns what the core deliberately does not: form
//! parsing, client authentication, and the mapping from error kinds to
//! response codes. Handlers verify the client against the directory,
//! wrap the remaining form fields in a [`CredentialCarrier`], and hand
//! off to the grant dispatcher.
//!
//! # Usage
//!
//! ```ignore
//! use tokensmith_auth::http::{TokenEndpointState, router};
//!
//! let app = router(TokenEndpointState::new(clients, granter, token_service));
//! ```
//!
//! # Request Format
//!
//! ```text
//! POST /oauth/token
//! Content-Type: application/x-www-form-urlencoded
//! Authorization: Basic <client_credentials>
//!
//! grant_type=password&username=simple&password=123456
//! ```
//!
//! Client credentials may arrive via HTTP Basic auth or as `client_id`
//! and `client_secret` form fields; Basic auth wins when both are
//! present.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::AuthResult;
use crate::directory::ClientDetailsService;
use crate::error::AuthError;
use crate::grant::{CredentialCarrier, TokenGranter};
use crate::token::TokenService;
use crate::types::{ClientDetails, OAuth2Binding, OAuth2Token};

// =============================================================================
// State Types
// =============================================================================

/// State shared by the token endpoints.
#[derive(Clone)]
pub struct TokenEndpointState {
    /// Client directory for authenticating callers.
    pub clients: Arc<dyn ClientDetailsService>,
    /// Grant dispatcher backing `/oauth/token`.
    pub granter: Arc<dyn TokenGranter>,
    /// Token service backing `/oauth/check_token`.
    pub token_service: Arc<dyn TokenService>,
}

impl TokenEndpointState {
    /// Creates the endpoint state.
    pub fn new(
        clients: Arc<dyn ClientDetailsService>,
        granter: Arc<dyn TokenGranter>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            clients,
            granter,
            token_service,
        }
    }

    /// Authenticates the client from Basic auth or form fields.
    async fn authenticate_client(
        &self,
        headers: &HeaderMap,
        form: &TokenForm,
    ) -> AuthResult<ClientDetails> {
        let basic_auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_basic_auth);

        let (client_id, client_secret) = match &basic_auth {
            Some((id, secret)) => (id.as_str(), secret.as_str()),
            None => (
                form.client_id.as_deref().unwrap_or_default(),
                form.client_secret.as_deref().unwrap_or_default(),
            ),
        };

        self.clients
            .client_details_by_client_id(client_id, client_secret)
            .await
    }
}

/// Builds a router exposing `/oauth/token` and `/oauth/check_token`.
pub fn router(state: TokenEndpointState) -> Router {
    Router::new()
        .route("/oauth/token", post(token_handler))
        .route("/oauth/check_token", post(check_token_handler))
        .with_state(state)
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Form parameters for the token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    /// Requested grant type.
    pub grant_type: String,

    /// Resource owner username (password grant).
    #[serde(default)]
    pub username: Option<String>,

    /// Resource owner password (password grant).
    #[serde(default)]
    pub password: Option<String>,

    /// Refresh token value (refresh_token grant).
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Client ID (when not using Basic auth).
    #[serde(default)]
    pub client_id: Option<String>,

    /// Client secret (when not using Basic auth).
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl TokenForm {
    /// Wraps the grant-specific fields as a credential carrier.
    fn to_carrier(&self) -> CredentialCarrier {
        CredentialCarrier::from_pairs(
            [
                ("username", self.username.as_deref()),
                ("password", self.password.as_deref()),
                ("refresh_token", self.refresh_token.as_deref()),
            ]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v))),
        )
    }
}

/// Form parameters for the check_token endpoint.
#[derive(Debug, Deserialize)]
pub struct CheckTokenForm {
    /// The access token to look up.
    pub token: String,
}

/// Successful token response body.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// The access token value.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
    /// Seconds until expiry, floored at zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// Refresh token value, when one was minted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    fn from_token(token: &OAuth2Token) -> Self {
        Self {
            access_token: token.value.clone(),
            token_type: token.token_type.clone(),
            expires_in: token.expires_in_secs(),
            refresh_token: token.refresh_token.as_ref().map(|t| t.value.clone()),
        }
    }
}

/// Successful check_token response body.
#[derive(Debug, Serialize)]
pub struct CheckTokenResponse {
    /// Always true on the success path; failures return an error body.
    pub active: bool,
    /// Client the token was issued to.
    pub client_id: String,
    /// Resource owner username.
    pub username: String,
    /// Resource owner identifier.
    pub user_id: i64,
    /// Authorities granted to the resource owner.
    pub authorities: Vec<String>,
}

impl CheckTokenResponse {
    fn from_binding(binding: &OAuth2Binding) -> Self {
        Self {
            active: true,
            client_id: binding.client.client_id.clone(),
            username: binding.user.username.clone(),
            user_id: binding.user.user_id,
            authorities: binding.user.authorities.clone(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Token endpoint handler.
///
/// # Response
///
/// - 200 OK with the minted token
/// - 400 Bad Request for malformed or unsupported requests
/// - 401 Unauthorized for failed client, user, or token credentials
/// - 500 Internal Server Error for store or enhancer failures
pub async fn token_handler(
    State(state): State<TokenEndpointState>,
    headers: HeaderMap,
    Form(form): Form<TokenForm>,
) -> impl IntoResponse {
    let client = match state.authenticate_client(&headers, &form).await {
        Ok(client) => client,
        Err(e) => return error_response(&e),
    };

    let carrier = form.to_carrier();
    match state
        .granter
        .grant(&form.grant_type, &client, &carrier)
        .await
    {
        Ok(token) => (StatusCode::OK, Json(TokenResponse::from_token(&token))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Check_token endpoint handler.
///
/// Resolves the binding behind an access token. Unknown and expired
/// tokens are reported with distinct OAuth error codes.
pub async fn check_token_handler(
    State(state): State<TokenEndpointState>,
    Form(form): Form<CheckTokenForm>,
) -> impl IntoResponse {
    if form.token.is_empty() {
        let e = AuthError::invalid_token_request("token is required");
        return error_response(&e);
    }

    match state
        .token_service
        .oauth2_details_by_access_token(&form.token)
        .await
    {
        Ok(binding) => (
            StatusCode::OK,
            Json(CheckTokenResponse::from_binding(&binding)),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Parses an HTTP Basic `Authorization` header into (client_id, secret).
fn parse_basic_auth(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, secret) = decoded.split_once(':')?;
    Some((id.to_string(), secret.to_string()))
}

/// Maps a service error to its HTTP status.
fn status_for(error: &AuthError) -> StatusCode {
    match error {
        AuthError::ClientNotFound { .. }
        | AuthError::InvalidClientSecret
        | AuthError::UserNotFound { .. }
        | AuthError::InvalidPassword
        | AuthError::TokenNotFound
        | AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
        AuthError::Internal { .. } | AuthError::EnhancementFailure { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

fn error_response(error: &AuthError) -> axum::response::Response {
    if error.is_server_error() {
        tracing::error!(error = %error, "token endpoint failure");
    } else {
        tracing::debug!(error = %error, "token request rejected");
    }
    (
        status_for(error),
        Json(serde_json::json!({
            "error": error.oauth_error_code(),
            "error_description": error.to_string(),
        })),
    )
        .into_response()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_auth() {
        let header = format!("Basic {}", BASE64.encode("clientId:clientSecret"));
        assert_eq!(
            parse_basic_auth(&header),
            Some(("clientId".to_string(), "clientSecret".to_string()))
        );
        assert_eq!(parse_basic_auth("Bearer abc"), None);
        assert_eq!(parse_basic_auth("Basic not-base64!!"), None);
    }

    #[test]
    fn test_form_to_carrier_skips_absent_fields() {
        let form = TokenForm {
            grant_type: "password".to_string(),
            username: Some("simple".to_string()),
            password: Some("123456".to_string()),
            refresh_token: None,
            client_id: None,
            client_secret: None,
        };

        let carrier = form.to_carrier();
        assert_eq!(carrier.get("username"), Some("simple"));
        assert_eq!(carrier.get("password"), Some("123456"));
        assert_eq!(carrier.get("refresh_token"), None);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&AuthError::unsupported_grant_type("implicit")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AuthError::client_not_authorized("password")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AuthError::InvalidClientSecret),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&AuthError::ExpiredToken),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&AuthError::internal("store offline")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_response_shape() {
        use time::{Duration, OffsetDateTime};

        let refresh = OAuth2Token::new(
            Some(OffsetDateTime::now_utc() + Duration::seconds(18000)),
            None,
        );
        let access = OAuth2Token::new(
            Some(OffsetDateTime::now_utc() + Duration::seconds(1800)),
            Some(refresh.clone()),
        );

        let response = TokenResponse::from_token(&access);
        assert_eq!(response.access_token, access.value);
        assert_eq!(response.token_type, "bearer");
        assert!(response.expires_in.unwrap() <= 1800);
        assert_eq!(response.refresh_token, Some(refresh.value));
    }
}
