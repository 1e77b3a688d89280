//! Token lifecycle error types.
//!
//! This module defines all error kinds that can occur while granting,
//! validating, or refreshing tokens. Every kind is surfaced to the
//! immediate caller as a typed failure; nothing in this crate retries.

/// Errors that can occur during token grant and lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No grant strategy is registered for the requested grant type,
    /// or a strategy was invoked with a grant type it does not support.
    #[error("Unsupported grant type: {grant_type}")]
    UnsupportedGrantType {
        /// The unsupported grant type name.
        grant_type: String,
    },

    /// The client's registration does not authorize the requested grant type.
    #[error("Client is not authorized for grant type: {grant_type}")]
    ClientNotAuthorized {
        /// The grant type the client attempted to use.
        grant_type: String,
    },

    /// A required credential field (e.g. username or password) is missing or empty.
    #[error("Invalid credential request: {message}")]
    InvalidCredentialRequest {
        /// Description of which credential field is missing.
        message: String,
    },

    /// No client is registered under the given identifier.
    #[error("Client not found: {client_id}")]
    ClientNotFound {
        /// The unknown client identifier.
        client_id: String,
    },

    /// The client secret does not match the registered secret.
    #[error("Invalid client secret")]
    InvalidClientSecret,

    /// No user is registered under the given username.
    #[error("User not found: {username}")]
    UserNotFound {
        /// The unknown username.
        username: String,
    },

    /// The password does not match the registered password hash.
    #[error("Invalid password")]
    InvalidPassword,

    /// A refresh grant was requested without a refresh token value.
    #[error("Invalid token request: {message}")]
    InvalidTokenRequest {
        /// Description of what is missing from the request.
        message: String,
    },

    /// The token value is not present in the store.
    #[error("Token not found")]
    TokenNotFound,

    /// The token is present but its expiry timestamp has passed.
    #[error("Token expired")]
    ExpiredToken,

    /// The token enhancer failed to encode or decode a token.
    #[error("Token enhancement failed: {message}")]
    EnhancementFailure {
        /// Description of the encode/decode failure.
        message: String,
    },

    /// An unexpected internal error occurred (e.g. password hashing machinery).
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `UnsupportedGrantType` error.
    #[must_use]
    pub fn unsupported_grant_type(grant_type: impl Into<String>) -> Self {
        Self::UnsupportedGrantType {
            grant_type: grant_type.into(),
        }
    }

    /// Creates a new `ClientNotAuthorized` error.
    #[must_use]
    pub fn client_not_authorized(grant_type: impl Into<String>) -> Self {
        Self::ClientNotAuthorized {
            grant_type: grant_type.into(),
        }
    }

    /// Creates a new `InvalidCredentialRequest` error.
    #[must_use]
    pub fn invalid_credential_request(message: impl Into<String>) -> Self {
        Self::InvalidCredentialRequest {
            message: message.into(),
        }
    }

    /// Creates a new `ClientNotFound` error.
    #[must_use]
    pub fn client_not_found(client_id: impl Into<String>) -> Self {
        Self::ClientNotFound {
            client_id: client_id.into(),
        }
    }

    /// Creates a new `UserNotFound` error.
    #[must_use]
    pub fn user_not_found(username: impl Into<String>) -> Self {
        Self::UserNotFound {
            username: username.into(),
        }
    }

    /// Creates a new `InvalidTokenRequest` error.
    #[must_use]
    pub fn invalid_token_request(message: impl Into<String>) -> Self {
        Self::InvalidTokenRequest {
            message: message.into(),
        }
    }

    /// Creates a new `EnhancementFailure` error.
    #[must_use]
    pub fn enhancement_failure(message: impl Into<String>) -> Self {
        Self::EnhancementFailure {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Internal { .. } | Self::EnhancementFailure { .. })
    }

    /// Returns `true` if the caller failed to authenticate (client or user).
    #[must_use]
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            Self::ClientNotFound { .. }
                | Self::InvalidClientSecret
                | Self::UserNotFound { .. }
                | Self::InvalidPassword
        )
    }

    /// Returns the stable OAuth 2.0 error code for this error.
    ///
    /// The transport layer maps each kind to a response body; the code
    /// strings follow RFC 6749 §5.2 where a counterpart exists.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedGrantType { .. } => "unsupported_grant_type",
            Self::ClientNotAuthorized { .. } => "unauthorized_client",
            Self::InvalidCredentialRequest { .. } => "invalid_request",
            Self::ClientNotFound { .. } => "invalid_client",
            Self::InvalidClientSecret => "invalid_client",
            Self::UserNotFound { .. } => "invalid_grant",
            Self::InvalidPassword => "invalid_grant",
            Self::InvalidTokenRequest { .. } => "invalid_request",
            Self::TokenNotFound => "invalid_token",
            Self::ExpiredToken => "invalid_token",
            Self::EnhancementFailure { .. } => "server_error",
            Self::Internal { .. } => "server_error",
        }
    }
}
