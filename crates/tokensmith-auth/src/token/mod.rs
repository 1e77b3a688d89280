//! Token lifecycle orchestration.

pub mod service;

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{OAuth2Binding, OAuth2Token};

pub use service::DefaultTokenService;

/// The create/reuse/expire/refresh state machine.
///
/// The lifecycle of a token value is: absent, then live, optionally
/// reused any number of times, then either expired and cleaned up on the
/// next create call, or rotated away by a refresh. There is no revoked
/// state distinct from removal.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Returns a live access token for the binding, minting one if needed.
    ///
    /// Reuses the stored token when it exists and is unexpired; an
    /// expired token (and its paired refresh token) is removed first and
    /// a fresh pair is minted and persisted. Callers never race between
    /// checking and creating: get-or-create is one operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or enhancer fails.
    async fn create_access_token(&self, binding: &OAuth2Binding) -> AuthResult<OAuth2Token>;

    /// Rotates a refresh token into a new access/refresh pair.
    ///
    /// The consumed refresh token is single-use: it is removed along with
    /// the binding's current access token, and a fresh pair is minted.
    ///
    /// # Errors
    ///
    /// - `TokenNotFound` if the refresh value is unknown
    /// - `ExpiredToken` if the refresh token has expired (no mutation)
    async fn refresh_access_token(&self, refresh_value: &str) -> AuthResult<OAuth2Token>;

    /// Resolves the identity binding behind an access token.
    ///
    /// Pure read: no cleanup happens on this path.
    ///
    /// # Errors
    ///
    /// - `TokenNotFound` if the value is unknown
    /// - `ExpiredToken` if the token is present but expired
    async fn oauth2_details_by_access_token(&self, value: &str) -> AuthResult<OAuth2Binding>;

    /// Returns the stored access token for a binding, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    async fn access_token_for(&self, binding: &OAuth2Binding) -> AuthResult<Option<OAuth2Token>>;

    /// Reads an access token by value.
    ///
    /// # Errors
    ///
    /// Returns `TokenNotFound` if the value is unknown.
    async fn read_access_token(&self, value: &str) -> AuthResult<OAuth2Token>;
}
