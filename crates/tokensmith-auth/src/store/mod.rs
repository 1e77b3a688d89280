//! Token storage.
//!
//! The [`TokenStore`] trait is the persistence contract between the token
//! service and a backend. Each operation is individually atomic, but the
//! contract makes no promise across operations: the token service owns
//! the per-binding critical section that strings them together (see
//! [`crate::token::DefaultTokenService`]).

pub mod memory;

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{OAuth2Binding, OAuth2Token};

pub use memory::InMemoryTokenStore;

/// Bookkeeping of tokens and the identity bindings they protect.
///
/// A conforming store guarantees read-your-writes: after
/// `store_access_token` returns, `access_token_for_binding` for the same
/// binding observes that exact token, and after `remove_access_token`
/// returns, `read_access_token` for that value observes absence.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Upserts an access token.
    ///
    /// Overwrites any prior mapping for the same token value and records
    /// the reverse index from `binding` to the token value, so the
    /// current access token for a binding is an O(1) lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn store_access_token(
        &self,
        token: &OAuth2Token,
        binding: &OAuth2Binding,
    ) -> AuthResult<()>;

    /// Reads an access token by value. `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn read_access_token(&self, value: &str) -> AuthResult<Option<OAuth2Token>>;

    /// Reads the identity binding for an access token value. `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn read_binding_for_access_token(&self, value: &str)
    -> AuthResult<Option<OAuth2Binding>>;

    /// Reverse lookup: the current access token for a binding. `None` if
    /// the binding has no stored token. This is the reuse path's probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn access_token_for_binding(
        &self,
        binding: &OAuth2Binding,
    ) -> AuthResult<Option<OAuth2Token>>;

    /// Removes an access token and its reverse index entry.
    ///
    /// A no-op if the value is absent, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn remove_access_token(&self, value: &str) -> AuthResult<()>;

    /// Stores a refresh token, independently of any access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn store_refresh_token(
        &self,
        token: &OAuth2Token,
        binding: &OAuth2Binding,
    ) -> AuthResult<()>;

    /// Reads a refresh token by value. `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn read_refresh_token(&self, value: &str) -> AuthResult<Option<OAuth2Token>>;

    /// Reads the identity binding for a refresh token value. `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn read_binding_for_refresh_token(
        &self,
        value: &str,
    ) -> AuthResult<Option<OAuth2Binding>>;

    /// Removes a refresh token. A no-op if absent, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn remove_refresh_token(&self, value: &str) -> AuthResult<()>;
}
