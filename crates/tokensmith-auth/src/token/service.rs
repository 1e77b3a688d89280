//! Default token service.
//!
//! Owns the create/reuse/expire/refresh state machine, composing grant
//! output with the token store and the optional enhancer.
//!
//! # Concurrency
//!
//! The store is the only shared mutable resource, and its operations are
//! atomic only in isolation. A check-then-act sequence across two store
//! calls is a race: two concurrent creates for the same binding could
//! both observe "no live token" and both mint. The service therefore
//! holds a per-binding mutex across the whole read-decide-write sequence
//! of `create_access_token` and across the mutation phase of
//! `refresh_access_token`, which keeps at most one live access token per
//! binding.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;

use crate::AuthResult;
use crate::config::TokenLifetimes;
use crate::enhancer::TokenEnhancer;
use crate::error::AuthError;
use crate::store::TokenStore;
use crate::token::TokenService;
use crate::types::{OAuth2Binding, OAuth2Token};

/// Reference [`TokenService`] implementation.
pub struct DefaultTokenService {
    /// Durable token bookkeeping.
    store: Arc<dyn TokenStore>,

    /// Optional transform into the distributable token form.
    enhancer: Option<Arc<dyn TokenEnhancer>>,

    /// Fallback validity windows for clients without explicit ones.
    lifetimes: TokenLifetimes,

    /// One mutex per binding cache key, held across read-decide-write.
    binding_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl DefaultTokenService {
    /// Creates a token service.
    #[must_use]
    pub fn new(
        store: Arc<dyn TokenStore>,
        enhancer: Option<Arc<dyn TokenEnhancer>>,
        lifetimes: TokenLifetimes,
    ) -> Self {
        Self {
            store,
            enhancer,
            lifetimes,
            binding_locks: DashMap::new(),
        }
    }

    fn binding_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.binding_locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    async fn mint_refresh_token(&self, binding: &OAuth2Binding) -> AuthResult<OAuth2Token> {
        let validity = binding
            .client
            .refresh_token_validity_secs(self.lifetimes.refresh_token_validity);
        let expires_at = OffsetDateTime::now_utc() + Duration::seconds(validity);
        let token = OAuth2Token::new(Some(expires_at), None);

        match &self.enhancer {
            Some(enhancer) => enhancer.enhance(&token, binding).await,
            None => Ok(token),
        }
    }

    async fn mint_access_token(
        &self,
        refresh_token: &OAuth2Token,
        binding: &OAuth2Binding,
    ) -> AuthResult<OAuth2Token> {
        let validity = binding
            .client
            .access_token_validity_secs(self.lifetimes.access_token_validity);
        let expires_at = OffsetDateTime::now_utc() + Duration::seconds(validity);
        let token = OAuth2Token::new(Some(expires_at), Some(refresh_token.clone()));

        match &self.enhancer {
            Some(enhancer) => enhancer.enhance(&token, binding).await,
            None => Ok(token),
        }
    }

    /// Mints and persists a fresh access/refresh pair for the binding.
    ///
    /// `surviving_refresh` is an unexpired refresh token carried over
    /// from an expired access token; it is reused instead of minting.
    async fn mint_and_store_pair(
        &self,
        binding: &OAuth2Binding,
        surviving_refresh: Option<OAuth2Token>,
    ) -> AuthResult<OAuth2Token> {
        let refresh_token = match surviving_refresh {
            Some(token) if !token.is_expired() => token,
            _ => self.mint_refresh_token(binding).await?,
        };

        let access_token = self.mint_access_token(&refresh_token, binding).await?;
        self.store.store_access_token(&access_token, binding).await?;
        self.store
            .store_refresh_token(&refresh_token, binding)
            .await?;
        Ok(access_token)
    }
}

#[async_trait]
impl TokenService for DefaultTokenService {
    async fn create_access_token(&self, binding: &OAuth2Binding) -> AuthResult<OAuth2Token> {
        let lock = self.binding_lock(&binding.cache_key());
        let _guard = lock.lock().await;

        let mut surviving_refresh = None;
        if let Some(existing) = self.store.access_token_for_binding(binding).await? {
            if !existing.is_expired() {
                tracing::debug!(
                    client_id = %binding.client.client_id,
                    username = %binding.user.username,
                    "reusing live access token"
                );
                self.store.store_access_token(&existing, binding).await?;
                return Ok(existing);
            }

            tracing::debug!(
                client_id = %binding.client.client_id,
                username = %binding.user.username,
                "removing expired access token"
            );
            self.store.remove_access_token(&existing.value).await?;
            if let Some(refresh_token) = existing.refresh_token {
                self.store.remove_refresh_token(&refresh_token.value).await?;
                surviving_refresh = Some(*refresh_token);
            }
        }

        self.mint_and_store_pair(binding, surviving_refresh).await
    }

    async fn refresh_access_token(&self, refresh_value: &str) -> AuthResult<OAuth2Token> {
        let refresh_token = self
            .store
            .read_refresh_token(refresh_value)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        // An expired refresh token is a terminal failure with no mutation.
        if refresh_token.is_expired() {
            return Err(AuthError::ExpiredToken);
        }

        let binding = self
            .store
            .read_binding_for_refresh_token(refresh_value)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        let lock = self.binding_lock(&binding.cache_key());
        let _guard = lock.lock().await;

        // Re-check under the lock: a concurrent refresh may already have
        // consumed this token. Rotation is strictly single-use.
        if self.store.read_refresh_token(refresh_value).await?.is_none() {
            return Err(AuthError::TokenNotFound);
        }

        if let Some(access_token) = self.store.access_token_for_binding(&binding).await? {
            self.store.remove_access_token(&access_token.value).await?;
        }
        self.store.remove_refresh_token(refresh_value).await?;

        tracing::info!(
            client_id = %binding.client.client_id,
            username = %binding.user.username,
            "rotated refresh token"
        );
        self.mint_and_store_pair(&binding, None).await
    }

    async fn oauth2_details_by_access_token(&self, value: &str) -> AuthResult<OAuth2Binding> {
        let token = self
            .store
            .read_access_token(value)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        if token.is_expired() {
            return Err(AuthError::ExpiredToken);
        }

        self.store
            .read_binding_for_access_token(value)
            .await?
            .ok_or(AuthError::TokenNotFound)
    }

    async fn access_token_for(&self, binding: &OAuth2Binding) -> AuthResult<Option<OAuth2Token>> {
        self.store.access_token_for_binding(binding).await
    }

    async fn read_access_token(&self, value: &str) -> AuthResult<OAuth2Token> {
        self.store
            .read_access_token(value)
            .await?
            .ok_or(AuthError::TokenNotFound)
    }
}
