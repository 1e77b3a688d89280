//! In-memory token store.
//!
//! The reference single-process store. Forward maps go from token value
//! to `(token, binding)`; a reverse index maps a binding's cache key to
//! the current access token value.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::AuthResult;
use crate::store::TokenStore;
use crate::types::{OAuth2Binding, OAuth2Token};

/// Map-backed [`TokenStore`] for a single process.
#[derive(Default)]
pub struct InMemoryTokenStore {
    access_tokens: DashMap<String, (OAuth2Token, OAuth2Binding)>,
    access_by_binding: DashMap<String, String>,
    refresh_tokens: DashMap<String, (OAuth2Token, OAuth2Binding)>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn store_access_token(
        &self,
        token: &OAuth2Token,
        binding: &OAuth2Binding,
    ) -> AuthResult<()> {
        self.access_tokens
            .insert(token.value.clone(), (token.clone(), binding.clone()));
        self.access_by_binding
            .insert(binding.cache_key(), token.value.clone());
        Ok(())
    }

    async fn read_access_token(&self, value: &str) -> AuthResult<Option<OAuth2Token>> {
        Ok(self
            .access_tokens
            .get(value)
            .map(|entry| entry.value().0.clone()))
    }

    async fn read_binding_for_access_token(
        &self,
        value: &str,
    ) -> AuthResult<Option<OAuth2Binding>> {
        Ok(self
            .access_tokens
            .get(value)
            .map(|entry| entry.value().1.clone()))
    }

    async fn access_token_for_binding(
        &self,
        binding: &OAuth2Binding,
    ) -> AuthResult<Option<OAuth2Token>> {
        let Some(value) = self
            .access_by_binding
            .get(&binding.cache_key())
            .map(|entry| entry.value().clone())
        else {
            return Ok(None);
        };
        self.read_access_token(&value).await
    }

    async fn remove_access_token(&self, value: &str) -> AuthResult<()> {
        if let Some((_, (_, binding))) = self.access_tokens.remove(value) {
            // Drop the reverse entry only while it still points at this
            // value; a concurrent upsert may already have repointed it.
            self.access_by_binding
                .remove_if(&binding.cache_key(), |_, current| current == value);
        }
        Ok(())
    }

    async fn store_refresh_token(
        &self,
        token: &OAuth2Token,
        binding: &OAuth2Binding,
    ) -> AuthResult<()> {
        self.refresh_tokens
            .insert(token.value.clone(), (token.clone(), binding.clone()));
        Ok(())
    }

    async fn read_refresh_token(&self, value: &str) -> AuthResult<Option<OAuth2Token>> {
        Ok(self
            .refresh_tokens
            .get(value)
            .map(|entry| entry.value().0.clone()))
    }

    async fn read_binding_for_refresh_token(
        &self,
        value: &str,
    ) -> AuthResult<Option<OAuth2Binding>> {
        Ok(self
            .refresh_tokens
            .get(value)
            .map(|entry| entry.value().1.clone()))
    }

    async fn remove_refresh_token(&self, value: &str) -> AuthResult<()> {
        self.refresh_tokens.remove(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClientDetails, GrantType, UserDetails};

    fn make_binding(username: &str) -> OAuth2Binding {
        let client = ClientDetails::new("clientId", "clientSecret", vec![GrantType::Password]);
        let user = UserDetails::new(username, "123456", 1, vec![]).unwrap();
        OAuth2Binding::new(client, user)
    }

    #[tokio::test]
    async fn test_access_token_read_your_writes() {
        let store = InMemoryTokenStore::new();
        let binding = make_binding("simple");
        let token = OAuth2Token::new(None, None);

        store.store_access_token(&token, &binding).await.unwrap();

        let read = store.read_access_token(&token.value).await.unwrap();
        assert_eq!(read, Some(token.clone()));

        let by_binding = store.access_token_for_binding(&binding).await.unwrap();
        assert_eq!(by_binding, Some(token.clone()));

        let bound = store
            .read_binding_for_access_token(&token.value)
            .await
            .unwrap();
        assert_eq!(bound, Some(binding));
    }

    #[tokio::test]
    async fn test_remove_access_token_clears_both_indexes() {
        let store = InMemoryTokenStore::new();
        let binding = make_binding("simple");
        let token = OAuth2Token::new(None, None);

        store.store_access_token(&token, &binding).await.unwrap();
        store.remove_access_token(&token.value).await.unwrap();

        assert_eq!(store.read_access_token(&token.value).await.unwrap(), None);
        assert_eq!(store.access_token_for_binding(&binding).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_absent_access_token_is_noop() {
        let store = InMemoryTokenStore::new();
        store.remove_access_token("no-such-value").await.unwrap();
    }

    #[tokio::test]
    async fn test_upsert_repoints_reverse_index() {
        let store = InMemoryTokenStore::new();
        let binding = make_binding("simple");
        let first = OAuth2Token::new(None, None);
        let second = OAuth2Token::new(None, None);

        store.store_access_token(&first, &binding).await.unwrap();
        store.store_access_token(&second, &binding).await.unwrap();

        let current = store.access_token_for_binding(&binding).await.unwrap();
        assert_eq!(current.map(|t| t.value), Some(second.value.clone()));

        // Removing the superseded value must not disturb the new mapping.
        store.remove_access_token(&first.value).await.unwrap();
        let current = store.access_token_for_binding(&binding).await.unwrap();
        assert_eq!(current.map(|t| t.value), Some(second.value));
    }

    #[tokio::test]
    async fn test_bindings_are_isolated() {
        let store = InMemoryTokenStore::new();
        let simple = make_binding("simple");
        let admin = make_binding("admin");
        let simple_token = OAuth2Token::new(None, None);
        let admin_token = OAuth2Token::new(None, None);

        store
            .store_access_token(&simple_token, &simple)
            .await
            .unwrap();
        store.store_access_token(&admin_token, &admin).await.unwrap();

        assert_eq!(
            store
                .access_token_for_binding(&simple)
                .await
                .unwrap()
                .map(|t| t.value),
            Some(simple_token.value)
        );
        assert_eq!(
            store
                .access_token_for_binding(&admin)
                .await
                .unwrap()
                .map(|t| t.value),
            Some(admin_token.value)
        );
    }

    #[tokio::test]
    async fn test_refresh_tokens_stored_independently() {
        let store = InMemoryTokenStore::new();
        let binding = make_binding("simple");
        let refresh = OAuth2Token::new(None, None);

        store.store_refresh_token(&refresh, &binding).await.unwrap();

        // Refresh tokens never appear on the access side.
        assert_eq!(store.read_access_token(&refresh.value).await.unwrap(), None);
        assert_eq!(
            store.read_refresh_token(&refresh.value).await.unwrap(),
            Some(refresh.clone())
        );
        assert_eq!(
            store
                .read_binding_for_refresh_token(&refresh.value)
                .await
                .unwrap(),
            Some(binding)
        );

        store.remove_refresh_token(&refresh.value).await.unwrap();
        assert_eq!(store.read_refresh_token(&refresh.value).await.unwrap(), None);
    }
}
