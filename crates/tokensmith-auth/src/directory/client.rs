//! Client directory service.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::types::ClientDetails;

/// Lookup-and-verify service for client credentials.
#[async_trait]
pub trait ClientDetailsService: Send + Sync {
    /// Loads a client registration and verifies its secret.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if no client is registered under `client_id`
    /// - `InvalidClientSecret` if the secret does not match
    async fn client_details_by_client_id(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> AuthResult<ClientDetails>;
}

/// In-memory client directory seeded at construction, read-only after.
pub struct InMemoryClientDetailsService {
    clients: HashMap<String, ClientDetails>,
}

impl InMemoryClientDetailsService {
    /// Builds the directory from a list of client registrations.
    #[must_use]
    pub fn new(clients: Vec<ClientDetails>) -> Self {
        Self {
            clients: clients
                .into_iter()
                .map(|client| (client.client_id.clone(), client))
                .collect(),
        }
    }
}

#[async_trait]
impl ClientDetailsService for InMemoryClientDetailsService {
    async fn client_details_by_client_id(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> AuthResult<ClientDetails> {
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| AuthError::client_not_found(client_id))?;

        if client.client_secret != client_secret {
            return Err(AuthError::InvalidClientSecret);
        }
        Ok(client.clone())
    }
}
