//! Password grant strategy.

use std::sync::Arc;

use async_trait::async_trait;

use crate::AuthResult;
use crate::directory::UserDetailsService;
use crate::error::AuthError;
use crate::grant::{CredentialCarrier, TokenGranter};
use crate::token::TokenService;
use crate::types::{ClientDetails, GrantType, OAuth2Binding, OAuth2Token};

/// Grants access tokens against resource-owner credentials.
pub struct PasswordTokenGranter {
    users: Arc<dyn UserDetailsService>,
    tokens: Arc<dyn TokenService>,
}

impl PasswordTokenGranter {
    /// Creates a password granter.
    #[must_use]
    pub fn new(users: Arc<dyn UserDetailsService>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl TokenGranter for PasswordTokenGranter {
    async fn grant(
        &self,
        grant_type: &str,
        client: &ClientDetails,
        carrier: &CredentialCarrier,
    ) -> AuthResult<OAuth2Token> {
        if grant_type != GrantType::Password.as_str() {
            return Err(AuthError::unsupported_grant_type(grant_type));
        }

        let username = carrier
            .get_non_empty("username")
            .ok_or_else(|| AuthError::invalid_credential_request("username is required"))?;
        let password = carrier
            .get_non_empty("password")
            .ok_or_else(|| AuthError::invalid_credential_request("password is required"))?;

        let user = self.users.user_details_by_username(username, password).await?;

        tracing::debug!(client_id = %client.client_id, username, "password grant verified");
        let binding = OAuth2Binding::new(client.clone(), user);
        self.tokens.create_access_token(&binding).await
    }
}
