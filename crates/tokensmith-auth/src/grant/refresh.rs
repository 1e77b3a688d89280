//! Refresh token grant strategy.

use std::sync::Arc;

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::grant::{CredentialCarrier, TokenGranter};
use crate::token::TokenService;
use crate::types::{ClientDetails, GrantType, OAuth2Token};

/// Exchanges a live refresh token for a new access/refresh pair.
pub struct RefreshTokenGranter {
    tokens: Arc<dyn TokenService>,
}

impl RefreshTokenGranter {
    /// Creates a refresh granter.
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenGranter for RefreshTokenGranter {
    async fn grant(
        &self,
        grant_type: &str,
        _client: &ClientDetails,
        carrier: &CredentialCarrier,
    ) -> AuthResult<OAuth2Token> {
        if grant_type != GrantType::RefreshToken.as_str() {
            return Err(AuthError::unsupported_grant_type(grant_type));
        }

        let refresh_value = carrier
            .get_non_empty("refresh_token")
            .ok_or_else(|| AuthError::invalid_token_request("refresh_token is required"))?;

        self.tokens.refresh_access_token(refresh_value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenLifetimes;
    use crate::store::InMemoryTokenStore;
    use crate::token::DefaultTokenService;
    use crate::types::{OAuth2Binding, UserDetails};

    fn make_client() -> ClientDetails {
        ClientDetails::new(
            "clientId",
            "clientSecret",
            vec![GrantType::Password, GrantType::RefreshToken],
        )
        .with_validity(1800, 18000)
    }

    fn make_granter() -> (Arc<DefaultTokenService>, RefreshTokenGranter) {
        let store = Arc::new(InMemoryTokenStore::new());
        let tokens = Arc::new(DefaultTokenService::new(
            store,
            None,
            TokenLifetimes::default(),
        ));
        (tokens.clone(), RefreshTokenGranter::new(tokens))
    }

    #[tokio::test]
    async fn test_grant_rotates_pair() {
        let (tokens, granter) = make_granter();

        let binding = OAuth2Binding::new(
            make_client(),
            UserDetails::new("simple", "123456", 1, vec![]).unwrap(),
        );
        let access = tokens.create_access_token(&binding).await.unwrap();
        let refresh_value = access.refresh_token.as_deref().unwrap().value.clone();

        let carrier =
            CredentialCarrier::from_pairs([("refresh_token", refresh_value.as_str())]);
        let rotated = granter
            .grant("refresh_token", &make_client(), &carrier)
            .await
            .unwrap();
        assert_ne!(rotated.value, access.value);

        // Single use: the same token cannot be exchanged twice.
        let result = granter.grant("refresh_token", &make_client(), &carrier).await;
        assert!(matches!(result, Err(AuthError::TokenNotFound)));
    }

    #[tokio::test]
    async fn test_rejects_other_grant_type() {
        let (_, granter) = make_granter();
        let carrier = CredentialCarrier::from_pairs([("refresh_token", "value")]);

        let result = granter.grant("password", &make_client(), &carrier).await;
        assert!(matches!(result, Err(AuthError::UnsupportedGrantType { .. })));
    }

    #[tokio::test]
    async fn test_missing_refresh_token_rejected() {
        let (_, granter) = make_granter();

        let carrier = CredentialCarrier::from_pairs([("refresh_token", "")]);
        let result = granter.grant("refresh_token", &make_client(), &carrier).await;
        assert!(matches!(result, Err(AuthError::InvalidTokenRequest { .. })));

        let empty = CredentialCarrier::default();
        let result = granter.grant("refresh_token", &make_client(), &empty).await;
        assert!(matches!(result, Err(AuthError::InvalidTokenRequest { .. })));
    }
}
