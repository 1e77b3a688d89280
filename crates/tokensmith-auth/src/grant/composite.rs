//! Grant-type dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::grant::{CredentialCarrier, TokenGranter};
use crate::types::{ClientDetails, GrantType, OAuth2Token};

/// Routes a grant request to the strategy registered for its type.
///
/// The registry is built once at assembly time and read-only after.
/// New grant types are added by registering a strategy, never by
/// branching here. An unknown grant-type name and a known one with no
/// registered strategy are reported identically.
///
/// The client's authorized grant types are enforced before dispatch:
/// a client requesting a grant type outside its registration fails with
/// `ClientNotAuthorized` without the strategy ever running.
pub struct CompositeTokenGranter {
    granters: HashMap<GrantType, Arc<dyn TokenGranter>>,
}

impl CompositeTokenGranter {
    /// Creates a dispatcher over the given strategy registry.
    #[must_use]
    pub fn new(granters: HashMap<GrantType, Arc<dyn TokenGranter>>) -> Self {
        Self { granters }
    }
}

#[async_trait]
impl TokenGranter for CompositeTokenGranter {
    async fn grant(
        &self,
        grant_type: &str,
        client: &ClientDetails,
        carrier: &CredentialCarrier,
    ) -> AuthResult<OAuth2Token> {
        let parsed = GrantType::parse(grant_type)?;
        let granter = self
            .granters
            .get(&parsed)
            .ok_or_else(|| AuthError::unsupported_grant_type(grant_type))?;

        if !client.is_grant_type_allowed(parsed) {
            tracing::warn!(
                client_id = %client.client_id,
                grant_type,
                "client requested a grant type outside its allow-list"
            );
            return Err(AuthError::client_not_authorized(grant_type));
        }

        granter.grant(grant_type, client, carrier).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Records invocations and returns a fixed token.
    struct RecordingGranter {
        calls: AtomicUsize,
    }

    impl RecordingGranter {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TokenGranter for RecordingGranter {
        async fn grant(
            &self,
            _grant_type: &str,
            _client: &ClientDetails,
            _carrier: &CredentialCarrier,
        ) -> AuthResult<OAuth2Token> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OAuth2Token::new(None, None))
        }
    }

    fn make_client() -> ClientDetails {
        ClientDetails::new(
            "clientId",
            "clientSecret",
            vec![GrantType::Password, GrantType::RefreshToken],
        )
    }

    fn make_composite(granter: Arc<RecordingGranter>) -> CompositeTokenGranter {
        let mut granters: HashMap<GrantType, Arc<dyn TokenGranter>> = HashMap::new();
        granters.insert(GrantType::Password, granter);
        CompositeTokenGranter::new(granters)
    }

    #[tokio::test]
    async fn test_dispatches_to_registered_strategy() {
        let recorder = RecordingGranter::new();
        let composite = make_composite(recorder.clone());

        composite
            .grant("password", &make_client(), &CredentialCarrier::default())
            .await
            .unwrap();
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_grant_type_skips_strategies() {
        let recorder = RecordingGranter::new();
        let composite = make_composite(recorder.clone());

        let result = composite
            .grant("implicit", &make_client(), &CredentialCarrier::default())
            .await;
        assert!(matches!(result, Err(AuthError::UnsupportedGrantType { .. })));
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unregistered_grant_type() {
        let recorder = RecordingGranter::new();
        let composite = make_composite(recorder);

        // Valid grant type with no strategy behind it.
        let result = composite
            .grant("refresh_token", &make_client(), &CredentialCarrier::default())
            .await;
        assert!(matches!(result, Err(AuthError::UnsupportedGrantType { .. })));
    }

    #[tokio::test]
    async fn test_grant_type_outside_allow_list() {
        let recorder = RecordingGranter::new();
        let composite = make_composite(recorder.clone());
        // Authenticated client whose registration only allows refresh_token.
        let narrow = ClientDetails::new("narrow", "secret", vec![GrantType::RefreshToken]);

        let result = composite
            .grant("password", &narrow, &CredentialCarrier::default())
            .await;
        assert!(matches!(result, Err(AuthError::ClientNotAuthorized { .. })));
        assert_eq!(recorder.calls.load(Ordering::SeqCst), 0);
    }
}
