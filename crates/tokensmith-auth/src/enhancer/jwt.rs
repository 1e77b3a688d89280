//! JWT token enhancer.
//!
//! Encodes a minted token and the identity binding's non-secret fields
//! into an HS256-signed JWT; `extract` verifies the signature and
//! rebuilds the pair. Secrets never enter the claims, so the extracted
//! binding carries a redacted client secret and password hash — binding
//! equality covers only the identity pair, which round-trips intact.
//!
//! Claims are derived deterministically from the input (no `iat`, no
//! `jti`), so enhancing the same token twice yields the same value.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::AuthResult;
use crate::enhancer::TokenEnhancer;
use crate::error::AuthError;
use crate::types::{ClientDetails, OAuth2Binding, OAuth2Token, UserDetails};

/// HS256-based [`TokenEnhancer`].
pub struct JwtTokenEnhancer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

/// Claims carried by an enhanced token.
///
/// `exp` is the token's own expiry; JWT expiry granularity is whole
/// seconds, so sub-second precision is dropped on the round trip.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    /// Username of the bound user.
    sub: String,
    /// Identifier of the bound client.
    client_id: String,
    user_id: i64,
    authorities: Vec<String>,
    token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
    /// Enhanced value of the paired refresh token, itself a JWT.
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl JwtTokenEnhancer {
    /// Creates an enhancer signing with the given HMAC secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn decode_claims(&self, value: &str) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is the token service's concern; expired tokens must
        // still decode so their binding can be resolved.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(value, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::enhancement_failure(e.to_string()))
    }

    fn rebuild(&self, value: &str, claims: TokenClaims) -> AuthResult<(OAuth2Token, OAuth2Binding)> {
        let expires_at = claims
            .exp
            .map(OffsetDateTime::from_unix_timestamp)
            .transpose()
            .map_err(|e| AuthError::enhancement_failure(e.to_string()))?;

        // The paired refresh token is itself an enhanced value; one level
        // of nesting at most, refresh tokens never nest further.
        let refresh_token = claims
            .refresh_token
            .as_deref()
            .map(|nested| {
                let nested_claims = self.decode_claims(nested)?;
                let nested_expires_at = nested_claims
                    .exp
                    .map(OffsetDateTime::from_unix_timestamp)
                    .transpose()
                    .map_err(|e| AuthError::enhancement_failure(e.to_string()))?;
                Ok::<_, AuthError>(OAuth2Token {
                    value: nested.to_string(),
                    token_type: nested_claims.token_type,
                    expires_at: nested_expires_at,
                    refresh_token: None,
                })
            })
            .transpose()?;

        let token = OAuth2Token {
            value: value.to_string(),
            token_type: claims.token_type,
            expires_at,
            refresh_token: refresh_token.map(Box::new),
        };

        let binding = OAuth2Binding::new(
            ClientDetails {
                client_id: claims.client_id,
                // Redacted: secrets never round-trip through claims.
                client_secret: String::new(),
                access_token_validity: None,
                refresh_token_validity: None,
                redirect_uri: None,
                grant_types: vec![],
            },
            UserDetails {
                username: claims.sub,
                password_hash: String::new(),
                user_id: claims.user_id,
                authorities: claims.authorities,
            },
        );

        Ok((token, binding))
    }
}

#[async_trait]
impl TokenEnhancer for JwtTokenEnhancer {
    async fn enhance(
        &self,
        token: &OAuth2Token,
        binding: &OAuth2Binding,
    ) -> AuthResult<OAuth2Token> {
        let claims = TokenClaims {
            sub: binding.user.username.clone(),
            client_id: binding.client.client_id.clone(),
            user_id: binding.user.user_id,
            authorities: binding.user.authorities.clone(),
            token_type: token.token_type.clone(),
            exp: token.expires_at.map(OffsetDateTime::unix_timestamp),
            refresh_token: token.refresh_token.as_deref().map(|t| t.value.clone()),
        };

        let value = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::enhancement_failure(e.to_string()))?;

        Ok(OAuth2Token {
            value,
            token_type: token.token_type.clone(),
            expires_at: token.expires_at,
            refresh_token: token.refresh_token.clone(),
        })
    }

    async fn extract(&self, value: &str) -> AuthResult<(OAuth2Token, OAuth2Binding)> {
        let claims = self.decode_claims(value)?;
        self.rebuild(value, claims)
    }
}
