//! Grant handling.
//!
//! A token request arrives as a grant-type name plus a
//! [`CredentialCarrier`] holding whatever fields that grant type needs.
//! Each supported grant type is implemented by a [`TokenGranter`]
//! strategy; the [`CompositeTokenGranter`] holds the strategy registry
//! and dispatches by grant-type name. Client authentication happens
//! before dispatch, in the transport layer — every strategy receives an
//! already-verified [`ClientDetails`].

mod composite;
mod password;
mod refresh;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{ClientDetails, OAuth2Token};

pub use composite::CompositeTokenGranter;
pub use password::PasswordTokenGranter;
pub use refresh::RefreshTokenGranter;

/// Named credential fields accompanying a grant request.
///
/// An opaque key-value lookup, typically built from form parameters.
/// Strategies pull the fields their grant type defines (`username`,
/// `password`, `refresh_token`) and reject requests that omit them; the
/// core never parses HTTP itself.
#[derive(Debug, Clone, Default)]
pub struct CredentialCarrier {
    fields: HashMap<String, String>,
}

impl CredentialCarrier {
    /// Builds a carrier from name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the value for a field name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns the value for a field name, treating empty as absent.
    #[must_use]
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }
}

/// One grant-type strategy.
///
/// A strategy declares the single grant type it supports and rejects
/// any other with `UnsupportedGrantType`. The composite dispatcher also
/// implements this trait, so a registry entry and the full dispatcher
/// are interchangeable to callers.
#[async_trait]
pub trait TokenGranter: Send + Sync {
    /// Executes the grant for an authenticated client.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedGrantType` for a grant type this granter does
    /// not handle, grant-specific credential errors, or any store or
    /// enhancer failure from minting.
    async fn grant(
        &self,
        grant_type: &str,
        client: &ClientDetails,
        carrier: &CredentialCarrier,
    ) -> AuthResult<OAuth2Token>;
}
