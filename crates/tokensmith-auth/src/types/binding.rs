//! Identity binding: the (client, user) pair a token is scoped to.

use serde::{Deserialize, Serialize};

use crate::types::client::ClientDetails;
use crate::types::user::UserDetails;

/// The verified client and user a token was minted for.
///
/// The binding is the key the store uses to find "the" current access
/// token for a principal. Equality deliberately covers only the client
/// identifier and the username: secrets, validity windows, and authority
/// lists do not participate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2Binding {
    /// The verified client registration.
    pub client: ClientDetails,

    /// The verified user.
    pub user: UserDetails,
}

impl OAuth2Binding {
    /// Creates a binding from a verified client and user.
    #[must_use]
    pub fn new(client: ClientDetails, user: UserDetails) -> Self {
        Self { client, user }
    }

    /// Returns the store index key for this binding.
    ///
    /// Built from the same two fields equality is defined on, so two
    /// equal bindings always produce the same key.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.client.client_id, self.user.username)
    }
}

impl PartialEq for OAuth2Binding {
    fn eq(&self, other: &Self) -> bool {
        self.client.client_id == other.client.client_id
            && self.user.username == other.user.username
    }
}

impl Eq for OAuth2Binding {}
