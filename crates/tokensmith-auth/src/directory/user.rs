//! User directory service.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::AuthResult;
use crate::error::AuthError;
use crate::types::UserDetails;

/// Lookup-and-verify service for user credentials.
#[async_trait]
pub trait UserDetailsService: Send + Sync {
    /// Loads a user and verifies the presented password against the
    /// stored Argon2 hash.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no user is registered under `username`
    /// - `InvalidPassword` if the password does not verify
    async fn user_details_by_username(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<UserDetails>;
}

/// In-memory user directory seeded at construction, read-only after.
pub struct InMemoryUserDetailsService {
    users: HashMap<String, UserDetails>,
}

impl InMemoryUserDetailsService {
    /// Builds the directory from a list of users.
    #[must_use]
    pub fn new(users: Vec<UserDetails>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }
}

#[async_trait]
impl UserDetailsService for InMemoryUserDetailsService {
    async fn user_details_by_username(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<UserDetails> {
        let user = self
            .users
            .get(username)
            .ok_or_else(|| AuthError::user_not_found(username))?;

        if !user.verify_password(password)? {
            return Err(AuthError::InvalidPassword);
        }
        Ok(user.clone())
    }
}
