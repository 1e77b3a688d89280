//! User domain type.
//!
//! Passwords are stored as Argon2id PHC hashes, never plaintext.
//! Verification lives in the user directory service.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    /// Username presented in password grants.
    pub username: String,

    /// Argon2id PHC-formatted password hash.
    pub password_hash: String,

    /// Numeric user identifier.
    pub user_id: i64,

    /// Coarse-grained permission labels checked by downstream resource
    /// logic.
    pub authorities: Vec<String>,
}

impl UserDetails {
    /// Creates a user, hashing the plaintext password with Argon2id.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the hashing machinery fails.
    pub fn new(
        username: impl Into<String>,
        password: &str,
        user_id: i64,
        authorities: Vec<String>,
    ) -> Result<Self, AuthError> {
        use argon2::password_hash::{SaltString, rand_core::OsRng};
        use argon2::{Argon2, PasswordHasher};

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))?
            .to_string();

        Ok(Self {
            username: username.into(),
            password_hash,
            user_id,
            authorities,
        })
    }

    /// Verifies a plaintext password against the stored hash.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the stored hash is not valid PHC format.
    pub fn verify_password(&self, password: &str) -> Result<bool, AuthError> {
        use argon2::{Argon2, PasswordHash, PasswordVerifier};

        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|e| AuthError::internal(format!("stored password hash is invalid: {e}")))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Checks whether the user carries the given authority label.
    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }
}
