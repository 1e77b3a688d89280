//! OAuth2 bearer-token lifecycle engine.
//!
//! Implements the password and refresh_token grants over pluggable
//! client/user directories and a pluggable token store, with single-use
//! refresh token rotation and reuse of live access tokens.
//!
//! # Architecture
//!
//! - [`grant`] — grant-type strategies behind a client-authenticating
//!   dispatcher
//! - [`token`] — the create/reuse/expire/refresh orchestration
//! - [`store`] — the token persistence contract and an in-memory
//!   implementation
//! - [`enhancer`] — optional transform of minted tokens into a
//!   self-describing form (JWT)
//! - [`directory`] — client and user credential verification
//! - [`http`] — Axum handlers for `/oauth/token` and
//!   `/oauth/check_token`
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use tokensmith_auth::config::TokenLifetimes;
//! use tokensmith_auth::directory::{InMemoryClientDetailsService, InMemoryUserDetailsService};
//! use tokensmith_auth::grant::{
//!     CompositeTokenGranter, CredentialCarrier, PasswordTokenGranter, RefreshTokenGranter,
//!     TokenGranter,
//! };
//! use tokensmith_auth::store::InMemoryTokenStore;
//! use tokensmith_auth::token::DefaultTokenService;
//! use tokensmith_auth::types::GrantType;
//!
//! let tokens = Arc::new(DefaultTokenService::new(
//!     Arc::new(InMemoryTokenStore::new()),
//!     None,
//!     TokenLifetimes::default(),
//! ));
//! let mut granters: HashMap<GrantType, Arc<dyn TokenGranter>> = HashMap::new();
//! granters.insert(
//!     GrantType::Password,
//!     Arc::new(PasswordTokenGranter::new(users, tokens.clone())),
//! );
//! granters.insert(
//!     GrantType::RefreshToken,
//!     Arc::new(RefreshTokenGranter::new(tokens.clone())),
//! );
//! let granter = CompositeTokenGranter::new(granters);
//!
//! let client = clients
//!     .client_details_by_client_id("clientId", "clientSecret")
//!     .await?;
//! let carrier = CredentialCarrier::from_pairs([("username", "simple"), ("password", "123456")]);
//! let token = granter.grant("password", &client, &carrier).await?;
//! ```

pub mod config;
pub mod directory;
pub mod enhancer;
pub mod error;
pub mod grant;
pub mod http;
pub mod store;
pub mod token;
pub mod types;

pub use config::AuthConfig;
pub use error::AuthError;

/// Result alias used throughout the crate.
pub type AuthResult<T> = Result<T, AuthError>;
