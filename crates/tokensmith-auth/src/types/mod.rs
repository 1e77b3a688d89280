//! Domain types for the token lifecycle engine.

pub mod binding;
pub mod client;
pub mod token;
pub mod user;

pub use binding::OAuth2Binding;
pub use client::{ClientDetails, GrantType};
pub use token::OAuth2Token;
pub use user::UserDetails;
