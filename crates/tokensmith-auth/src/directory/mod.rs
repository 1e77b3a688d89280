//! Client and user directory services.
//!
//! The core consumes these as black boxes: pure lookup-and-verify with no
//! side effects. The in-memory implementations here are reference
//! fixtures; a remote directory can stand in behind the same traits.

pub mod client;
pub mod user;

pub use client::{ClientDetailsService, InMemoryClientDetailsService};
pub use user::{InMemoryUserDetailsService, UserDetailsService};
