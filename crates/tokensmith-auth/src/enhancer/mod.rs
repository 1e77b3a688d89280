//! Token enhancement boundary.
//!
//! An enhancer turns a bare minted token into its distributable form and
//! can invert that transformation. It is pluggable independently of the
//! store and grant logic: the token service takes an
//! `Option<Arc<dyn TokenEnhancer>>` and passes raw tokens through
//! unmodified when none is configured.

pub mod jwt;

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{OAuth2Binding, OAuth2Token};

pub use jwt::JwtTokenEnhancer;

/// Transforms tokens to and from their distributable representation.
///
/// `enhance` must be idempotent given the same input, and `extract` must
/// invert `enhance` for any value it produced. Encode/decode failures are
/// reported as `EnhancementFailure` and never retried.
#[async_trait]
pub trait TokenEnhancer: Send + Sync {
    /// Produces the distributable form of a minted token.
    ///
    /// # Errors
    ///
    /// Returns `EnhancementFailure` if encoding fails.
    async fn enhance(
        &self,
        token: &OAuth2Token,
        binding: &OAuth2Binding,
    ) -> AuthResult<OAuth2Token>;

    /// Recovers the token and its identity binding from an enhanced value.
    ///
    /// # Errors
    ///
    /// Returns `EnhancementFailure` for malformed values or values this
    /// enhancer did not produce.
    async fn extract(&self, value: &str) -> AuthResult<(OAuth2Token, OAuth2Binding)>;
}
