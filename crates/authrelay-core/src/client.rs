use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{CallbackParams, TokenSet};

/// Convenience alias for client interactions.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Failures surfaced while turning an authorization code into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// The provider sent an error back on the redirect instead of a code.
    #[error("provider reported `{error}`")]
    Provider {
        error: String,
        description: Option<String>,
    },
    #[error("callback state does not match the expected state")]
    StateMismatch,
    #[error("callback is missing the authorization code")]
    MissingCode,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned an invalid response: {0}")]
    InvalidResponse(String),
    #[error("client could not be constructed: {0}")]
    Client(String),
}

/// Client capable of exchanging an authorization code for a token set.
///
/// Implementations own all provider-specific wire details, including any
/// retry policy; the callback core performs the exchange exactly once.
#[async_trait]
pub trait OidcClient: Send + Sync {
    /// Exchange the code carried by `params` for a token set, bound to the
    /// registered `redirect_uri` and the already-validated `expected_state`.
    async fn exchange_code(
        &self,
        redirect_uri: &str,
        params: CallbackParams,
        expected_state: &str,
    ) -> ExchangeResult<TokenSet>;
}

/// Asynchronous factory producing an [`OidcClient`] per invocation.
///
/// Injected at call sites so alternate providers can be substituted in
/// tests.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn client(&self) -> ExchangeResult<Arc<dyn OidcClient>>;
}
