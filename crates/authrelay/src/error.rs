use thiserror::Error;

use authrelay_core::client::ExchangeError;

use crate::store::StoreError;

/// Boxed error produced by caller-supplied hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Closed error surface of the callback core.
///
/// None of these are recovered internally; each aborts the invocation
/// exactly once and leaves already-performed side effects in place.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// The request or response half of the invocation was absent.
    #[error("{0} is not available")]
    InvalidInvocation(&'static str),
    /// The anti-CSRF state cookie set during login initiation is missing.
    #[error("no login state could be found on the request")]
    MissingState,
    /// The provider rejected the code exchange, or the callback parameters
    /// were inconsistent with the validated state.
    #[error("code exchange failed: {0}")]
    Exchange(#[from] ExchangeError),
    /// The session store rejected the save.
    #[error("failed to persist session: {0}")]
    Storage(#[from] StoreError),
    /// The caller-supplied post-login hook failed.
    #[error("post-login hook failed: {0}")]
    Hook(#[source] BoxError),
}
