//! Callback (redirect-back) leg of an OAuth2/OIDC authorization-code login.
//!
//! One inbound callback request flows through a fixed sequence: the
//! anti-CSRF state cookie is validated, the authorization code is exchanged
//! for a token set via an injected [`ClientFactory`], the claims are
//! projected into a session, the session is persisted through an injected
//! [`SessionStore`], an optional post-login hook runs, and the response is
//! redirected (when still untouched) and finalized.
//!
//! Login initiation, token refresh, and logout live elsewhere; this crate
//! only completes a login that was already started.
//!
//! [`ClientFactory`]: authrelay_core::ClientFactory
//! [`SessionStore`]: crate::store::SessionStore

pub mod callback;
pub mod error;
pub mod exchange;
pub mod http;
pub mod settings;
pub mod state;
pub mod store;

pub use callback::{CallbackHandler, CallbackOptions, SuccessHandler};
pub use error::{BoxError, CallbackError};
pub use http::{CallbackRequest, CallbackResponse};
pub use settings::{Settings, SettingsError};
pub use store::{MemorySessionStore, SessionStore, StoreError};
