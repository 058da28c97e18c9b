//! Authrelay core primitives shared across the login-callback crates.

pub mod claims;
pub mod client;
pub mod types;

pub use claims::{session_from_token_set, RESERVED_CLAIMS};
pub use client::{ClientFactory, ExchangeError, ExchangeResult, OidcClient};
pub use types::{CallbackParams, Session, TokenSet};
