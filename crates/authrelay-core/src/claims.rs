use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{Session, TokenSet};

/// Claim names reserved by the OIDC protocol layer.
///
/// These describe the token itself rather than the subject and are removed
/// when a token set is projected into an application session.
pub const RESERVED_CLAIMS: &[&str] = &[
    "iss",
    "aud",
    "exp",
    "iat",
    "nbf",
    "nonce",
    "azp",
    "auth_time",
    "at_hash",
    "c_hash",
    "s_hash",
];

/// Project a token set into an application session.
///
/// Copies every claim whose name is not protocol-reserved, stamps the
/// creation time, and derives the session expiry from the reported token
/// lifetime. Total for any well-formed token set.
pub fn session_from_token_set(token_set: &TokenSet) -> Session {
    let user = token_set
        .claims
        .iter()
        .filter(|(name, _)| !RESERVED_CLAIMS.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let created_at = current_epoch_seconds();
    Session {
        user,
        created_at,
        expires_at: token_set
            .expires_in
            .map(|lifetime| created_at.saturating_add(lifetime)),
    }
}

fn current_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
