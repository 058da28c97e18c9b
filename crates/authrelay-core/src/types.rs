use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token bundle returned by a successful authorization-code exchange.
///
/// Held only for the duration of one callback invocation; never persisted
/// in this form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    pub id_token: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
    pub scopes: Vec<String>,
    /// Verified claims about the authenticated subject, including the
    /// protocol-reserved ones. The projection into a [`Session`] strips
    /// the reserved names.
    pub claims: Map<String, Value>,
}

/// Application-level login record derived from a token set's claims.
///
/// The serialized shape is the contract a session store persists and
/// later restores on subsequent requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Subject claims with the protocol-reserved names removed.
    pub user: Map<String, Value>,
    /// Epoch seconds at which the session was created.
    pub created_at: u64,
    /// Epoch seconds after which the session should no longer be honored,
    /// when the provider reported a token lifetime.
    pub expires_at: Option<u64>,
}

/// Parameters the provider appended to the registered redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_serializes_with_stable_shape() {
        let mut user = Map::new();
        user.insert("sub".to_owned(), json!("user:123"));
        user.insert("email".to_owned(), json!("user@example.com"));
        let session = Session {
            user,
            created_at: 1_700_000_000,
            expires_at: Some(1_700_003_600),
        };
        let value = serde_json::to_value(&session).expect("serialize session");
        assert_eq!(value["user"]["sub"], json!("user:123"));
        assert_eq!(value["created_at"], json!(1_700_000_000));
        assert_eq!(value["expires_at"], json!(1_700_003_600));
    }

    #[test]
    fn callback_params_deserialize_from_query_pairs() {
        let params: CallbackParams =
            serde_json::from_value(json!({ "code": "abc", "state": "xyz" }))
                .expect("deserialize params");
        assert_eq!(params.code.as_deref(), Some("abc"));
        assert_eq!(params.state.as_deref(), Some("xyz"));
        assert!(params.error.is_none());
    }
}
