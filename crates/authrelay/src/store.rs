use std::{
    collections::HashMap,
    sync::RwLock,
    time::{Duration, SystemTime},
};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use http::header::{HeaderValue, SET_COOKIE};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

use authrelay_core::types::Session;

use crate::http::{CallbackRequest, CallbackResponse};

/// Cookie key under which [`MemorySessionStore`] hands out session ids.
pub const SESSION_COOKIE: &str = "authrelay.session";

/// Error surface for session persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session backend error: {0}")]
    Backend(String),
    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence contract for projected sessions.
///
/// `save` attaches session state to the outgoing response (a cookie, a
/// server-side record, or both) and may perform I/O. Concurrent saves for
/// distinct requests must not interfere; that safety is the implementer's
/// contract. The callback core performs no retry or rollback around it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(
        &self,
        request: &CallbackRequest,
        response: &mut CallbackResponse,
        session: Session,
    ) -> Result<(), StoreError>;
}

struct StoredSession {
    session: Session,
    expires_at: SystemTime,
}

impl StoredSession {
    fn is_expired(&self) -> bool {
        match SystemTime::now().duration_since(self.expires_at) {
            Ok(duration) => duration > Duration::from_secs(0),
            Err(_) => false,
        }
    }
}

/// Thread-safe in-memory session store.
///
/// Saves record the session under a random id and set a session cookie on
/// the response; expired entries are dropped on read.
pub struct MemorySessionStore {
    ttl: Duration,
    inner: RwLock<HashMap<String, StoredSession>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let mut guard = self.inner.write().expect("session store poisoned");
        if let Some(stored) = guard.get(id) {
            if stored.is_expired() {
                guard.remove(id);
                return None;
            }
            return Some(stored.session.clone());
        }
        None
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        let mut guard = self.inner.write().expect("session store poisoned");
        let stored = guard.remove(id)?;
        if stored.is_expired() {
            return None;
        }
        Some(stored.session)
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("session store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn generate_id() -> String {
        let mut entropy = [0u8; 16];
        OsRng.fill_bytes(&mut entropy);
        URL_SAFE_NO_PAD.encode(entropy)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(
        &self,
        _request: &CallbackRequest,
        response: &mut CallbackResponse,
        session: Session,
    ) -> Result<(), StoreError> {
        let id = Self::generate_id();
        let expires_at = SystemTime::now()
            .checked_add(self.ttl)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        {
            let mut guard = self.inner.write().expect("session store poisoned");
            guard.insert(id.clone(), StoredSession { session, expires_at });
        }

        let cookie = format!(
            "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl.as_secs()
        );
        let value = HeaderValue::from_str(&cookie)
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        response.insert_header(SET_COOKIE, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;
    use serde_json::{json, Map};

    fn session() -> Session {
        let mut user = Map::new();
        user.insert("sub".to_owned(), json!("user:123"));
        Session {
            user,
            created_at: 1_700_000_000,
            expires_at: None,
        }
    }

    fn request() -> CallbackRequest {
        CallbackRequest::new(Uri::from_static("https://app.example.com/callback"))
    }

    fn cookie_session_id(response: &CallbackResponse) -> String {
        let header = response
            .header(SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .expect("cookie utf-8");
        let pair = header.split(';').next().expect("cookie pair");
        pair.strip_prefix(&format!("{SESSION_COOKIE}="))
            .expect("cookie name")
            .to_owned()
    }

    #[tokio::test]
    async fn save_records_session_and_sets_cookie() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let mut response = CallbackResponse::new();

        store
            .save(&request(), &mut response, session())
            .await
            .expect("save");

        let id = cookie_session_id(&response);
        let restored = store.get(&id).expect("stored session");
        assert_eq!(restored.user["sub"], json!("user:123"));
    }

    #[tokio::test]
    async fn sessions_expire_after_ttl() {
        let store = MemorySessionStore::new(Duration::from_millis(10));
        let mut response = CallbackResponse::new();

        store
            .save(&request(), &mut response, session())
            .await
            .expect("save");
        let id = cookie_session_id(&response);

        std::thread::sleep(Duration::from_millis(20));
        assert!(store.get(&id).is_none());
    }

    #[tokio::test]
    async fn remove_claims_a_session_once() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let mut response = CallbackResponse::new();

        store
            .save(&request(), &mut response, session())
            .await
            .expect("save");
        let id = cookie_session_id(&response);

        assert!(store.remove(&id).is_some());
        assert!(store.remove(&id).is_none());
        assert!(store.is_empty());
    }
}
