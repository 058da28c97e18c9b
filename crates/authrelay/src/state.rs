use crate::{error::CallbackError, http::CallbackRequest};

/// Cookie key under which login initiation stores the anti-CSRF state.
///
/// The cookie lives for one login round-trip. It is not cleared here after
/// validation; clearing is left to the login-initiation flow that owns it.
pub const STATE_COOKIE: &str = "authrelay.state";

/// Read the anti-CSRF state token from the request's cookie set.
///
/// An absent or empty cookie both fail with
/// [`CallbackError::MissingState`]. No side effects.
pub fn extract_state(request: &CallbackRequest) -> Result<String, CallbackError> {
    match request.cookie(STATE_COOKIE) {
        Some(value) if !value.is_empty() => Ok(value.to_owned()),
        _ => Err(CallbackError::MissingState),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;

    fn request() -> CallbackRequest {
        CallbackRequest::new(Uri::from_static("https://app.example.com/callback"))
    }

    #[test]
    fn present_state_is_returned() {
        let request = request().with_cookie(STATE_COOKIE, "state-123");
        assert_eq!(extract_state(&request).expect("state"), "state-123");
    }

    #[test]
    fn absent_state_is_missing() {
        assert!(matches!(
            extract_state(&request()),
            Err(CallbackError::MissingState)
        ));
    }

    #[test]
    fn empty_state_is_missing() {
        let request = request().with_cookie(STATE_COOKIE, "");
        assert!(matches!(
            extract_state(&request),
            Err(CallbackError::MissingState)
        ));
    }
}
