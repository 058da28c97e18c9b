//! Transport-neutral view of the request/response pair.
//!
//! The HTTP server and cookie parsing live outside this crate; callers hand
//! in the request URI with its already-parsed cookies and receive status,
//! headers, and a finalization flag back.

use std::collections::HashMap;

use http::{
    header::{AsHeaderName, HeaderName, HeaderValue},
    HeaderMap, StatusCode, Uri,
};

use authrelay_core::types::CallbackParams;

/// Immutable view of one inbound callback request.
#[derive(Debug, Clone)]
pub struct CallbackRequest {
    uri: Uri,
    cookies: HashMap<String, String>,
}

impl CallbackRequest {
    pub fn new(uri: Uri) -> Self {
        Self {
            uri,
            cookies: HashMap::new(),
        }
    }

    /// Attach a parsed cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Attach a batch of parsed cookies.
    pub fn with_cookies<I>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.cookies.extend(cookies);
        self
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

/// Mutable state of the outgoing response.
///
/// Starts at 200 with no headers; the orchestrator compares against the
/// status captured at entry to decide whether anything downstream (a hook,
/// typically) already claimed the response.
#[derive(Debug)]
pub struct CallbackResponse {
    status: StatusCode,
    headers: HeaderMap,
    finished: bool,
}

impl CallbackResponse {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            finished: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn header(&self, name: impl AsHeaderName) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    /// Terminate the response stream. Idempotent; nothing may be written
    /// after this.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Default for CallbackResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the provider's callback parameters from the request query.
pub fn callback_params(request: &CallbackRequest) -> CallbackParams {
    let query = request.uri().query().unwrap_or_default();
    let mut params = CallbackParams::default();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match name.as_ref() {
            "code" => params.code = Some(value.into_owned()),
            "state" => params.state = Some(value.into_owned()),
            "error" => params.error = Some(value.into_owned()),
            "error_description" => params.error_description = Some(value.into_owned()),
            _ => {}
        }
    }
    params
}
