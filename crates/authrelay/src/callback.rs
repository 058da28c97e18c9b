use std::{fmt, sync::Arc};

use async_trait::async_trait;
use http::{
    header::{HeaderValue, LOCATION},
    StatusCode,
};

use authrelay_core::{claims::session_from_token_set, client::ClientFactory};

use crate::{
    error::{BoxError, CallbackError},
    exchange,
    http::{CallbackRequest, CallbackResponse},
    settings::Settings,
    state,
    store::SessionStore,
};

/// Post-login hook, awaited after the session is saved and before the
/// redirect decision. May mutate the response; a changed status suppresses
/// the redirect.
#[async_trait]
pub trait SuccessHandler: Send + Sync {
    async fn on_success(
        &self,
        request: &CallbackRequest,
        response: &mut CallbackResponse,
    ) -> Result<(), BoxError>;
}

/// Per-invocation options for [`CallbackHandler::handle`].
#[derive(Default)]
pub struct CallbackOptions {
    redirect_to: Option<String>,
    on_success: Option<Arc<dyn SuccessHandler>>,
}

impl CallbackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location to redirect to after a successful login, honored only while
    /// the response status is still untouched.
    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect_to = Some(target.into());
        self
    }

    /// Install a post-login hook.
    pub fn on_success(mut self, hook: impl SuccessHandler + 'static) -> Self {
        self.on_success = Some(Arc::new(hook));
        self
    }

    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }
}

impl fmt::Debug for CallbackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackOptions")
            .field("redirect_to", &self.redirect_to)
            .field("on_success", &self.on_success.is_some())
            .finish()
    }
}

/// Orchestrates one callback invocation end to end.
///
/// The client factory and session store are injected capabilities so that
/// alternate providers and stores can be substituted in tests.
pub struct CallbackHandler<F, S> {
    settings: Settings,
    clients: F,
    sessions: S,
}

impl<F, S> CallbackHandler<F, S>
where
    F: ClientFactory,
    S: SessionStore,
{
    pub fn new(settings: Settings, clients: F, sessions: S) -> Self {
        Self {
            settings,
            clients,
            sessions,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Complete the redirect-back leg for one request/response pair.
    ///
    /// Runs strictly in sequence: validate state, exchange the code,
    /// project and persist the session, run the optional hook, decide on
    /// the redirect, finalize. The first failing step aborts the
    /// invocation; side effects already performed stay in place and the
    /// response is left un-finalized for the outer layer to present the
    /// error.
    pub async fn handle(
        &self,
        request: Option<&CallbackRequest>,
        response: Option<&mut CallbackResponse>,
        options: Option<&CallbackOptions>,
    ) -> Result<(), CallbackError> {
        let request = request.ok_or(CallbackError::InvalidInvocation("request"))?;
        let response = response.ok_or(CallbackError::InvalidInvocation("response"))?;

        // Sentinel for the redirect decision: anything that moves the
        // status off this value claims the response for itself.
        let entry_status = response.status();

        let state = state::extract_state(request)?;
        tracing::debug!("login state cookie validated");

        let token_set =
            exchange::exchange_code(&self.settings, &self.clients, &state, request).await?;
        tracing::debug!("authorization code exchanged");

        let session = session_from_token_set(&token_set);
        self.sessions.save(request, &mut *response, session).await?;
        tracing::debug!("session persisted");

        if let Some(hook) = options.and_then(|options| options.on_success.as_deref()) {
            hook.on_success(request, &mut *response)
                .await
                .map_err(CallbackError::Hook)?;
        }

        if response.status() == entry_status {
            if let Some(target) = options.and_then(CallbackOptions::redirect_target) {
                match HeaderValue::from_str(target) {
                    Ok(location) => {
                        response.set_status(StatusCode::FOUND);
                        response.insert_header(LOCATION, location);
                    }
                    Err(_) => {
                        tracing::warn!(redirect_to = target, "redirect target is not a valid header value");
                    }
                }
            }
        }

        response.finish();
        Ok(())
    }
}
