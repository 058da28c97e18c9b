use authrelay_core::{
    client::{ClientFactory, ExchangeError},
    types::TokenSet,
};

use crate::{
    error::CallbackError,
    http::{self, CallbackRequest},
    settings::Settings,
};

/// Exchange the callback's authorization code for a token set.
///
/// Validates the provider-supplied parameters against the already-verified
/// `state` before any network traffic, then delegates the wire exchange to
/// a client obtained from the injected factory. Suspends until the provider
/// responds; performed exactly once, with retry policy left to the client.
pub async fn exchange_code<F>(
    settings: &Settings,
    clients: &F,
    state: &str,
    request: &CallbackRequest,
) -> Result<TokenSet, CallbackError>
where
    F: ClientFactory + ?Sized,
{
    let mut params = http::callback_params(request);

    if let Some(error) = params.error.take() {
        return Err(ExchangeError::Provider {
            error,
            description: params.error_description.take(),
        }
        .into());
    }

    match params.state.as_deref() {
        Some(value) if value == state => {}
        _ => return Err(ExchangeError::StateMismatch.into()),
    }

    if params.code.is_none() {
        return Err(ExchangeError::MissingCode.into());
    }

    let client = clients.client().await?;
    let token_set = client
        .exchange_code(settings.redirect_uri(), params, state)
        .await?;
    Ok(token_set)
}
