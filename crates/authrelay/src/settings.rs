use std::env;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("invalid redirect uri `{0}`")]
    InvalidRedirectUri(String),
}

/// Static configuration for completing a login callback.
#[derive(Debug, Clone)]
pub struct Settings {
    redirect_uri: String,
}

impl Settings {
    /// Build settings from the redirect URI registered with the provider.
    pub fn new(redirect_uri: impl Into<String>) -> Result<Self, SettingsError> {
        let redirect_uri = redirect_uri.into();
        Url::parse(&redirect_uri)
            .map_err(|_| SettingsError::InvalidRedirectUri(redirect_uri.clone()))?;
        Ok(Self { redirect_uri })
    }

    /// Load settings from the expected environment variables.
    pub fn from_env() -> Result<Self, SettingsError> {
        let redirect_uri = env::var("AUTHRELAY_REDIRECT_URI")
            .map_err(|_| SettingsError::MissingEnv("AUTHRELAY_REDIRECT_URI"))?;
        Self::new(redirect_uri)
    }

    /// Redirect URI the provider will call back with, as registered.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_redirect_uri_is_rejected() {
        let err = Settings::new("/callback").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidRedirectUri(_)));
    }

    #[test]
    fn from_env_reads_and_validates() {
        env::remove_var("AUTHRELAY_REDIRECT_URI");
        assert!(matches!(
            Settings::from_env(),
            Err(SettingsError::MissingEnv(_))
        ));

        env::set_var("AUTHRELAY_REDIRECT_URI", "not a url");
        assert!(matches!(
            Settings::from_env(),
            Err(SettingsError::InvalidRedirectUri(_))
        ));

        env::set_var("AUTHRELAY_REDIRECT_URI", "https://app.example.com/callback");
        let settings = Settings::from_env().expect("settings");
        assert_eq!(settings.redirect_uri(), "https://app.example.com/callback");

        env::remove_var("AUTHRELAY_REDIRECT_URI");
    }
}
