//! Client configuration

use envx_core::errors::Result;
use envx_core_types::Sensitive;
use reqwest::Url;

use crate::errors::configuration;

/// Connection settings for the environment service
///
/// Validated on construction; a `ClientConfig` always holds an absolute
/// http(s) base URL and a non-blank access token.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    backend_url: Url,
    access_token: Sensitive<String>,
    user_agent: String,
}

impl ClientConfig {
    /// # Errors
    ///
    /// Returns `EnvxError::Configuration` for an unusable URL or a blank token.
    pub fn new(backend_url: &str, access_token: impl Into<String>) -> Result<Self> {
        let backend_url = Url::parse(backend_url.trim())
            .map_err(|e| configuration(format!("invalid backend URL {:?}: {}", backend_url, e)))?;
        if !matches!(backend_url.scheme(), "http" | "https") || backend_url.cannot_be_a_base() {
            return Err(configuration(format!(
                "backend URL {} must be an http or https URL",
                backend_url
            )));
        }

        let access_token = Sensitive::new(access_token.into());
        if access_token.is_blank() {
            return Err(configuration("access token is empty"));
        }

        Ok(Self {
            backend_url,
            access_token,
            user_agent: format!("envx/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn backend_url(&self) -> &Url {
        &self.backend_url
    }

    pub fn access_token(&self) -> &Sensitive<String> {
        &self.access_token
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
