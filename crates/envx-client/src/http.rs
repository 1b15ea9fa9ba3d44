//! REST implementation of [`EnvironmentClient`]

use std::time::Duration;

use async_trait::async_trait;
use envx_core::diagnostics::Diagnostic;
use envx_core::errors::Result;
use envx_core::lifetime::format_lifetime;
use envx_core::{Environment, EnvironmentClient, OpenedSession, SessionId};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::errors::{configuration, from_reqwest, invalid_response, remote};

/// Environment service client over HTTP
#[derive(Debug, Clone)]
pub struct HttpEnvironmentClient {
    http: Client,
    config: ClientConfig,
}

/// Body of a rejected open request that carries diagnostics
#[derive(Deserialize)]
struct DiagnosticsBody {
    #[serde(default)]
    diagnostics: Vec<Diagnostic>,
}

impl HttpEnvironmentClient {
    /// # Errors
    ///
    /// Returns `EnvxError::Transport` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(from_reqwest)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base}/api/preview/environments/{org}/{env}/open[/{extra}]`
    ///
    /// Segments are percent-encoded.
    pub fn open_url(&self, org: &str, env: &str, extra: Option<&str>) -> Result<Url> {
        let mut url = self.config.backend_url().clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| configuration("backend URL cannot carry a path"))?;
            segments
                .pop_if_empty()
                .extend(["api", "preview", "environments", org, env, "open"]);
            if let Some(extra) = extra {
                segments.push(extra);
            }
        }
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url) -> Result<(StatusCode, Vec<u8>)> {
        debug!(method = %method, url = %url, "sending request");
        let response = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(
                AUTHORIZATION,
                format!("token {}", self.config.access_token().expose()),
            )
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status();
        let body = response.bytes().await.map_err(from_reqwest)?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        Ok((status, body.to_vec()))
    }
}

/// Interpret the response to an open request
pub(crate) fn decode_open(status: StatusCode, body: &[u8]) -> Result<OpenedSession> {
    if status.is_success() {
        return serde_json::from_slice(body).map_err(|e| invalid_response("open", e));
    }
    if status == StatusCode::BAD_REQUEST {
        if let Ok(DiagnosticsBody { diagnostics }) = serde_json::from_slice(body) {
            if !diagnostics.is_empty() {
                return Ok(OpenedSession::with_diagnostics(diagnostics));
            }
        }
    }
    Err(remote(status, body))
}

/// Interpret the response to a fetch request
pub(crate) fn decode_environment(status: StatusCode, body: &[u8]) -> Result<Environment> {
    if !status.is_success() {
        return Err(remote(status, body));
    }
    serde_json::from_slice(body).map_err(|e| invalid_response("environment", e))
}

#[async_trait]
impl EnvironmentClient for HttpEnvironmentClient {
    async fn open_environment(
        &self,
        org: &str,
        env: &str,
        lifetime: Duration,
    ) -> Result<OpenedSession> {
        let mut url = self.open_url(org, env, None)?;
        url.query_pairs_mut()
            .append_pair("duration", &format_lifetime(lifetime));
        let (status, body) = self.send(Method::POST, url).await?;
        decode_open(status, &body)
    }

    async fn get_open_environment(
        &self,
        org: &str,
        env: &str,
        session_id: &SessionId,
    ) -> Result<Environment> {
        let url = self.open_url(org, env, Some(session_id.as_str()))?;
        let (status, body) = self.send(Method::GET, url).await?;
        decode_environment(status, &body)
    }
}
