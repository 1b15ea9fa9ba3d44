//! Remote environment service interface

use std::time::Duration;

use async_trait::async_trait;

use crate::environment::{Environment, OpenedSession, SessionId};
use crate::errors::Result;

/// Transport to the environment service
///
/// Implementations own authentication, encoding and any resilience policy.
/// Callers treat every error as final.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnvironmentClient: Send + Sync {
    /// Open a session on `org/env` valid for `lifetime`
    ///
    /// Content problems come back as diagnostics on the returned session,
    /// not as errors.
    ///
    /// # Errors
    ///
    /// Returns `EnvxError::Transport` or `EnvxError::Remote` on failure.
    async fn open_environment(
        &self,
        org: &str,
        env: &str,
        lifetime: Duration,
    ) -> Result<OpenedSession>;

    /// Fetch the resolved environment for a session
    ///
    /// # Errors
    ///
    /// Returns `EnvxError::Transport` or `EnvxError::Remote` on failure.
    async fn get_open_environment(
        &self,
        org: &str,
        env: &str,
        session_id: &SessionId,
    ) -> Result<Environment>;
}

#[async_trait]
impl<C: EnvironmentClient + ?Sized> EnvironmentClient for std::sync::Arc<C> {
    async fn open_environment(
        &self,
        org: &str,
        env: &str,
        lifetime: Duration,
    ) -> Result<OpenedSession> {
        (**self).open_environment(org, env, lifetime).await
    }

    async fn get_open_environment(
        &self,
        org: &str,
        env: &str,
        session_id: &SessionId,
    ) -> Result<Environment> {
        (**self).get_open_environment(org, env, session_id).await
    }
}
