//! Two-phase environment open
//!
//! Phase one asks the service to open a session; phase two fetches the
//! resolved tree for that session. Diagnostics from phase one end the flow
//! before phase two starts. Errors from either phase are returned exactly as
//! the client produced them.

use std::time::{Duration, Instant};

use crate::client::EnvironmentClient;
use crate::diagnostics::Diagnostic;
use crate::environment::{EnvRef, Environment};
use crate::errors::{EnvxError, ExError, Result};
use crate::{log_op_end, log_op_error, log_op_start};

/// Result of a successful open flow
#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    /// The session was opened and its tree fetched
    Opened(Environment),
    /// The environment has content problems; nothing was fetched
    Diagnostics(Vec<Diagnostic>),
}

impl OpenOutcome {
    pub fn environment(&self) -> Option<&Environment> {
        match self {
            OpenOutcome::Opened(env) => Some(env),
            OpenOutcome::Diagnostics(_) => None,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            OpenOutcome::Opened(_) => &[],
            OpenOutcome::Diagnostics(diags) => diags,
        }
    }
}

/// Open `env` and fetch its resolved tree
///
/// # Errors
///
/// Returns the client's error unchanged from either phase. An open response
/// with neither diagnostics nor a session id is `EnvxError::Remote`.
pub async fn open_environment<C>(
    client: &C,
    env: &EnvRef,
    lifetime: Duration,
) -> Result<OpenOutcome>
where
    C: EnvironmentClient + ?Sized,
{
    let start = Instant::now();
    log_op_start!("open_environment", org = env.org.as_str(), env = env.name.as_str());

    let opened = match client.open_environment(&env.org, &env.name, lifetime).await {
        Ok(opened) => opened,
        Err(err) => {
            log_op_error!("open_environment", failure(&err, env), duration_ms = elapsed_ms(start));
            return Err(err);
        }
    };

    if !opened.diagnostics.is_empty() {
        tracing::warn!(
            component = module_path!(),
            op = "open_environment",
            event = envx_core_types::schema::EVENT_DIAGNOSTICS,
            diag_count = opened.diagnostics.len(),
        );
        log_op_end!("open_environment", duration_ms = elapsed_ms(start));
        return Ok(OpenOutcome::Diagnostics(opened.diagnostics));
    }

    let Some(session_id) = opened.session_id else {
        let err = EnvxError::Remote {
            status: 200,
            message: "open response carried neither a session id nor diagnostics".to_string(),
        };
        log_op_error!("open_environment", failure(&err, env), duration_ms = elapsed_ms(start));
        return Err(err);
    };
    log_op_end!(
        "open_environment",
        duration_ms = elapsed_ms(start),
        session_id = session_id.as_str()
    );

    let fetch_start = Instant::now();
    log_op_start!("get_open_environment", session_id = session_id.as_str());
    match client
        .get_open_environment(&env.org, &env.name, &session_id)
        .await
    {
        Ok(environment) => {
            log_op_end!("get_open_environment", duration_ms = elapsed_ms(fetch_start));
            Ok(OpenOutcome::Opened(environment))
        }
        Err(err) => {
            log_op_error!(
                "get_open_environment",
                failure(&err, env),
                duration_ms = elapsed_ms(fetch_start)
            );
            Err(err)
        }
    }
}

/// `err` tagged with the environment it concerns
fn failure(err: &EnvxError, env: &EnvRef) -> ExError {
    ExError::from(err)
        .with_org(env.org.as_str())
        .with_environment(env.name.as_str())
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
