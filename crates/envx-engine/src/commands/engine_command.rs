//! Engine-level commands that talk to the environment service.

use envx_core::errors::Result;

use crate::commands::env_open::{self, EnvOpenOutcome, EnvOpenRequest};
use crate::context::ExecutionContext;

/// Commands the engine can run against a remote environment.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Open an environment and render it.
    EnvOpen(EnvOpenRequest),
}

/// Result of applying an engine command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommandResult {
    EnvOpen(EnvOpenOutcome),
}

impl EngineCommandResult {
    /// True when the command completed without reporting problems
    pub fn is_success(&self) -> bool {
        match self {
            EngineCommandResult::EnvOpen(outcome) => *outcome == EnvOpenOutcome::Rendered,
        }
    }
}

/// Apply an engine command within `ctx`.
///
/// # Errors
///
/// Returns the command's error unchanged.
pub async fn apply_engine_command(
    cmd: EngineCommand,
    ctx: &mut ExecutionContext<'_>,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::EnvOpen(request) => env_open::execute(ctx, &request)
            .await
            .map(EngineCommandResult::EnvOpen),
    }
}
