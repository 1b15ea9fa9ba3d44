//! envx engine - command orchestration
//!
//! Coordinates request validation, the remote open flow and rendering for
//! each command, using the sinks and client carried by an
//! [`ExecutionContext`](context::ExecutionContext).

pub mod commands;
pub mod context;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::env_open::{EnvOpenArgs, EnvOpenOutcome, EnvOpenRequest};
pub use context::ExecutionContext;
