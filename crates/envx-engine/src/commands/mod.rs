//! Command orchestration layer.
//!
//! Validates user requests, runs them against the environment service and
//! writes results to the context's sinks.

pub mod engine_command;
pub mod env_open;
