//! envx core - environment open, navigation and rendering
//!
//! This crate holds the pieces of an `env open` request that do not depend on
//! a particular transport:
//! - the resolved value tree and its wire encodings
//! - property path parsing and navigation
//! - the two-phase open flow over an [`EnvironmentClient`]
//! - output rendering in the `json`, `detailed`, `dotenv`, `shell` and
//!   `string` formats
//! - diagnostics reporting, errors and structured logging

pub mod client;
pub mod diagnostics;
pub mod environment;
pub mod errors;
pub mod lifetime;
pub mod logging_facility;
pub mod open;
pub mod path;
pub mod render;
pub mod value;

// Used by the exported logging macros
pub use envx_core_types;

// Re-export commonly used types
pub use client::EnvironmentClient;
pub use diagnostics::{write_diagnostics, Diagnostic, Severity};
pub use environment::{EnvRef, Environment, OpenedSession, SessionId};
pub use errors::{EnvxError, ExError, ExErrorKind, Result};
pub use open::{open_environment, OpenOutcome};
pub use path::{PathSegment, PropertyPath};
pub use render::{render, validate_format_for_path, OutputFormat};
pub use value::{Value, ValueKind};
