//! Output rendering
//!
//! Turns a resolved environment, a property path and an output format into
//! bytes on a sink. Format and path compatibility is checked separately by
//! [`validate_format_for_path`] so callers can reject bad requests before
//! contacting the service.

mod dotenv;
mod json;
mod quote;
mod string;

use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::time::Instant;

pub use dotenv::environment_variables;
pub use json::PlainJson;
pub use quote::quote;
pub use string::{to_display_string, UNKNOWN_TEXT};

use crate::environment::Environment;
use crate::errors::{EnvxError, Result};
use crate::path::{resolve, PropertyPath};
use crate::{log_op_end, log_op_error, log_op_start};

/// Supported output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Plain JSON of the selected value
    #[default]
    Json,
    /// JSON including secret/unknown flags and provenance
    Detailed,
    /// `NAME="value"` lines from `environmentVariables`
    Dotenv,
    /// `export NAME="value"` lines from `environmentVariables`
    Shell,
    /// The selected value flattened to one line of text
    String,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Json,
        OutputFormat::Detailed,
        OutputFormat::Dotenv,
        OutputFormat::Shell,
        OutputFormat::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Detailed => "detailed",
            OutputFormat::Dotenv => "dotenv",
            OutputFormat::Shell => "shell",
            OutputFormat::String => "string",
        }
    }

    /// Formats that always render the whole environment
    pub fn requires_whole_tree(&self) -> bool {
        matches!(self, OutputFormat::Dotenv | OutputFormat::Shell)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = EnvxError;

    fn from_str(s: &str) -> Result<Self> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| EnvxError::UnknownOutputFormat {
                format: s.to_string(),
            })
    }
}

/// Reject format and path combinations that cannot be rendered
///
/// # Errors
///
/// Returns `EnvxError::FormatRequiresWholeTree` when `dotenv` or `shell` is
/// paired with a non-empty path.
pub fn validate_format_for_path(format: OutputFormat, path: &PropertyPath) -> Result<()> {
    if format.requires_whole_tree() && !path.is_empty() {
        return Err(EnvxError::FormatRequiresWholeTree {
            format: format.as_str().to_string(),
        });
    }
    Ok(())
}

/// Render `env` to `out`
///
/// `None` renders nothing. A path that misses renders the undefined value.
/// `dotenv` and `shell` ignore `path`.
///
/// # Errors
///
/// Returns `EnvxError::Io` when the sink fails and
/// `EnvxError::Serialization` when JSON encoding fails.
pub fn render<W: Write + ?Sized>(
    out: &mut W,
    env: Option<&Environment>,
    path: &PropertyPath,
    format: OutputFormat,
) -> Result<()> {
    let Some(env) = env else {
        return Ok(());
    };

    let start = Instant::now();
    let path_text = path.to_string();
    log_op_start!("render", format = format.as_str(), path = path_text.as_str());

    let result = write_format(out, env, path, format);
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &result {
        Ok(()) => {
            log_op_end!("render", duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!("render", err, duration_ms = duration_ms);
        }
    }
    result
}

fn write_format<W: Write + ?Sized>(
    out: &mut W,
    env: &Environment,
    path: &PropertyPath,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Dotenv => dotenv::write_variables(out, env, false).map(drop),
        OutputFormat::Shell => dotenv::write_variables(out, env, true).map(drop),
        OutputFormat::Json | OutputFormat::Detailed | OutputFormat::String => {
            let (value, found) = resolve(&env.to_value(), path);
            if !found {
                tracing::debug!(path = %path, "property path did not match");
            }
            match format {
                OutputFormat::Json => json::write_plain(out, &value),
                OutputFormat::Detailed => json::write_detailed(out, &value),
                _ => {
                    writeln!(out, "{}", to_display_string(&value))?;
                    Ok(())
                }
            }
        }
    }
}
