//! Environment diagnostics
//!
//! Diagnostics describe problems with environment *content* (unresolved
//! references, cycles, schema violations) found while the service evaluates
//! an environment. They are not errors: they arrive on a separate channel
//! from the open call and stop the request before anything is fetched or
//! rendered.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::value::Range;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A structured message about environment content
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(default)]
    pub severity: Severity,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Property path inside the environment definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
}

impl Diagnostic {
    /// Error-severity diagnostic with just a summary
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Location prefix: source range if known, else the property path
    pub fn location(&self) -> Option<String> {
        self.range
            .as_ref()
            .map(Range::to_string)
            .or_else(|| self.path.clone())
    }
}

/// Write diagnostics for `env_name`, one per line, followed by a count line
///
/// ```text
/// error: acme/dev:4:9: unknown property reference "db.host"
/// warning: values.port: value is deprecated
///     use values.ports instead
/// acme/dev has 2 diagnostics
/// ```
///
/// # Errors
///
/// Returns `EnvxError::Io` if the sink fails.
pub fn write_diagnostics<W: Write + ?Sized>(
    out: &mut W,
    env_name: &str,
    diags: &[Diagnostic],
) -> Result<()> {
    for diag in diags {
        match diag.location() {
            Some(location) => writeln!(
                out,
                "{}: {}: {}",
                diag.severity.as_str(),
                location,
                diag.summary
            )?,
            None => writeln!(out, "{}: {}", diag.severity.as_str(), diag.summary)?,
        }
        if let Some(detail) = diag.detail.as_deref().filter(|d| !d.is_empty()) {
            for line in detail.lines() {
                writeln!(out, "    {}", line)?;
            }
        }
    }
    let noun = if diags.len() == 1 {
        "diagnostic"
    } else {
        "diagnostics"
    };
    writeln!(out, "{} has {} {}", env_name, diags.len(), noun)?;
    Ok(())
}
