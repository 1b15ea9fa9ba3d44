//! `env open` pipeline
//!
//! ## Steps (in order):
//! 1. Validate the request: environment reference, lifetime, property path,
//!    output format and its compatibility with the path (no remote calls)
//! 2. Open the environment (diagnostics short-circuit to step 4)
//! 3. Render the selected value to stdout
//! 4. Report diagnostics to stderr

use std::io::Write;
use std::time::{Duration, Instant};

use envx_core::diagnostics::write_diagnostics;
use envx_core::errors::{ExError, Result};
use envx_core::lifetime::{parse_lifetime, DEFAULT_LIFETIME};
use envx_core::render::{render, validate_format_for_path, OutputFormat};
use envx_core::{log_op_end, log_op_error, log_op_start};
use envx_core::{open_environment, EnvRef, OpenOutcome, PropertyPath};

use crate::context::ExecutionContext;

/// Raw `env open` arguments as given on the command line
#[derive(Debug, Clone)]
pub struct EnvOpenArgs {
    /// `[<org>/]<env>`
    pub environment: String,
    pub property_path: Option<String>,
    pub format: String,
    /// `HhMmSs` text; `None` means the default of two hours
    pub lifetime: Option<String>,
    /// Organization used when `environment` has no `<org>/` prefix
    pub default_org: Option<String>,
}

impl EnvOpenArgs {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            property_path: None,
            format: OutputFormat::default().as_str().to_string(),
            lifetime: None,
            default_org: None,
        }
    }
}

/// A validated `env open` request
#[derive(Debug, Clone, PartialEq)]
pub struct EnvOpenRequest {
    pub env: EnvRef,
    pub path: PropertyPath,
    pub format: OutputFormat,
    pub lifetime: Duration,
}

impl EnvOpenRequest {
    /// Validate raw arguments
    ///
    /// # Errors
    ///
    /// Returns the first user input error found, naming the offending input.
    pub fn from_args(args: &EnvOpenArgs) -> Result<Self> {
        let env = EnvRef::parse(&args.environment, args.default_org.as_deref())?;
        let lifetime = match args.lifetime.as_deref() {
            Some(text) => parse_lifetime(text)?,
            None => DEFAULT_LIFETIME,
        };
        let path = match args.property_path.as_deref() {
            Some(text) => PropertyPath::parse(text)?,
            None => PropertyPath::root(),
        };
        let format: OutputFormat = args.format.parse()?;
        validate_format_for_path(format, &path)?;

        Ok(Self {
            env,
            path,
            format,
            lifetime,
        })
    }
}

/// How an `env open` request finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvOpenOutcome {
    /// Output was written to stdout
    Rendered,
    /// The environment has this many diagnostics; they were written to stderr
    Diagnostics(usize),
}

/// Run a validated request
///
/// # Errors
///
/// Returns remote errors unchanged, and `EnvxError::Io` when a sink fails.
pub async fn execute(
    ctx: &mut ExecutionContext<'_>,
    request: &EnvOpenRequest,
) -> Result<EnvOpenOutcome> {
    let start = Instant::now();
    let env_name = request.env.to_string();
    ctx.request_mut().set_environment(env_name.as_str());
    let request_id = ctx.request().request_id.clone();
    log_op_start!(
        "env_open",
        request_id = request_id.as_str(),
        org = request.env.org.as_str(),
        env = request.env.name.as_str(),
        format = request.format.as_str()
    );

    let result = run(ctx, request, &env_name).await;
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &result {
        Ok(outcome) => {
            log_op_end!(
                "env_open",
                duration_ms = duration_ms,
                request_id = request_id.as_str(),
                outcome = ?outcome
            );
        }
        Err(err) => {
            let failure = ExError::from(err)
                .with_op("env_open")
                .with_org(request.env.org.as_str())
                .with_environment(request.env.name.as_str())
                .with_request_id(request_id.clone());
            log_op_error!(
                "env_open",
                failure,
                duration_ms = duration_ms,
                target = ctx.request().environment_label()
            );
        }
    }
    result
}

async fn run(
    ctx: &mut ExecutionContext<'_>,
    request: &EnvOpenRequest,
    env_name: &str,
) -> Result<EnvOpenOutcome> {
    match open_environment(ctx.client(), &request.env, request.lifetime).await? {
        OpenOutcome::Diagnostics(diags) => {
            let out = ctx.stderr();
            write_diagnostics(out, env_name, &diags)?;
            out.flush()?;
            Ok(EnvOpenOutcome::Diagnostics(diags.len()))
        }
        OpenOutcome::Opened(environment) => {
            let out = ctx.stdout();
            render(out, Some(&environment), &request.path, request.format)?;
            out.flush()?;
            Ok(EnvOpenOutcome::Rendered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envx_core::EnvxError;

    fn args(env: &str) -> EnvOpenArgs {
        EnvOpenArgs::new(env)
    }

    #[test]
    fn test_defaults() {
        let request = EnvOpenRequest::from_args(&args("acme/dev")).unwrap();
        assert_eq!(request.env.to_string(), "acme/dev");
        assert!(request.path.is_empty());
        assert_eq!(request.format, OutputFormat::Json);
        assert_eq!(request.lifetime, DEFAULT_LIFETIME);
    }

    #[test]
    fn test_all_fields() {
        let request = EnvOpenRequest::from_args(&EnvOpenArgs {
            environment: "dev".to_string(),
            property_path: Some("app.hosts[0]".to_string()),
            format: "string".to_string(),
            lifetime: Some("15m".to_string()),
            default_org: Some("acme".to_string()),
        })
        .unwrap();

        assert_eq!(request.env.org, "acme");
        assert_eq!(request.path.len(), 3);
        assert_eq!(request.format, OutputFormat::String);
        assert_eq!(request.lifetime, Duration::from_secs(900));
    }

    #[test]
    fn test_unknown_format_names_input() {
        let mut a = args("acme/dev");
        a.format = "bogus".to_string();
        let err = EnvOpenRequest::from_args(&a).unwrap_err();
        assert_eq!(err.to_string(), "unknown output format \"bogus\"");
    }

    #[test]
    fn test_shell_with_path_is_rejected() {
        let mut a = args("acme/dev");
        a.format = "shell".to_string();
        a.property_path = Some("environmentVariables".to_string());
        let err = EnvOpenRequest::from_args(&a).unwrap_err();
        assert!(matches!(err, EnvxError::FormatRequiresWholeTree { .. }));
    }

    #[test]
    fn test_bad_path_names_input() {
        let mut a = args("acme/dev");
        a.property_path = Some("a[".to_string());
        let err = EnvOpenRequest::from_args(&a).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid property path a[: missing closing bracket in array index"
        );
    }

    #[test]
    fn test_bad_lifetime_is_rejected() {
        let mut a = args("acme/dev");
        a.lifetime = Some("forever".to_string());
        assert!(matches!(
            EnvOpenRequest::from_args(&a),
            Err(EnvxError::InvalidLifetime { .. })
        ));
    }
}
