//! Env command
//!
//! Usage: envx env open [<org>/]<env> [property-path] [--format <FORMAT>] [--lifetime <HhMm>]

use clap::{Args, Subcommand};
use envx_client::{ClientConfig, HttpEnvironmentClient};
use envx_core::EnvxError;
use envx_engine::{
    apply_engine_command, EngineCommand, EnvOpenArgs, EnvOpenRequest, ExecutionContext,
};

/// Variable holding the service access token
pub const ACCESS_TOKEN_VAR: &str = "ENVX_ACCESS_TOKEN";

#[derive(Debug, Args)]
pub struct EnvArgs {
    /// Base URL of the environment service
    #[arg(long, env = "ENVX_BACKEND_URL", global = true)]
    pub backend_url: Option<String>,

    /// Organization used when the environment name has no `<org>/` prefix
    #[arg(long, env = "ENVX_ORG", global = true)]
    pub org: Option<String>,

    #[command(subcommand)]
    pub command: EnvCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnvCommand {
    /// Open the environment with the given name and print the result
    ///
    /// The result is written to stdout as JSON unless another format is
    /// chosen. If a property path is given, only that property is printed.
    Open(EnvOpenCliArgs),
}

#[derive(Debug, Args)]
pub struct EnvOpenCliArgs {
    /// `[<org>/]<env>` followed by an optional property path
    #[arg(value_name = "ARGS", num_args = 0..=2)]
    pub args: Vec<String>,

    /// Environment to open; when set, the only positional argument is the property path
    #[arg(long = "env", value_name = "ENVIRONMENT")]
    pub env: Option<String>,

    /// Output format: json, detailed, dotenv, shell or string
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Lifetime of the opened environment in the form HhMm (e.g. 2h, 1h30m, 15m)
    #[arg(short, long, default_value = "2h")]
    pub lifetime: String,
}

/// Execute env command, returning the process exit code
pub async fn execute(args: EnvArgs) -> Result<i32, Box<dyn std::error::Error>> {
    match args.command {
        EnvCommand::Open(ref open_args) => execute_open(&args, open_args).await,
    }
}

/// Split positional arguments into environment and property path
fn split_positionals(cli: &EnvOpenCliArgs) -> Result<(String, Option<String>), String> {
    match (&cli.env, cli.args.as_slice()) {
        (Some(env), []) => Ok((env.clone(), None)),
        (Some(env), [path]) => Ok((env.clone(), Some(path.clone()))),
        (Some(_), _) => Err("too many arguments: only a property path may follow --env".to_string()),
        (None, []) => Err("no environment name specified".to_string()),
        (None, [env]) => Ok((env.clone(), None)),
        (None, [env, path, ..]) => Ok((env.clone(), Some(path.clone()))),
    }
}

async fn execute_open(
    args: &EnvArgs,
    cli: &EnvOpenCliArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    // Validate everything the user typed before touching configuration or the network
    let (environment, property_path) = split_positionals(cli)?;
    let request = EnvOpenRequest::from_args(&EnvOpenArgs {
        environment,
        property_path,
        format: cli.format.clone(),
        lifetime: Some(cli.lifetime.clone()),
        default_org: args.org.clone(),
    })?;

    let backend_url = args.backend_url.as_deref().ok_or_else(|| EnvxError::Configuration {
        message: "no backend URL configured; set ENVX_BACKEND_URL or pass --backend-url"
            .to_string(),
    })?;
    let access_token = std::env::var(ACCESS_TOKEN_VAR).map_err(|_| EnvxError::Configuration {
        message: format!("no access token configured; set {}", ACCESS_TOKEN_VAR),
    })?;
    let client = HttpEnvironmentClient::new(ClientConfig::new(backend_url, access_token)?)?;

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let mut ctx = ExecutionContext::new(&client, &mut stdout, &mut stderr);

    let result = tokio::select! {
        result = apply_engine_command(EngineCommand::EnvOpen(request), &mut ctx) => result?,
        _ = tokio::signal::ctrl_c() => return Err(EnvxError::Cancelled.into()),
    };

    // Diagnostics were already reported on stderr
    Ok(if result.is_success() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str], env: Option<&str>) -> EnvOpenCliArgs {
        EnvOpenCliArgs {
            args: args.iter().map(|s| s.to_string()).collect(),
            env: env.map(str::to_string),
            format: "json".to_string(),
            lifetime: "2h".to_string(),
        }
    }

    #[test]
    fn test_positional_environment_and_path() {
        assert_eq!(
            split_positionals(&cli(&["acme/dev", "a.b"], None)).unwrap(),
            ("acme/dev".to_string(), Some("a.b".to_string()))
        );
        assert_eq!(
            split_positionals(&cli(&["acme/dev"], None)).unwrap(),
            ("acme/dev".to_string(), None)
        );
    }

    #[test]
    fn test_env_flag_takes_path_positional() {
        assert_eq!(
            split_positionals(&cli(&["a.b"], Some("acme/dev"))).unwrap(),
            ("acme/dev".to_string(), Some("a.b".to_string()))
        );
        assert!(split_positionals(&cli(&["x", "y"], Some("acme/dev"))).is_err());
    }

    #[test]
    fn test_missing_environment() {
        assert_eq!(
            split_positionals(&cli(&[], None)).unwrap_err(),
            "no environment name specified"
        );
    }
}
