use envx_core::{Environment, OutputFormat, PropertyPath};

/// Build an environment from plain JSON text
#[allow(dead_code)]
pub fn env_from(text: &str) -> Environment {
    Environment::from_plain(text).unwrap()
}

/// Render into a string, parsing `path` and `format` first
#[allow(dead_code)]
pub fn render_to_string(env: &Environment, path: &str, format: &str) -> String {
    let path = PropertyPath::parse(path).unwrap();
    let format: OutputFormat = format.parse().unwrap();
    let mut out = Vec::new();
    envx_core::render(&mut out, Some(env), &path, format).unwrap();
    String::from_utf8(out).unwrap()
}

/// A small environment with nested values, secrets and variables
#[allow(dead_code)]
pub fn sample_env() -> Environment {
    env_from(
        r#"{
            "app": {"name": "api", "replicas": 3, "debug": false},
            "hosts": ["a.internal", "b.internal"],
            "environmentVariables": {
                "REGION": "us-west-2",
                "DB_URL": "postgres://db:5432/app",
                "PORT": 8080
            }
        }"#,
    )
}
