// End-to-end tests for `envx env open`
// Runs the built binary in an isolated directory; remote calls go to a
// scripted local server

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::{Command, Output};
use std::thread::{self, JoinHandle};

use tempfile::TempDir;

/// Run `envx` in `dir` with a clean ENVX_* environment plus `vars`
fn envx(dir: &TempDir, args: &[&str], vars: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_envx"));
    cmd.current_dir(dir.path()).args(args);
    for var in [
        "ENVX_BACKEND_URL",
        "ENVX_ACCESS_TOKEN",
        "ENVX_ORG",
        "ENVX_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    for (key, value) in vars {
        cmd.env(key, value);
    }
    cmd.output().unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}

/// Serve one canned JSON response per connection; yields the request lines
fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut request_lines = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let head = text(&buf);
            request_lines.push(head.lines().next().unwrap_or_default().to_string());

            write!(
                socket,
                "HTTP/1.1 {} Scripted\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
        }
        request_lines
    });

    (base, handle)
}

#[test]
fn test_bogus_format_fails_before_configuration() {
    let dir = TempDir::new().unwrap();

    let output = envx(&dir, &["env", "open", "acme/dev", "--format", "bogus"], &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = text(&output.stderr);
    assert!(stderr.contains("unknown output format \"bogus\""), "{}", stderr);
    assert!(!stderr.contains("backend URL"), "{}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_dotenv_with_path_is_rejected() {
    let dir = TempDir::new().unwrap();

    let output = envx(
        &dir,
        &["env", "open", "acme/dev", "environmentVariables", "-f", "dotenv"],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr)
        .contains("output format 'dotenv' may not be used with a property path"));
}

#[test]
fn test_invalid_path_names_input() {
    let dir = TempDir::new().unwrap();

    let output = envx(&dir, &["env", "open", "acme/dev", "a[zz]"], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("invalid property path a[zz]: invalid array index"));
}

#[test]
fn test_missing_backend_url_is_configuration_error() {
    let dir = TempDir::new().unwrap();

    let output = envx(&dir, &["env", "open", "acme/dev"], &[("ENVX_ACCESS_TOKEN", "tok")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("no backend URL configured"));
}

#[test]
fn test_dotenv_file_in_working_directory_is_loaded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "ENVX_BACKEND_URL=ftp://files.example.com\nENVX_ACCESS_TOKEN=tok\n",
    )
    .unwrap();

    let output = envx(&dir, &["env", "open", "acme/dev"], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("must be an http or https URL"));
}

#[test]
fn test_open_and_render_dotenv() {
    let dir = TempDir::new().unwrap();
    let (base, server) = serve(vec![
        (200, r#"{"id": "s-1"}"#),
        (
            200,
            r#"{"properties": {"environmentVariables": {"value": {"B": {"value": "2"}, "A": {"value": "1"}}}}}"#,
        ),
    ]);

    let output = envx(
        &dir,
        &["env", "open", "dev", "--format", "dotenv", "--lifetime", "30m"],
        &[
            ("ENVX_BACKEND_URL", &base),
            ("ENVX_ACCESS_TOKEN", "tok"),
            ("ENVX_ORG", "acme"),
        ],
    );

    assert_eq!(output.status.code(), Some(0), "{}", text(&output.stderr));
    assert_eq!(text(&output.stdout), "A=\"1\"\nB=\"2\"\n");

    let requests = server.join().unwrap();
    assert_eq!(
        requests[0],
        "POST /api/preview/environments/acme/dev/open?duration=30m0s HTTP/1.1"
    );
    assert_eq!(
        requests[1],
        "GET /api/preview/environments/acme/dev/open/s-1 HTTP/1.1"
    );
}

#[test]
fn test_diagnostics_exit_non_zero_without_output() {
    let dir = TempDir::new().unwrap();
    let (base, server) = serve(vec![(
        400,
        r#"{"code": 400, "message": "invalid environment", "diagnostics": [{"summary": "unknown property reference \"db\"", "path": "values.url"}]}"#,
    )]);

    let output = envx(
        &dir,
        &["env", "open", "acme/dev", "values"],
        &[
            ("ENVX_BACKEND_URL", &base),
            ("ENVX_ACCESS_TOKEN", "tok"),
            ("RUST_LOG", "off"),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert_eq!(
        text(&output.stderr),
        "error: values.url: unknown property reference \"db\"\nacme/dev has 1 diagnostic\n"
    );
    assert_eq!(server.join().unwrap().len(), 1);
}
