//! Error helpers for the HTTP client
//!
//! Maps transport and response failures onto `EnvxError`

use envx_core::errors::EnvxError;
use serde::Deserialize;

/// Create a configuration error
pub fn configuration(reason: impl Into<String>) -> EnvxError {
    EnvxError::Configuration {
        message: reason.into(),
    }
}

/// Create a transport error from reqwest::Error
pub fn from_reqwest(err: reqwest::Error) -> EnvxError {
    EnvxError::Transport {
        message: err.to_string(),
    }
}

/// Create an error for a response body that did not decode
pub fn invalid_response(op: &str, err: serde_json::Error) -> EnvxError {
    EnvxError::Serialization {
        message: format!("invalid {} response: {}", op, err),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Create a remote error for a non-success status
///
/// Uses the service's `message` when the body carries one, otherwise the
/// body text, otherwise the status reason.
pub fn remote(status: reqwest::StatusCode, body: &[u8]) -> EnvxError {
    let from_json = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty());
    let message = from_json
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    EnvxError::Remote {
        status: status.as_u16(),
        message,
    }
}
