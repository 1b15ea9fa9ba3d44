//! Environment references, sessions and resolved documents

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::errors::{EnvxError, Result};
use crate::value::{ObjectMap, Value, ValueKind};

/// Top-level property holding the variables exported by `dotenv`/`shell`
pub const ENVIRONMENT_VARIABLES_KEY: &str = "environmentVariables";

/// A fully qualified `<org>/<env>` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvRef {
    pub org: String,
    pub name: String,
}

impl EnvRef {
    /// Parse `[<org>/]<env>`, falling back to `default_org` when no org is given
    ///
    /// # Errors
    ///
    /// Returns `EnvxError::InvalidEnvironmentRef` for an empty org or name,
    /// or when no org is given and there is no default.
    pub fn parse(input: &str, default_org: Option<&str>) -> Result<Self> {
        let invalid = |reason: &str| EnvxError::InvalidEnvironmentRef {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (org, name) = match input.split_once('/') {
            Some((org, name)) => (org.to_string(), name),
            None => {
                let org = default_org
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .ok_or_else(|| invalid("no organization given and no default organization configured"))?;
                (org.to_string(), input)
            }
        };

        if org.is_empty() {
            return Err(invalid("organization name is empty"));
        }
        if name.is_empty() {
            return Err(invalid("environment name is empty"));
        }
        if name.contains('/') {
            return Err(invalid("environment name may not contain '/'"));
        }

        Ok(Self {
            org,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for EnvRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.name)
    }
}

/// Opaque handle binding an open request to its fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response of the open call
///
/// When `diagnostics` is non-empty the session must not be fetched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenedSession {
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl OpenedSession {
    pub fn opened(session_id: SessionId) -> Self {
        Self {
            session_id: Some(session_id),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            session_id: None,
            diagnostics,
        }
    }
}

/// A resolved environment document
///
/// Only `properties` is consumed; other members of the service response are
/// ignored.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Environment {
    #[serde(default, deserialize_with = "crate::value::deserialize_detailed_members")]
    properties: ObjectMap,
}

impl Environment {
    pub fn new(properties: ObjectMap) -> Self {
        Self { properties }
    }

    /// Build an environment from a plain JSON object's members
    ///
    /// # Errors
    ///
    /// Returns `EnvxError::Serialization` if `text` is not a JSON object.
    pub fn from_plain(text: &str) -> Result<Self> {
        let root = crate::value::parse_plain(text)?;
        match root.kind() {
            ValueKind::Object(map) => Ok(Self::new(map.clone())),
            other => Err(EnvxError::Serialization {
                message: format!("environment must be an object, found {}", other.type_name()),
            }),
        }
    }

    pub fn properties(&self) -> &ObjectMap {
        &self.properties
    }

    /// The whole property tree as a single object value
    pub fn to_value(&self) -> Value {
        Value::new(ValueKind::Object(self.properties.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_ref_with_org() {
        let r = EnvRef::parse("acme/dev", None).unwrap();
        assert_eq!(r.org, "acme");
        assert_eq!(r.name, "dev");
        assert_eq!(r.to_string(), "acme/dev");
    }

    #[test]
    fn test_env_ref_uses_default_org() {
        let r = EnvRef::parse("dev", Some("acme")).unwrap();
        assert_eq!(r.to_string(), "acme/dev");
    }

    #[test]
    fn test_env_ref_errors_name_input() {
        for (input, default_org) in [("dev", None), ("/dev", None), ("acme/", None), ("a/b/c", None), ("dev", Some(" "))] {
            let err = EnvRef::parse(input, default_org).unwrap_err();
            assert!(matches!(err, EnvxError::InvalidEnvironmentRef { .. }));
            assert!(err.to_string().contains(input));
        }
    }

    #[test]
    fn test_opened_session_decode() {
        let opened: OpenedSession = serde_json::from_str(r#"{"id": "s-123"}"#).unwrap();
        assert_eq!(opened.session_id, Some(SessionId::new("s-123")));
        assert!(opened.diagnostics.is_empty());

        let failed: OpenedSession =
            serde_json::from_str(r#"{"diagnostics": [{"summary": "cycle"}]}"#).unwrap();
        assert!(failed.session_id.is_none());
        assert_eq!(failed.diagnostics.len(), 1);
    }

    #[test]
    fn test_environment_decode_keeps_property_order() {
        let text = r#"{
            "exprs": {"ignored": true},
            "properties": {
                "zone": {"value": "us-east-1"},
                "app": {"value": {"name": {"value": "api"}}}
            }
        }"#;
        let env: Environment = serde_json::from_str(text).unwrap();

        assert_eq!(env.properties().keys().collect::<Vec<_>>(), vec!["zone", "app"]);
        assert_eq!(
            env.to_value().get("app").and_then(|a| a.get("name")).and_then(Value::as_str),
            Some("api")
        );
    }

    #[test]
    fn test_environment_decode_missing_properties() {
        let env: Environment = serde_json::from_str("{}").unwrap();
        assert!(env.properties().is_empty());
    }

    #[test]
    fn test_environment_from_plain_rejects_non_object() {
        assert!(Environment::from_plain("[1]").is_err());
    }
}
