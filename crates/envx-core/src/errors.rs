use envx_core_types::RequestId;
use thiserror::Error;

/// Result type alias using EnvxError
pub type Result<T> = std::result::Result<T, EnvxError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // User input (detected before any remote call)
    InvalidPropertyPath,
    UnknownFormat,
    IncompatibleFormat,
    InvalidEnvironmentRef,
    InvalidLifetime,

    // Remote service
    Transport,
    Remote,
    NotFound,
    Unauthorised,
    Cancelled,

    // Integration/IO
    Io,
    Serialization,
    Configuration,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidPropertyPath => "ERR_INVALID_PROPERTY_PATH",
            ExErrorKind::UnknownFormat => "ERR_UNKNOWN_FORMAT",
            ExErrorKind::IncompatibleFormat => "ERR_INCOMPATIBLE_FORMAT",
            ExErrorKind::InvalidEnvironmentRef => "ERR_INVALID_ENVIRONMENT_REF",
            ExErrorKind::InvalidLifetime => "ERR_INVALID_LIFETIME",
            ExErrorKind::Transport => "ERR_TRANSPORT",
            ExErrorKind::Remote => "ERR_REMOTE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
        }
    }

    /// True for errors raised while validating user input
    ///
    /// These are always detected before the remote service is contacted.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidPropertyPath
                | ExErrorKind::UnknownFormat
                | ExErrorKind::IncompatibleFormat
                | ExErrorKind::InvalidEnvironmentRef
                | ExErrorKind::InvalidLifetime
        )
    }
}

/// Canonical structured error type
///
/// Structured representation of an error with classification fields for
/// programmatic handling and context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    org: Option<String>,
    environment: Option<String>,
    status: Option<u16>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            org: None,
            environment: None,
            status: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add organization context
    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    /// Add environment name context
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Add HTTP status context
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the organization context, if any
    pub fn org(&self) -> Option<&str> {
        self.org.as_deref()
    }

    /// Get the environment context, if any
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Get the HTTP status context, if any
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        match (&self.org, &self.environment) {
            (Some(org), Some(env)) => write!(f, " (environment: {}/{})", org, env)?,
            (None, Some(env)) => write!(f, " (environment: {})", env)?,
            (Some(org), None) => write!(f, " (org: {})", org)?,
            (None, None) => {}
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for envx operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvxError {
    // ===== User Input Errors =====
    /// Property path text could not be parsed
    #[error("invalid property path {input}: {reason}")]
    InvalidPropertyPath { input: String, reason: String },

    /// Output format identifier is not one of the supported set
    #[error("unknown output format \"{format}\"")]
    UnknownOutputFormat { format: String },

    /// Whole-tree format combined with a property path
    #[error("output format '{format}' may not be used with a property path")]
    FormatRequiresWholeTree { format: String },

    /// `[<org>/]<env>` reference could not be parsed
    #[error("invalid environment reference {input:?}: {reason}")]
    InvalidEnvironmentRef { input: String, reason: String },

    /// Session lifetime text could not be parsed
    #[error("invalid lifetime {input:?}: {reason}")]
    InvalidLifetime { input: String, reason: String },

    // ===== Remote Errors =====
    /// Network or protocol failure talking to the remote service
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The remote service answered with a non-success status
    #[error("remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The in-flight request was cancelled by the caller
    #[error("operation cancelled")]
    Cancelled,

    // ===== Generic Errors =====
    /// Client configuration is missing or invalid
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("serialization error: {message}")]
    Serialization { message: String },

    /// Output sink failure
    #[error("io error: {message}")]
    Io { message: String },
}

impl EnvxError {
    /// True for errors raised while validating user input
    pub fn is_user_input(&self) -> bool {
        ExError::from(self.clone()).kind().is_user_input()
    }
}

impl From<std::io::Error> for EnvxError {
    fn from(err: std::io::Error) -> Self {
        EnvxError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EnvxError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            EnvxError::Io {
                message: err.to_string(),
            }
        } else {
            EnvxError::Serialization {
                message: err.to_string(),
            }
        }
    }
}

/// Conversion from EnvxError to ExError
impl From<EnvxError> for ExError {
    fn from(err: EnvxError) -> Self {
        match err {
            EnvxError::InvalidPropertyPath { input, reason } => {
                ExError::new(ExErrorKind::InvalidPropertyPath)
                    .with_op("parse_property_path")
                    .with_message(format!("invalid property path {}: {}", input, reason))
            }
            EnvxError::UnknownOutputFormat { format } => ExError::new(ExErrorKind::UnknownFormat)
                .with_op("parse_output_format")
                .with_message(format!("unknown output format \"{}\"", format)),
            EnvxError::FormatRequiresWholeTree { format } => {
                ExError::new(ExErrorKind::IncompatibleFormat)
                    .with_op("validate_format_for_path")
                    .with_message(format!(
                        "output format '{}' may not be used with a property path",
                        format
                    ))
            }
            EnvxError::InvalidEnvironmentRef { input, reason } => {
                ExError::new(ExErrorKind::InvalidEnvironmentRef)
                    .with_op("parse_env_ref")
                    .with_message(format!("{:?}: {}", input, reason))
            }
            EnvxError::InvalidLifetime { input, reason } => {
                ExError::new(ExErrorKind::InvalidLifetime)
                    .with_op("parse_lifetime")
                    .with_message(format!("{:?}: {}", input, reason))
            }
            EnvxError::Transport { message } => {
                ExError::new(ExErrorKind::Transport).with_message(message)
            }
            EnvxError::Remote { status, message } => {
                let kind = match status {
                    401 | 403 => ExErrorKind::Unauthorised,
                    404 => ExErrorKind::NotFound,
                    _ => ExErrorKind::Remote,
                };
                ExError::new(kind).with_status(status).with_message(message)
            }
            EnvxError::Cancelled => {
                ExError::new(ExErrorKind::Cancelled).with_message("operation cancelled")
            }
            EnvxError::Configuration { message } => {
                ExError::new(ExErrorKind::Configuration).with_message(message)
            }
            EnvxError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            EnvxError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<&EnvxError> for ExError {
    fn from(err: &EnvxError) -> Self {
        ExError::from(err.clone())
    }
}
