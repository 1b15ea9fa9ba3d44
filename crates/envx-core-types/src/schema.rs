//! Field keys and event names shared by every `envx` log line

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_REQUEST_ID: &str = "request_id";

/// An operation began
pub const EVENT_START: &str = "start";
/// An operation finished successfully
pub const EVENT_END: &str = "end";
/// An operation failed; carries `err_kind`, `err_code` and `err_message`
pub const EVENT_END_ERROR: &str = "end_error";
/// The service rejected an open request with diagnostics
pub const EVENT_DIAGNOSTICS: &str = "diagnostics";
