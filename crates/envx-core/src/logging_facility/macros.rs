//! Operation boundary macros
//!
//! Each operation logs exactly one `start` and then either one `end` or one
//! `end_error`. Extra fields pass straight through to `tracing`.

#[doc(hidden)]
#[macro_export]
macro_rules! __op_event {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::envx_core_types::schema::$event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use envx_core::log_op_start;
/// log_op_start!("open_environment", org = "acme", env = "dev");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(info, $op, EVENT_START $(, $($field)*)?);
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use envx_core::log_op_end;
/// log_op_end!("render", duration_ms = 3, line_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(info, $op, EVENT_END, duration_ms = $duration $(, $($field)*)?);
    };
}

/// Log a failed operation
///
/// `$err` is anything convertible into `ExError`, such as `EnvxError`,
/// `&EnvxError` or an `ExError` with context attached. Context the error
/// carries (org, env, status, request id) is logged alongside its code.
///
/// ```
/// # use envx_core::{log_op_error, errors::{EnvxError, ExError}};
/// log_op_error!("get_open_environment", &EnvxError::Cancelled, duration_ms = 10);
///
/// let err = ExError::from(EnvxError::Cancelled).with_org("acme").with_environment("dev");
/// log_op_error!("open_environment", err, duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__op_event!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            org = ex_err.org(),
            env = ex_err.environment(),
            status = ex_err.status(),
            request_id = ex_err.request_id().map(|id| id.as_str())
            $(, $($field)*)?
        );
    }};
}
