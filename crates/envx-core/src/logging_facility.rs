//! Logging for envx
//!
//! Call [`init`] once from `main`; operations then report their boundaries
//! with [`log_op_start!`](crate::log_op_start), [`log_op_end!`](crate::log_op_end)
//! and [`log_op_error!`](crate::log_op_error). Log output always goes to
//! stderr because stdout carries the rendered environment.
//!
//! Tests call [`init_test_capture`] instead and assert on the recorded events.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
