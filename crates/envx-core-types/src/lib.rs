//! Types shared by every envx crate that sit below the domain model
//!
//! [`RequestContext`] correlates the log events of one invocation,
//! [`Sensitive`] keeps credentials out of debug output, and [`schema`] names
//! the fields and events those log lines carry.

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId};
pub use sensitive::Sensitive;
