//! # Domain Entities
//!
//! - [`CallResult`]: normalized outcome of one provider call
//! - [`CallLogEntry`] / [`CallLogRecord`]: persisted projection of a call result

pub mod call_log;
pub mod call_result;

pub use call_log::{CallLogEntry, CallLogRecord};
pub use call_result::{CallResult, OutcomeKind, TIMEOUT_MESSAGE};
