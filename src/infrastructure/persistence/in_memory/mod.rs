//! # In-Memory Persistence
//!
//! In-memory implementations for testing without database dependencies.
//!
//! - [`InMemoryCallLogStore`]: transactional call log with fault injection

pub mod call_log_store;

pub use call_log_store::{FaultPlan, InMemoryCallLogStore};
