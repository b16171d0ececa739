//! # PostgreSQL Persistence
//!
//! sqlx-backed implementations.

pub mod call_log_store;

pub use call_log_store::PostgresCallLogStore;
