//! # Persistence Layer
//!
//! Append-only call log storage.
//!
//! ## Ports
//!
//! - [`CallLogStore`]: opens transactional write scopes
//! - [`CallLogTransaction`]: one all-or-nothing batch write
//!
//! ## Implementations
//!
//! - `in_memory`: in-memory store with fault injection, for tests
//! - `postgres`: PostgreSQL store using sqlx

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use in_memory::{FaultPlan, InMemoryCallLogStore};
pub use postgres::PostgresCallLogStore;
pub use traits::{CallLogStore, CallLogTransaction, PersistenceError, PersistenceResult};
