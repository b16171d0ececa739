//! # Persistence Traits
//!
//! Port definitions for the append-only call log.
//!
//! A [`CallLogStore`] hands out [`CallLogTransaction`] scopes. Entries
//! appended within a scope become visible only when the scope commits;
//! a rolled back or dropped scope leaves storage untouched.
//!
//! # Examples
//!
//! ```ignore
//! use api_fanout::infrastructure::persistence::traits::CallLogStore;
//!
//! async fn write(store: &dyn CallLogStore, entries: &[CallLogEntry]) -> PersistenceResult<()> {
//!     let mut tx = store.begin().await?;
//!     tx.append_batch(entries).await?;
//!     tx.commit().await
//! }
//! ```

use crate::domain::entities::call_log::CallLogEntry;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for persistence operations.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query or constraint error.
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Transaction could not be started, committed or rolled back.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistenceError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a transaction error.
    #[must_use]
    pub fn transaction(msg: impl Into<String>) -> Self {
        Self::Transaction(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a connection error.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Store for call log records.
#[async_trait]
pub trait CallLogStore: Send + Sync + fmt::Debug {
    /// Opens a new write scope.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Connection` if the backend is unreachable.
    async fn begin(&self) -> PersistenceResult<Box<dyn CallLogTransaction>>;
}

/// An open write scope on a [`CallLogStore`].
///
/// Dropping a transaction without committing discards its entries.
#[async_trait]
pub trait CallLogTransaction: Send {
    /// Appends all entries to the scope.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is rejected. The scope must then be
    /// rolled back.
    async fn append_batch(&mut self, entries: &[CallLogEntry]) -> PersistenceResult<()>;

    /// Makes every appended entry visible.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Transaction` if the commit fails, in which
    /// case nothing becomes visible.
    async fn commit(self: Box<Self>) -> PersistenceResult<()>;

    /// Discards every appended entry.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Transaction` if the backend reports a
    /// rollback failure.
    async fn rollback(self: Box<Self>) -> PersistenceResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        assert_eq!(
            PersistenceError::query("duplicate key").to_string(),
            "Query error: duplicate key"
        );
        assert_eq!(
            PersistenceError::transaction("commit failed").to_string(),
            "Transaction error: commit failed"
        );
    }

    #[test]
    fn is_connection() {
        assert!(PersistenceError::connection("refused").is_connection());
        assert!(!PersistenceError::internal("x").is_connection());
    }
}
