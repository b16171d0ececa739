//! # Result Sink
//!
//! Persists the results of one dispatch as a single atomic batch.
//!
//! Either every result of the batch is committed or none is. Persistence
//! failures never reach the caller: they roll the transaction back and are
//! reported through `tracing`.

use crate::domain::entities::call_log::CallLogEntry;
use crate::domain::entities::call_result::CallResult;
use crate::infrastructure::persistence::traits::{CallLogStore, PersistenceResult};
use std::sync::Arc;

/// Writes call results to a [`CallLogStore`].
#[derive(Debug, Clone)]
pub struct ResultSink {
    store: Arc<dyn CallLogStore>,
}

impl ResultSink {
    /// Creates a sink over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CallLogStore>) -> Self {
        Self { store }
    }

    /// Persists `results` in one transaction.
    ///
    /// On any failure the whole batch is discarded and an error is logged.
    pub async fn persist(&self, results: &[CallResult]) {
        if results.is_empty() {
            return;
        }

        if let Err(e) = self.try_persist(results).await {
            tracing::error!(
                batch_size = results.len(),
                error = %e,
                "failed to persist call results; batch discarded"
            );
        }
    }

    async fn try_persist(&self, results: &[CallResult]) -> PersistenceResult<()> {
        let entries: Vec<CallLogEntry> = results.iter().map(CallLogEntry::from).collect();

        let mut tx = self.store.begin().await?;
        if let Err(e) = tx.append_batch(&entries).await {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::warn!(error = %rollback_error, "rollback failed");
            }
            return Err(e);
        }
        tx.commit().await?;

        tracing::debug!(batch_size = entries.len(), "call results persisted");
        Ok(())
    }
}
