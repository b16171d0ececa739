//! # In-Memory Call Log Store
//!
//! In-memory implementation of [`CallLogStore`] for testing and local runs.
//!
//! Entries are staged inside each transaction and published to shared
//! storage on commit, with a server-assigned id and creation time. A
//! [`FaultPlan`] injects failures at begin, at a given record of a batch,
//! at commit, or at rollback.

use crate::domain::entities::call_log::{CallLogEntry, CallLogRecord};
use crate::domain::value_objects::{LogId, Timestamp};
use crate::infrastructure::persistence::traits::{
    CallLogStore, CallLogTransaction, PersistenceError, PersistenceResult,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Failures to inject into transactions opened after the plan is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultPlan {
    /// Fail when a transaction is opened.
    pub fail_on_begin: bool,
    /// Fail when appending the record at this index of a batch.
    pub fail_on_record: Option<usize>,
    /// Fail at commit.
    pub fail_on_commit: bool,
    /// Fail at rollback.
    pub fail_on_rollback: bool,
}

impl FaultPlan {
    /// A plan that injects nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Fails every `begin`.
    #[must_use]
    pub fn fail_on_begin() -> Self {
        Self {
            fail_on_begin: true,
            ..Self::default()
        }
    }

    /// Fails when the record at `index` is appended.
    #[must_use]
    pub fn fail_on_record(index: usize) -> Self {
        Self {
            fail_on_record: Some(index),
            ..Self::default()
        }
    }

    /// Fails every commit.
    #[must_use]
    pub fn fail_on_commit() -> Self {
        Self {
            fail_on_commit: true,
            ..Self::default()
        }
    }

    /// Also fails the rollback that follows a failure.
    #[must_use]
    pub fn with_failing_rollback(mut self) -> Self {
        self.fail_on_rollback = true;
        self
    }
}

/// In-memory implementation of [`CallLogStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCallLogStore {
    committed: Arc<RwLock<Vec<CallLogRecord>>>,
    faults: Arc<RwLock<FaultPlan>>,
}

impl InMemoryCallLogStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that injects the given faults.
    #[must_use]
    pub fn with_faults(plan: FaultPlan) -> Self {
        Self {
            committed: Arc::default(),
            faults: Arc::new(RwLock::new(plan)),
        }
    }

    /// Replaces the fault plan for subsequently opened transactions.
    pub async fn set_faults(&self, plan: FaultPlan) {
        *self.faults.write().await = plan;
    }

    /// Returns a snapshot of every committed record, in commit order.
    pub async fn records(&self) -> Vec<CallLogRecord> {
        self.committed.read().await.clone()
    }

    /// Returns the number of committed records.
    pub async fn len(&self) -> usize {
        self.committed.read().await.len()
    }

    /// Returns true if nothing has been committed.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CallLogStore for InMemoryCallLogStore {
    async fn begin(&self) -> PersistenceResult<Box<dyn CallLogTransaction>> {
        let faults = *self.faults.read().await;
        if faults.fail_on_begin {
            return Err(PersistenceError::connection("simulated connection loss"));
        }

        Ok(Box::new(InMemoryCallLogTransaction {
            committed: Arc::clone(&self.committed),
            staged: Vec::new(),
            faults,
        }))
    }
}

/// Transaction handed out by [`InMemoryCallLogStore`].
#[derive(Debug)]
struct InMemoryCallLogTransaction {
    committed: Arc<RwLock<Vec<CallLogRecord>>>,
    staged: Vec<CallLogEntry>,
    faults: FaultPlan,
}

#[async_trait]
impl CallLogTransaction for InMemoryCallLogTransaction {
    async fn append_batch(&mut self, entries: &[CallLogEntry]) -> PersistenceResult<()> {
        for (index, entry) in entries.iter().enumerate() {
            if self.faults.fail_on_record == Some(index) {
                return Err(PersistenceError::query(format!(
                    "simulated write failure on record {} ({})",
                    index, entry.provider
                )));
            }
            self.staged.push(entry.clone());
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> PersistenceResult<()> {
        let Self {
            committed,
            staged,
            faults,
        } = *self;
        if faults.fail_on_commit {
            return Err(PersistenceError::transaction("simulated commit failure"));
        }

        let created_at = Timestamp::now();
        let mut committed = committed.write().await;
        committed.extend(
            staged
                .into_iter()
                .map(|entry| CallLogRecord::new(LogId::new_v4(), entry, created_at)),
        );
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> PersistenceResult<()> {
        if self.faults.fail_on_rollback {
            return Err(PersistenceError::transaction("simulated rollback failure"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::entities::call_result::CallResult;
    use crate::domain::value_objects::ProviderName;
    use serde_json::json;
    use std::time::Duration;

    fn entries(count: usize) -> Vec<CallLogEntry> {
        ProviderName::ALL
            .iter()
            .take(count)
            .map(|name| {
                CallLogEntry::from(&CallResult::success(
                    *name,
                    json!({"provider": name.as_str()}),
                    Duration::from_millis(1),
                ))
            })
            .collect()
    }

    #[tokio::test]
    async fn commit_publishes_all_entries() {
        let store = InMemoryCallLogStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.append_batch(&entries(3)).await.unwrap();
        assert!(store.is_empty().await);

        tx.commit().await.unwrap();

        let records = store.records().await;
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].provider(), ProviderName::KakaoProfile);
        assert_ne!(records[0].id, records[1].id);
    }

    #[tokio::test]
    async fn rollback_discards_entries() {
        let store = InMemoryCallLogStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.append_batch(&entries(2)).await.unwrap();
        tx.rollback().await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn dropped_transaction_discards_entries() {
        let store = InMemoryCallLogStore::new();
        {
            let mut tx = store.begin().await.unwrap();
            tx.append_batch(&entries(2)).await.unwrap();
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn fail_on_begin() {
        let store = InMemoryCallLogStore::with_faults(FaultPlan::fail_on_begin());
        let err = store.begin().await.err().expect("begin should fail");
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn fail_on_last_record_rejects_batch() {
        let store = InMemoryCallLogStore::with_faults(FaultPlan::fail_on_record(4));
        let mut tx = store.begin().await.unwrap();
        let err = tx.append_batch(&entries(5)).await.unwrap_err();
        assert!(err.to_string().contains("record 4"));
    }

    #[tokio::test]
    async fn fail_on_commit_publishes_nothing() {
        let store = InMemoryCallLogStore::with_faults(FaultPlan::fail_on_commit());
        let mut tx = store.begin().await.unwrap();
        tx.append_batch(&entries(2)).await.unwrap();
        assert!(tx.commit().await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn len_waits_for_writer() {
        let store = InMemoryCallLogStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.append_batch(&entries(2)).await.unwrap();
        tx.commit().await.unwrap();

        let guard = store.committed.write().await;
        let reader = {
            let store = store.clone();
            tokio::spawn(async move { store.is_empty().await })
        };
        tokio::task::yield_now().await;
        assert!(!reader.is_finished());

        drop(guard);
        assert!(!reader.await.unwrap());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn set_faults_applies_to_new_transactions() {
        let store = InMemoryCallLogStore::new();
        store.set_faults(FaultPlan::fail_on_commit()).await;

        let mut tx = store.begin().await.unwrap();
        tx.append_batch(&entries(1)).await.unwrap();
        assert!(tx.commit().await.is_err());

        store.set_faults(FaultPlan::none()).await;
        let mut tx = store.begin().await.unwrap();
        tx.append_batch(&entries(1)).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}
