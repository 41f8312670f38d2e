//! Live query handle
//!
//! A [`Watch`] yields the current result set once, then a full result set
//! after every change to its collection. On lag it skips the missed events
//! and re-reads. Dropping it drops the broadcast receiver.

use serde_json::Value;
use shared::message::{ChangeEvent, Collection};
use tokio::sync::broadcast;

use super::document::DocumentStore;
use super::error::StoreResult;
use super::query::Query;

pub struct Watch {
    store: DocumentStore,
    collection: Collection,
    query: Query,
    rx: broadcast::Receiver<ChangeEvent>,
    last: Option<Vec<Value>>,
}

impl Watch {
    pub(super) fn new(store: DocumentStore, collection: Collection, query: Query) -> Self {
        // 先订阅再读快照，避免漏掉两者之间的写入
        let rx = store.bus().subscribe();
        Self {
            store,
            collection,
            query,
            rx,
            last: None,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Current result set without waiting
    pub fn snapshot(&self) -> StoreResult<Vec<Value>> {
        self.store.query(self.collection, &self.query)
    }

    /// Wait for the next result set
    ///
    /// Returns `None` once the change bus is gone. Snapshots identical to
    /// the previous one are skipped.
    pub async fn next(&mut self) -> Option<StoreResult<Vec<Value>>> {
        if self.last.is_none() {
            return Some(self.emit());
        }
        loop {
            match self.rx.recv().await {
                Ok(event) if event.collection == self.collection => {}
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(collection = %self.collection, skipped = n, "Watch lagged, re-reading snapshot");
                    self.rx = self.rx.resubscribe();
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }

            let docs = match self.snapshot() {
                Ok(docs) => docs,
                Err(e) => return Some(Err(e)),
            };
            if self.last.as_ref() != Some(&docs) {
                self.last = Some(docs.clone());
                return Some(Ok(docs));
            }
        }
    }

    /// Like [`Watch::next`] but always re-reads, even without a change
    ///
    /// Used after a consumer fell behind and must resend its state.
    pub fn resync(&mut self) -> StoreResult<Vec<Value>> {
        self.emit()
    }

    fn emit(&mut self) -> StoreResult<Vec<Value>> {
        let docs = self.snapshot()?;
        self.last = Some(docs.clone());
        Ok(docs)
    }
}
