//! ChangeHub: per-collection change notifications
//!
//! ```text
//! write handler (after commit)
//!       │ publish(key, kind)
//!       ▼
//! ChangeHub
//!   └── channels: key → broadcast::Sender<Change>
//!         │   keys: "tasks", "employees:{store}", "shifts:{store}"
//!         ▼
//! SSE subscriber (reload full snapshot → push)
//! ```
//!
//! Notifications carry no data. Subscribers reload the whole collection, so a
//! missed or lagged notification only costs one extra reload.

mod sse;

pub use sse::snapshot_stream;

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcast channel capacity per collection
const BROADCAST_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub key: String,
    pub kind: ChangeKind,
    pub id: Option<i64>,
}

/// Collection keys
pub mod keys {
    pub const TASKS: &str = "tasks";

    pub fn employees(store: &str) -> String {
        format!("employees:{store}")
    }

    pub fn shifts(store: &str) -> String {
        format!("shifts:{store}")
    }
}

#[derive(Clone, Default)]
pub struct ChangeHub {
    channels: Arc<DashMap<String, broadcast::Sender<Change>>>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify subscribers of `key`. Call only after the write is committed.
    ///
    /// A channel whose last subscriber has gone is removed here.
    pub fn publish(&self, key: &str, kind: ChangeKind, id: Option<i64>) {
        // Clone out of the map so no shard lock is held below
        let Some(tx) = self.channels.get(key).map(|tx| tx.clone()) else {
            return;
        };
        if tx.receiver_count() == 0 {
            // Re-checked under the shard lock; a concurrent subscribe keeps it
            self.channels
                .remove_if(key, |_, tx| tx.receiver_count() == 0);
            return;
        }
        let change = Change {
            key: key.to_string(),
            kind,
            id,
        };
        // Err means the last subscriber left after the check
        let _ = tx.send(change);
    }

    pub fn subscribe(&self, key: &str) -> broadcast::Receiver<Change> {
        self.channels
            .entry(key.to_string())
            .or_insert_with(|| broadcast::channel(BROADCAST_CAPACITY).0)
            .subscribe()
    }

    /// Current subscriber count for `key`
    pub fn subscriber_count(&self, key: &str) -> usize {
        self.channels
            .get(key)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}
