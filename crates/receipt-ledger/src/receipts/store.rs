use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::Receipt;
use super::scoring;

/// Process-unique token referencing one stored receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// 128 random bits in canonical hyphenated form; the space is large
    /// enough that collisions are negligible for one process lifetime.
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored entity: write-once, immutable until process exit.
#[derive(Debug, Clone)]
pub struct ReceiptRecord {
    pub id: ReceiptId,
    pub receipt: Receipt,
    pub points: u64,
}

/// Lookup failure for the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no receipt found for id '{0}'")]
    NotFound(ReceiptId),
}

/// Concurrent in-memory ledger of scored receipts.
///
/// One readers-writer lock over the whole table: inserts always use a fresh
/// key and records never mutate, so per-key locking buys nothing. Lookups
/// ordered after an insert via the returned id are guaranteed to observe it.
#[derive(Debug, Default)]
pub struct ReceiptStore {
    records: RwLock<HashMap<ReceiptId, ReceiptRecord>>,
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score the receipt once, file it under a fresh id, and hand the id back.
    pub fn insert(&self, receipt: Receipt) -> ReceiptId {
        let id = ReceiptId::generate();
        let record = ReceiptRecord {
            id: id.clone(),
            points: scoring::total(&receipt),
            receipt,
        };

        let mut records = self.records.write().expect("receipt store lock poisoned");
        records.insert(id.clone(), record);

        id
    }

    /// Points earned by a previously filed receipt.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, StoreError> {
        let records = self.records.read().expect("receipt store lock poisoned");
        records
            .get(id)
            .map(|record| record.points)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub fn len(&self) -> usize {
        let records = self.records.read().expect("receipt store lock poisoned");
        records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
