// crates/remediation-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Audit Store
// Description: Process-local audit store for tests and offline runs.
// Purpose: Keep audit records addressable without any storage backend.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! Records live in a shared map keyed by audit key. Clones share storage.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::AuditKey;
use crate::interfaces::AuditError;
use crate::interfaces::AuditStore;

// ============================================================================
// SECTION: Store
// ============================================================================

/// In-memory audit store; existing keys are never overwritten.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAuditStore {
    /// Records keyed by audit key.
    records: Arc<Mutex<BTreeMap<AuditKey, Vec<u8>>>>,
}

impl InMemoryAuditStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Returns true when no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of every stored record.
    #[must_use]
    pub fn records(&self) -> Vec<(AuditKey, Vec<u8>)> {
        self.records
            .lock()
            .map(|records| records.iter().map(|(key, body)| (key.clone(), body.clone())).collect())
            .unwrap_or_default()
    }
}

impl AuditStore for InMemoryAuditStore {
    fn put(&self, key: &AuditKey, body: &[u8]) -> Result<String, AuditError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AuditError::Io("audit store mutex poisoned".to_string()))?;
        if records.contains_key(key) {
            return Err(AuditError::Io(format!("audit record already exists: {}", key.as_str())));
        }
        records.insert(key.clone(), body.to_vec());
        Ok(format!("memory://{}", key.as_str()))
    }
}
