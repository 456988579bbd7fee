use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use crate::{
    domain::{RawTransaction, Transaction},
    errors::{LedgerError, Result},
};

use super::{decode_slot, encode_slot, StorageBackend};

/// In-process slot. Clones share the same contents, so a test can keep a
/// handle while the service owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with raw serialized contents.
    pub fn with_contents(data: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.set_contents(data);
        storage
    }

    pub fn set_contents(&self, data: impl Into<String>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(data.into());
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Makes every subsequent `persist` fail, simulating an unavailable medium.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Vec<RawTransaction>> {
        match self.contents() {
            Some(data) => decode_slot(&data),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, transactions: &[Transaction]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::PersistenceUnavailable(
                "memory slot rejected the write".into(),
            ));
        }
        let json = encode_slot(transactions)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| LedgerError::PersistenceUnavailable("memory slot poisoned".into()))?;
        *slot = Some(json);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
