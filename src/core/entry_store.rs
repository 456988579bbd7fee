//! Authoritative, write-through collection of transactions.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    domain::{transaction::migrate, Identifiable, Transaction},
    errors::Result,
    storage::StorageBackend,
};

/// Owns the in-memory transaction sequence and keeps the backing slot in sync
/// after every mutation.
pub struct EntryStore {
    transactions: Vec<Transaction>,
    storage: Box<dyn StorageBackend>,
    next_id: u64,
}

impl EntryStore {
    /// Loads and migrates the persisted slot. `now` backfills missing dates.
    pub fn open(storage: Box<dyn StorageBackend>, now: DateTime<Utc>) -> Result<Self> {
        let transactions = Self::load(storage.as_ref(), now)?;
        let next_id = Self::seed_id(&transactions);
        info!(
            location = %storage.describe(),
            count = transactions.len(),
            "entry store opened"
        );
        Ok(Self {
            transactions,
            storage,
            next_id,
        })
    }

    /// Reads the slot through `storage` and applies migration.
    pub fn load(storage: &dyn StorageBackend, now: DateTime<Utc>) -> Result<Vec<Transaction>> {
        let raw = storage.load()?;
        let legacy = raw.iter().filter(|record| record.needs_migration()).count();
        if legacy > 0 {
            warn!(legacy, "backfilling fields on legacy entries");
        }
        Ok(migrate(raw, now))
    }

    /// Replaces the in-memory state with a fresh read of the slot.
    pub fn reload(&mut self, now: DateTime<Utc>) -> Result<()> {
        let transactions = Self::load(self.storage.as_ref(), now)?;
        self.next_id = self.next_id.max(Self::seed_id(&transactions));
        self.transactions = transactions;
        Ok(())
    }

    /// Writes the full current sequence to the slot.
    pub fn persist(&self) -> Result<()> {
        self.storage.persist(&self.transactions)
    }

    /// Hands out the next identifier. Identifiers only ever grow within a store
    /// instance, so they never repeat even after removals.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Appends `transaction` and persists. On write failure the append is undone.
    pub fn insert(&mut self, transaction: Transaction) -> Result<()> {
        self.transactions.push(transaction);
        if let Err(err) = self.persist() {
            self.transactions.pop();
            warn!(%err, "persist failed, insert rolled back");
            return Err(err);
        }
        Ok(())
    }

    /// Drops every entry with `id` and persists. Returns how many were removed.
    pub fn remove(&mut self, id: u64) -> Result<usize> {
        let before = self.transactions.clone();
        self.transactions.retain(|txn| txn.id() != id);
        let removed = before.len() - self.transactions.len();
        if let Err(err) = self.persist() {
            self.transactions = before;
            warn!(%err, id, "persist failed, removal rolled back");
            return Err(err);
        }
        debug!(id, removed, "remove applied");
        Ok(removed)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn seed_id(transactions: &[Transaction]) -> u64 {
        transactions
            .iter()
            .map(Identifiable::id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }
}
