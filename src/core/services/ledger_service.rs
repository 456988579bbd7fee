//! Business logic for recording and removing ledger entries.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::core::{
    clock::{Clock, SystemClock},
    entry_store::EntryStore,
    services::SummaryService,
};
use crate::domain::{Summary, TimeWindow, Transaction, WindowReport};
use crate::errors::{LedgerError, Result};
use crate::storage::StorageBackend;

/// Validated add/remove over an [`EntryStore`], plus the derived views a
/// front end refreshes after each mutation.
pub struct LedgerService {
    store: EntryStore,
    clock: Box<dyn Clock>,
}

impl LedgerService {
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self> {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Result<Self> {
        let store = EntryStore::open(storage, clock.now())?;
        Ok(Self { store, clock })
    }

    /// Records a new entry dated now. `amount` is the raw user input.
    pub fn add(&mut self, text: &str, amount: &str, category: Option<&str>) -> Result<Transaction> {
        let label = text.trim();
        let amount_input = amount.trim();
        if label.is_empty() || amount_input.is_empty() {
            return Err(LedgerError::Validation(
                "Please add a text and amount".into(),
            ));
        }
        let value = parse_amount(amount_input)?;

        let id = self.store.next_id();
        let transaction = Transaction::new(id, text, value, category, self.clock.now());
        self.store.insert(transaction.clone())?;
        info!(
            id,
            amount = value,
            category = %transaction.category,
            "transaction added"
        );
        Ok(transaction)
    }

    /// Removes the entry with `id`. Unknown ids are a no-op.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let removed = self.store.remove(id)?;
        if removed > 0 {
            info!(id, "transaction removed");
        }
        Ok(removed > 0)
    }

    /// Totals across every entry, recomputed on each call.
    pub fn summary(&self) -> Summary {
        SummaryService::summarize(self.store.transactions())
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.store.get(id)
    }

    /// Entries that fall inside `window` on the clock's local calendar.
    pub fn windowed(&self, window: TimeWindow) -> Vec<&Transaction> {
        window.select(self.store.transactions(), self.clock.local_now())
    }

    pub fn report(&self, window: TimeWindow) -> WindowReport {
        SummaryService::window_report(self.store.transactions(), window, self.clock.local_now())
    }

    /// Re-reads the persisted slot, discarding in-memory state.
    pub fn reload(&mut self) -> Result<()> {
        self.store.reload(self.clock.now())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

fn parse_amount(input: &str) -> Result<f64> {
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LedgerError::Validation(format!(
            "`{input}` is not a valid amount"
        ))),
    }
}
