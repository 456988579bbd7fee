pub mod json_backend;
pub mod memory;

use crate::{
    domain::{RawTransaction, Transaction},
    errors::Result,
};

/// Abstraction over the persisted slot holding the transaction collection.
pub trait StorageBackend: Send + Sync {
    /// Reads the slot. An absent slot yields an empty collection.
    fn load(&self) -> Result<Vec<RawTransaction>>;

    /// Replaces the whole slot with `transactions`.
    fn persist(&self, transactions: &[Transaction]) -> Result<()>;

    /// Short human-readable location used in logs and messages.
    fn describe(&self) -> String;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

/// Decodes a serialized slot. `null` is treated like an absent slot.
pub(crate) fn decode_slot(data: &str) -> Result<Vec<RawTransaction>> {
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Option<Vec<RawTransaction>> = serde_json::from_str(data)?;
    Ok(records.unwrap_or_default())
}

pub(crate) fn encode_slot(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}
