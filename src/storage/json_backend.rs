use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    core::utils::{app_data_dir, ensure_dir, slot_file_in, write_atomic},
    domain::{RawTransaction, Transaction},
    errors::Result,
};

use super::{decode_slot, encode_slot, StorageBackend};

pub const DEFAULT_SLOT: &str = "transactions";

/// Keeps the slot as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    slot_path: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, slot: Option<&str>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let slot_path = slot_file_in(&root, slot.unwrap_or(DEFAULT_SLOT));
        Ok(Self { slot_path })
    }

    pub fn slot_path(&self) -> &Path {
        &self.slot_path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Vec<RawTransaction>> {
        if !self.slot_path.exists() {
            debug!(path = %self.slot_path.display(), "slot absent, starting empty");
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.slot_path)?;
        decode_slot(&data)
    }

    fn persist(&self, transactions: &[Transaction]) -> Result<()> {
        let json = encode_slot(transactions)?;
        write_atomic(&self.slot_path, &json)?;
        debug!(
            path = %self.slot_path.display(),
            count = transactions.len(),
            "slot written"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.slot_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage =
            JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("json storage");
        (storage, temp)
    }

    fn sample() -> Vec<Transaction> {
        let date = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        vec![
            Transaction::new(1, "Salary", 1000.0, Some("Income"), date),
            Transaction::new(2, "Coffee", -3.5, Some("Food"), date),
        ]
    }

    #[test]
    fn missing_slot_loads_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load().expect("load").is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.persist(&sample()).expect("persist");
        let loaded = storage.load().expect("load");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].text, "Coffee");
        assert_eq!(loaded[1].category.as_deref(), Some("Food"));
    }

    #[test]
    fn persist_overwrites_whole_slot() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.persist(&sample()).expect("first write");
        storage.persist(&sample()[..1]).expect("second write");
        assert_eq!(storage.load().expect("load").len(), 1);
    }

    #[test]
    fn reads_records_written_by_older_versions() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(
            storage.slot_path(),
            r#"[{"id":48151623,"text":"Lunch","amount":-12.5}]"#,
        )
        .unwrap();
        let loaded = storage.load().expect("load");
        assert_eq!(loaded[0].id, 48151623);
        assert!(loaded[0].category.is_none());
        assert!(loaded[0].date.is_none());
    }
}
