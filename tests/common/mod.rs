#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, TimeZone, Utc};
use expense_ledger::{
    core::{clock::FixedClock, services::LedgerService},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Allocates an isolated data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
}

pub fn storage_in(base: &Path) -> JsonStorage {
    JsonStorage::new(Some(base.to_path_buf()), None).expect("create json storage backend")
}

/// Opens a ledger over `base` with the clock pinned to `now`.
pub fn ledger_at(base: &Path, now: DateTime<Utc>) -> LedgerService {
    LedgerService::with_clock(Box::new(storage_in(base)), Box::new(FixedClock::new(now)))
        .expect("open ledger")
}

/// Creates an isolated ledger backed by a unique directory for each test.
pub fn setup_ledger() -> (LedgerService, PathBuf) {
    let base = temp_base();
    (ledger_at(&base, fixed_now()), base)
}
