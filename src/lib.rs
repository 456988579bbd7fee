#![doc(test(attr(deny(warnings))))]

//! Expense Ledger keeps a write-through collection of income and expense
//! entries and derives balances and time-windowed breakdowns from it.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Ledger tracing initialized.");
    });
}
