pub mod clock;
pub mod entry_store;
pub mod services;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entry_store::EntryStore;
