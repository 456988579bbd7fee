pub mod common;
pub mod summary;
pub mod time_window;
pub mod transaction;

pub use common::{Displayable, Identifiable};
pub use summary::{CategoryBreakdown, CategoryTotal, IncomeExpense, Summary, WindowReport};
pub use time_window::TimeWindow;
pub use transaction::{RawTransaction, Transaction, DEFAULT_CATEGORY};
