pub mod ledger_service;
pub mod summary_service;

pub use ledger_service::LedgerService;
pub use summary_service::SummaryService;
