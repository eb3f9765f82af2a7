pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;

pub use config::LedgerConfig;
pub use error::LedgerError;
pub use input::{expand_key, parse_amount, parse_args, parse_entry_input, parse_month, EntryInput, ParsedInput};
pub use model::cpi::CpiTable;
pub use model::entry::{Entry, PriceComparison};
pub use model::month::MonthKey;
pub use model::summary::Summary;
pub use repository::{EntryRepository, InMemoryEntryRepository};
pub use service::adjust::{
    adjust, adjust_or_nominal, check_asking_price, check_original_amount, over_under_ratio, Adjuster,
};
pub use service::ledger_service::LedgerService;
pub use service::shared::SharedLedger;
