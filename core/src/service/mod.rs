pub mod adjust;
pub mod ledger_service;
pub mod shared;
