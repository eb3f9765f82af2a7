pub mod cpi;
pub mod entry;
pub mod month;
pub mod summary;
