pub mod memory;
pub mod traits;

pub use memory::InMemoryEntryRepository;
pub use traits::EntryRepository;
