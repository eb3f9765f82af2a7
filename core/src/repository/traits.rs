use crate::model::entry::Entry;

/// Storage behind the ledger. Implementations keep entries ordered newest month first.
pub trait EntryRepository {
    /// Pre-increments the id counter; the first id handed out is 1.
    fn next_id(&mut self) -> u64;
    fn insert(&mut self, entry: Entry);
    fn get(&self, id: u64) -> Option<Entry>;
    fn list(&self) -> Vec<Entry>;
    /// Returns whether an entry was removed.
    fn remove(&mut self, id: u64) -> bool;
    fn clear(&mut self, reset_ids: bool);
}
