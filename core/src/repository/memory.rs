use crate::model::entry::{sort_entries, Entry};
use crate::repository::traits::EntryRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryEntryRepository {
    entries: Vec<Entry>,
    last_id: u64,
}

impl InMemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryRepository for InMemoryEntryRepository {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn insert(&mut self, entry: Entry) {
        self.entries.push(entry);
        sort_entries(&mut self.entries);
    }

    fn get(&self, id: u64) -> Option<Entry> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }

    fn list(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    fn remove(&mut self, id: u64) -> bool {
        let initial_len = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != initial_len
    }

    fn clear(&mut self, reset_ids: bool) {
        self.entries.clear();
        if reset_ids {
            self.last_id = 0;
        }
    }
}
