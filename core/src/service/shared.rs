use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::LedgerError;
use crate::model::entry::Entry;
use crate::model::month::MonthKey;
use crate::model::summary::Summary;
use crate::repository::EntryRepository;
use crate::service::ledger_service::LedgerService;

/// A ledger that can be handed to several threads; every operation holds one lock.
pub struct SharedLedger<R: EntryRepository> {
    inner: Arc<Mutex<LedgerService<R>>>,
}

impl<R: EntryRepository> Clone for SharedLedger<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: EntryRepository> SharedLedger<R> {
    pub fn new(service: LedgerService<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    // A panicking holder cannot leave half an operation behind, so the data stays usable.
    fn lock(&self) -> MutexGuard<'_, LedgerService<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_entry(
        &self,
        month: &MonthKey,
        original_amount: f64,
        asking_price: f64,
    ) -> Result<Entry, LedgerError> {
        self.lock().add_entry(month, original_amount, asking_price)
    }

    pub fn delete_entry(&self, id: u64) -> bool {
        self.lock().delete_entry(id)
    }

    pub fn clear_all(&self) {
        self.lock().clear_all()
    }

    pub fn summarize(&self) -> Summary {
        self.lock().summarize()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.lock().entries()
    }
}
