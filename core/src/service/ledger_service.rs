use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::input::{parse_amount, parse_month};
use crate::model::cpi::CpiTable;
use crate::model::entry::Entry;
use crate::model::month::MonthKey;
use crate::model::summary::Summary;
use crate::repository::{EntryRepository, InMemoryEntryRepository};
use crate::service::adjust::{check_asking_price, check_original_amount, over_under_ratio, Adjuster};

/// Owns the entries and the id counter and enforces what may go into them.
pub struct LedgerService<R: EntryRepository> {
    repo: R,
    adjuster: Adjuster,
    min_month: MonthKey,
    max_month: MonthKey,
    reset_ids_on_clear: bool,
}

impl LedgerService<InMemoryEntryRepository> {
    pub fn in_memory(table: CpiTable, config: &LedgerConfig) -> Result<Self, LedgerError> {
        Self::new(InMemoryEntryRepository::new(), table, config)
    }
}

impl<R: EntryRepository> LedgerService<R> {
    /// Fails with [`LedgerError::Configuration`] when the base month has no CPI value.
    pub fn new(repo: R, table: CpiTable, config: &LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;

        let (first, last) = match (table.first_month(), table.last_month()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => {
                return Err(LedgerError::Configuration {
                    base_month: config.base_month.to_string(),
                })
            }
        };

        let min_month = if config.min_month < first {
            warn!(configured = %config.min_month, published = %first, "min_month precedes the CPI table");
            first.clone()
        } else {
            config.min_month.clone()
        };
        let max_month = if config.max_month > last {
            warn!(configured = %config.max_month, published = %last, "max_month exceeds the CPI table");
            last.clone()
        } else {
            config.max_month.clone()
        };
        if min_month > max_month {
            return Err(LedgerError::InvalidConfig(format!(
                "accepted range {}..={} does not overlap the CPI table {}..={}",
                config.min_month, config.max_month, first, last
            )));
        }

        let adjuster = Adjuster::new(table, config.base_month.clone())?;
        info!(
            base_month = %adjuster.base_month(),
            base_cpi = adjuster.base_cpi(),
            %min_month,
            %max_month,
            "ledger ready"
        );

        Ok(Self {
            repo,
            adjuster,
            min_month,
            max_month,
            reset_ids_on_clear: config.reset_ids_on_clear,
        })
    }

    pub fn adjuster(&self) -> &Adjuster {
        &self.adjuster
    }

    pub fn min_month(&self) -> &MonthKey {
        &self.min_month
    }

    pub fn max_month(&self) -> &MonthKey {
        &self.max_month
    }

    fn check_month(&self, month: &MonthKey) -> Result<(), LedgerError> {
        if *month < self.min_month || *month > self.max_month {
            return Err(LedgerError::invalid_month(
                month.as_str(),
                format!("outside accepted range {}..={}", self.min_month, self.max_month),
            ));
        }
        if !self.adjuster.table().contains(month) {
            return Err(LedgerError::invalid_month(month.as_str(), "no CPI value published"));
        }
        Ok(())
    }

    /// Validates, computes and stores a new entry. On error nothing changes.
    pub fn add_entry(
        &mut self,
        month: &MonthKey,
        original_amount: f64,
        asking_price: f64,
    ) -> Result<Entry, LedgerError> {
        self.check_month(month)?;
        check_original_amount(original_amount)?;
        check_asking_price(asking_price)?;

        let adjusted_amount = self.adjuster.adjust(month, original_amount)?;
        let entry = Entry {
            id: self.repo.next_id(),
            month: month.clone(),
            original_amount,
            adjusted_amount,
            asking_price,
            over_under_ratio: over_under_ratio(asking_price, adjusted_amount),
            recorded_at: Utc::now(),
        };
        self.repo.insert(entry.clone());

        info!(
            id = entry.id,
            month = %entry.month,
            original = entry.original_amount,
            adjusted = entry.adjusted_amount,
            "entry added"
        );
        Ok(entry)
    }

    /// Parses raw text fields, then behaves like [`LedgerService::add_entry`].
    pub fn add_entry_from_input(
        &mut self,
        month: &str,
        original_amount: &str,
        asking_price: &str,
    ) -> Result<Entry, LedgerError> {
        let month = parse_month(month)?;
        let original_amount = parse_amount("original amount", original_amount)?;
        let asking_price = if asking_price.trim().is_empty() {
            0.0
        } else {
            parse_amount("asking price", asking_price)?
        };
        self.add_entry(&month, original_amount, asking_price)
    }

    /// Idempotent: an unknown id removes nothing and returns false.
    pub fn delete_entry(&mut self, id: u64) -> bool {
        let removed = self.repo.remove(id);
        if removed {
            info!(id, "entry deleted");
        } else {
            debug!(id, "delete ignored, no such entry");
        }
        removed
    }

    pub fn clear_all(&mut self) {
        self.repo.clear(self.reset_ids_on_clear);
        info!(reset_ids = self.reset_ids_on_clear, "ledger cleared");
    }

    pub fn summarize(&self) -> Summary {
        let summary = Summary::from_entries(&self.repo.list());
        debug!(entries = summary.entry_count, "summarized ledger");
        summary
    }

    /// Entries in display order, newest month first.
    pub fn entries(&self) -> Vec<Entry> {
        self.repo.list()
    }

    pub fn get_entry(&self, id: u64) -> Option<Entry> {
        self.repo.get(id)
    }
}

#[cfg(test)]
#[path = "ledger_service_test.rs"]
mod tests;
