use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::month::MonthKey;

const EVEN_TOLERANCE: f64 = 1e-9;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum PriceComparison {
    /// Asking below the inflation-adjusted amount.
    Under,
    Over,
    Even,
    /// The ratio is not a finite number, e.g. a zero adjusted amount.
    Undefined,
}

/// One recorded sale.
///
/// `adjusted_amount` and `over_under_ratio` are frozen at insertion time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: u64,
    pub month: MonthKey,
    pub original_amount: f64,
    pub adjusted_amount: f64,
    pub asking_price: f64,
    pub over_under_ratio: f64,
    pub recorded_at: DateTime<Utc>,
}

impl PriceComparison {
    pub fn from_ratio(over_under_ratio: f64) -> Self {
        if !over_under_ratio.is_finite() {
            PriceComparison::Undefined
        } else if over_under_ratio.abs() < EVEN_TOLERANCE {
            PriceComparison::Even
        } else if over_under_ratio > 0.0 {
            PriceComparison::Under
        } else {
            PriceComparison::Over
        }
    }
}

impl Entry {
    pub fn comparison(&self) -> PriceComparison {
        PriceComparison::from_ratio(self.over_under_ratio)
    }

    /// Asking price minus adjusted amount, in base-month dollars.
    pub fn asking_difference(&self) -> f64 {
        self.asking_price - self.adjusted_amount
    }
}

/// Newest month first. Stable, so equal months keep insertion order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.month.cmp(&a.month));
}
