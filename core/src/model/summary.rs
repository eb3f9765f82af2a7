use serde::{Deserialize, Serialize};

use crate::model::entry::Entry;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub entry_count: usize,
    pub total_original: f64,
    pub total_adjusted: f64,
    /// Zero for an empty ledger rather than NaN.
    pub average_adjusted: f64,
    pub total_asking: f64,
    /// `1 - total_asking / total_adjusted`, absent when there is nothing to compare.
    pub aggregate_over_under: Option<f64>,
}

impl Summary {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut summary = Summary::default();
        for entry in entries {
            summary.entry_count += 1;
            summary.total_original += entry.original_amount;
            summary.total_adjusted += entry.adjusted_amount;
            summary.total_asking += entry.asking_price;
        }

        if summary.entry_count > 0 {
            summary.average_adjusted = summary.total_adjusted / summary.entry_count as f64;
        }
        if summary.total_adjusted > 0.0 {
            summary.aggregate_over_under = Some(1.0 - summary.total_asking / summary.total_adjusted);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::month::MonthKey;
    use chrono::Utc;

    fn entry(original: f64, adjusted: f64, asking: f64) -> Entry {
        Entry {
            id: 1,
            month: MonthKey::parse("2020-01").unwrap(),
            original_amount: original,
            adjusted_amount: adjusted,
            asking_price: asking,
            over_under_ratio: 1.0 - asking / adjusted,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_is_all_zero() {
        let summary = Summary::from_entries(&[]);
        assert_eq!(summary.entry_count, 0);
        assert_eq!(summary.total_original, 0.0);
        assert_eq!(summary.total_adjusted, 0.0);
        assert_eq!(summary.average_adjusted, 0.0);
        assert!(!summary.average_adjusted.is_nan());
        assert_eq!(summary.aggregate_over_under, None);
    }

    #[test]
    fn test_totals_and_average() {
        let entries = vec![entry(100.0, 150.0, 120.0), entry(50.0, 90.0, 100.0)];
        let summary = Summary::from_entries(&entries);
        assert_eq!(summary.entry_count, 2);
        assert!((summary.total_original - 150.0).abs() < 1e-9);
        assert!((summary.total_adjusted - 240.0).abs() < 1e-9);
        assert!((summary.average_adjusted - 120.0).abs() < 1e-9);
        assert!((summary.total_asking - 220.0).abs() < 1e-9);
        let ratio = summary.aggregate_over_under.unwrap();
        assert!((ratio - (1.0 - 220.0 / 240.0)).abs() < 1e-9);
    }
}
