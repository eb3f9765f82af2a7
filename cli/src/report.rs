use cpiledger_core::{Entry, Summary};
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Color, Modify, Style};
use tabled::{Table, Tabled};

use crate::format::{comparison_label, currency, percent};

/// One ledger entry as printed by `batch`, amounts already formatted.
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "Adjusted")]
    adjusted: String,
    #[tabled(rename = "Asking")]
    asking: String,
    #[tabled(rename = "Over/Under")]
    over_under: String,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            month: entry.month.to_string(),
            original: currency(entry.original_amount),
            adjusted: currency(entry.adjusted_amount),
            asking: currency(entry.asking_price),
            over_under: format!(
                "{} ({})",
                percent(entry.over_under_ratio),
                comparison_label(entry.comparison())
            ),
        }
    }
}

pub fn render_entries(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries recorded.".to_string();
    }

    let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn render_summary(summary: &Summary) -> String {
    let mut lines = vec![
        format!("Entries:          {}", summary.entry_count),
        format!("Total original:   {}", currency(summary.total_original)),
        format!("Total adjusted:   {}", currency(summary.total_adjusted)),
        format!("Average adjusted: {}", currency(summary.average_adjusted)),
    ];
    if let Some(ratio) = summary.aggregate_over_under {
        lines.push(format!("Total asking:     {}", currency(summary.total_asking)));
        lines.push(format!("Over/under:       {}", percent(ratio)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cpiledger_core::MonthKey;

    fn entry() -> Entry {
        Entry {
            id: 7,
            month: MonthKey::parse("2020-01").unwrap(),
            original_amount: 100.0,
            adjusted_amount: 123.6476,
            asking_price: 130.0,
            over_under_ratio: 1.0 - 130.0 / 123.6476,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_entries() {
        let out = render_entries(&[entry()]);
        assert!(out.contains("2020-01"));
        assert!(out.contains("$123.65"));
        assert!(out.contains("$130.00"));
        assert!(out.contains("-5.14% (over)"));
        assert!(out.contains("Over/Under"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_entries(&[]), "No entries recorded.");
        let out = render_summary(&Summary::default());
        assert!(out.contains("Entries:          0"));
        assert!(out.contains("Average adjusted: $0.00"));
        assert!(!out.contains("Over/under"));
    }

    #[test]
    fn test_render_summary() {
        let summary = Summary::from_entries(&[entry()]);
        let out = render_summary(&summary);
        assert!(out.contains("Total adjusted:   $123.65"));
        assert!(out.contains("Over/under:       -5.14%"));
    }
}
