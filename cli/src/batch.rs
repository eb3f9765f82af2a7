use cpiledger_core::{parse_entry_input, EntryRepository, LedgerService};
use tracing::warn;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub added: usize,
    /// (line number, reason)
    pub rejected: Vec<(usize, String)>,
}

/// Feeds `MONTH AMOUNT [PRICE]` lines into the ledger. Blank lines and `#` comments are skipped.
pub fn load_lines<R: EntryRepository>(ledger: &mut LedgerService<R>, content: &str) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let args: Vec<String> = line.split_whitespace().map(|s| s.to_string()).collect();
        let result = parse_entry_input(&args)
            .and_then(|input| ledger.add_entry(&input.month, input.original_amount, input.asking_price));

        match result {
            Ok(_) => report.added += 1,
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping batch line");
                report.rejected.push((line_no, e.to_string()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpiledger_core::{CpiTable, LedgerConfig};

    #[test]
    fn test_load_lines() {
        let table = CpiTable::from_pairs([("2020-01", 258.8), ("2025-09", 320.0)]).unwrap();
        let mut ledger = LedgerService::in_memory(table, &LedgerConfig::default()).unwrap();

        let content = "\
# month amount asking
2020-01 100 130

2025-09 $2,000 price:1900
1900-01 50 0
2020-01 -5
";
        let report = load_lines(&mut ledger, content);
        assert_eq!(report.added, 2);
        let lines: Vec<usize> = report.rejected.iter().map(|(n, _)| *n).collect();
        assert_eq!(lines, vec![5, 6]);

        let months: Vec<String> = ledger.entries().iter().map(|e| e.month.to_string()).collect();
        assert_eq!(months, vec!["2025-09", "2020-01"]);
    }
}
