use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::LedgerError;
use crate::model::month::MonthKey;

const BUILTIN_TABLE: &str = include_str!("../../data/cpi_u.json");

/// Published CPI values keyed by month. Sparse: missing months are simply absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CpiTable {
    values: BTreeMap<MonthKey, f64>,
}

impl CpiTable {
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            let month = MonthKey::parse(key)
                .map_err(|_| LedgerError::InvalidTable(format!("malformed month key '{}'", key)))?;
            if !value.is_finite() || value <= 0.0 {
                return Err(LedgerError::InvalidTable(format!(
                    "CPI for {} must be a positive number, got {}",
                    month, value
                )));
            }
            values.insert(month, value);
        }
        Ok(CpiTable { values })
    }

    /// Parses a JSON object of the form `{ "YYYY-MM": value, ... }`.
    pub fn from_json_str(json: &str) -> Result<Self, LedgerError> {
        let raw: BTreeMap<String, f64> =
            serde_json::from_str(json).map_err(|e| LedgerError::InvalidTable(e.to_string()))?;
        Self::from_pairs(raw)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read CPI table {}", path.display()))?;
        let table = Self::from_json_str(&content)
            .with_context(|| format!("Could not load CPI table {}", path.display()))?;
        Ok(table)
    }

    /// The monthly CPI-U series (U.S. city average, all items, 1982-84=100)
    /// bundled with the crate.
    pub fn builtin() -> Result<Self, LedgerError> {
        Self::from_json_str(BUILTIN_TABLE)
    }

    pub fn get(&self, month: &MonthKey) -> Option<f64> {
        self.values.get(month).copied()
    }

    pub fn contains(&self, month: &MonthKey) -> bool {
        self.values.contains_key(month)
    }

    pub fn first_month(&self) -> Option<&MonthKey> {
        self.values.keys().next()
    }

    pub fn last_month(&self) -> Option<&MonthKey> {
        self.values.keys().next_back()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn key(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = CpiTable::from_pairs([("2020-01", 258.8), ("2025-09", 320.0)]).unwrap();
        assert_eq!(table.get(&key("2020-01")), Some(258.8));
        // No interpolation between published months
        assert_eq!(table.get(&key("2022-06")), None);
        assert!(!table.contains(&key("1900-01")));
    }

    #[test]
    fn test_range_bounds() {
        let table =
            CpiTable::from_pairs([("2025-09", 320.0), ("1913-01", 9.8), ("2020-01", 258.8)])
                .unwrap();
        assert_eq!(table.first_month(), Some(&key("1913-01")));
        assert_eq!(table.last_month(), Some(&key("2025-09")));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CpiTable::from_pairs([("2020-01", 0.0)]),
            Err(LedgerError::InvalidTable(_))
        ));
        assert!(matches!(
            CpiTable::from_pairs([("2020-01", f64::NAN)]),
            Err(LedgerError::InvalidTable(_))
        ));
        assert!(matches!(
            CpiTable::from_pairs([("2020-1", 100.0)]),
            Err(LedgerError::InvalidTable(_))
        ));
        assert!(CpiTable::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_builtin_covers_published_range() {
        let table = CpiTable::builtin().unwrap();
        assert_eq!(table.first_month(), Some(&key("1913-01")));
        assert_eq!(table.last_month(), Some(&key("2025-09")));
        assert!(table.iter().all(|(_, v)| v > 0.0));

        // Every month from 1913-01 through 2025-09
        assert_eq!(table.len(), 112 * 12 + 9);
        assert_eq!(table.get(&key("2019-06")), Some(256.143));
        assert_eq!(table.get(&key("1982-07")), Some(97.5));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"2020-01": 258.8, "2025-09": 320.0}}"#).unwrap();
        let table = CpiTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.get(&key("2025-09")), Some(320.0));

        let missing = file.path().with_extension("missing");
        assert!(CpiTable::from_json_file(&missing).is_err());
    }
}
