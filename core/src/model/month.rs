use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// A zero-padded `YYYY-MM` calendar month.
///
/// Ordering is plain string ordering, which is chronological for this format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        let trimmed = input.trim();
        let bytes = trimmed.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(LedgerError::invalid_month(input, "expected YYYY-MM"));
        }
        NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
            .map_err(|e| LedgerError::invalid_month(input, e.to_string()))?;
        Ok(MonthKey(trimmed.to_string()))
    }

    /// Only for literals known to be well formed.
    pub(crate) fn from_static(key: &'static str) -> Self {
        MonthKey(key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated in `parse`; the fallback is unreachable for well-formed keys.
        NaiveDate::parse_from_str(&format!("{}-01", self.0), "%Y-%m-%d").unwrap_or_default()
    }

    pub fn year(&self) -> i32 {
        self.first_day().year()
    }

    pub fn month(&self) -> u32 {
        self.first_day().month()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonthKey::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MonthKey::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let key = MonthKey::parse("2020-01").unwrap();
        assert_eq!(key.as_str(), "2020-01");
        assert_eq!(key.year(), 2020);
        assert_eq!(key.month(), 1);

        // Surrounding whitespace is tolerated
        assert_eq!(MonthKey::parse(" 1913-12 ").unwrap().as_str(), "1913-12");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "2020-1", "2020-13", "2020/01", "20-01-01", "abcd-ef", "", "2020-00",
            "-100-05", "+020-01", "2020-+1", " 202-01",
        ] {
            assert!(
                matches!(MonthKey::parse(bad), Err(LedgerError::InvalidMonth { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_signed_years_do_not_load_into_a_table() {
        let json = r#"{"+999-01": 1.0, "2020-01": 258.8}"#;
        assert!(crate::model::cpi::CpiTable::from_json_str(json).is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut keys: Vec<MonthKey> = ["2020-10", "1999-12", "2020-02"]
            .iter()
            .map(|k| MonthKey::parse(k).unwrap())
            .collect();
        keys.sort();
        let sorted: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(sorted, vec!["1999-12", "2020-02", "2020-10"]);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let key = MonthKey::parse("2025-09").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-09\"");
        let back: MonthKey = serde_json::from_str("\"2025-09\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<MonthKey>("\"2025-9\"").is_err());
    }
}
