use std::collections::HashMap;

use crate::error::LedgerError;
use crate::model::month::MonthKey;

/// Keys accepted in `key:value` form, expandable by unique prefix.
pub const ENTRY_KEYS: &[&str] = &["month", "amount", "price"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub positional: Vec<String>,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut positional = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        positional.push(arg.clone());
    }

    ParsedInput {
        positional,
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String, LedgerError> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(LedgerError::InvalidInput(format!("Unknown key: '{}'", key))),
        _ => Err(LedgerError::InvalidInput(format!(
            "Ambiguous key: '{}' matches {:?}",
            key, matches
        ))),
    }
}

pub fn parse_month(input: &str) -> Result<MonthKey, LedgerError> {
    MonthKey::parse(input)
}

/// Parses a dollar amount, tolerating a `$` sign and `,` separators.
///
/// Sign is not checked here; the ledger decides which values it accepts.
pub fn parse_amount(field: &'static str, input: &str) -> Result<f64, LedgerError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Err(LedgerError::invalid_amount(field, input, "empty"));
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| LedgerError::invalid_amount(field, input, "not a number"))?;
    if !value.is_finite() {
        return Err(LedgerError::invalid_amount(field, input, "not a finite number"));
    }
    Ok(value)
}

/// Validated, typed values ready for the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInput {
    pub month: MonthKey,
    pub original_amount: f64,
    pub asking_price: f64,
}

/// Accepts `MONTH AMOUNT [PRICE]` positionally, or any mix with `month:`, `amount:`, `price:` keys.
///
/// A missing asking price defaults to zero.
pub fn parse_entry_input(args: &[String]) -> Result<EntryInput, LedgerError> {
    let parsed = parse_args(args);

    let mut slots: HashMap<String, String> = HashMap::new();
    for (key, value) in parsed.metadata {
        slots.insert(expand_key(&key, ENTRY_KEYS)?, value);
    }

    // Positional tokens fill whichever slots were not given by key, in order.
    let mut positional = parsed.positional.into_iter();
    for key in ENTRY_KEYS {
        if slots.contains_key(*key) {
            continue;
        }
        match positional.next() {
            Some(value) => {
                slots.insert(key.to_string(), value);
            }
            None => break,
        }
    }
    if let Some(extra) = positional.next() {
        return Err(LedgerError::InvalidInput(format!("Unexpected argument: '{}'", extra)));
    }

    let month = match slots.get("month") {
        Some(m) => parse_month(m)?,
        None => return Err(LedgerError::invalid_month("", "missing")),
    };
    let original_amount = match slots.get("amount") {
        Some(a) => parse_amount("original amount", a)?,
        None => return Err(LedgerError::invalid_amount("original amount", "", "missing")),
    };
    let asking_price = match slots.get("price") {
        Some(p) => parse_amount("asking price", p)?,
        None => 0.0,
    };

    Ok(EntryInput {
        month,
        original_amount,
        asking_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args("2020-01 100 p:130"));
        assert_eq!(parsed.positional, vec!["2020-01", "100"]);
        assert_eq!(parsed.metadata.get("p"), Some(&"130".to_string()));
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("m", ENTRY_KEYS).unwrap(), "month");
        assert_eq!(expand_key("am", ENTRY_KEYS).unwrap(), "amount");
        assert_eq!(expand_key("price", ENTRY_KEYS).unwrap(), "price");

        // Unknown
        assert!(expand_key("x", ENTRY_KEYS).is_err());

        // Ambiguous
        let candidates = vec!["month", "monthly"];
        assert!(expand_key("mon", &candidates).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", "100").unwrap(), 100.0);
        assert_eq!(parse_amount("amount", " $1,250.50 ").unwrap(), 1250.5);
        assert_eq!(parse_amount("amount", "-5").unwrap(), -5.0);

        for bad in ["", "abc", "inf", "NaN", "$"] {
            assert!(
                matches!(parse_amount("amount", bad), Err(LedgerError::InvalidAmount { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_entry_positional() {
        let input = parse_entry_input(&args("2020-01 100 130")).unwrap();
        assert_eq!(input.month.as_str(), "2020-01");
        assert_eq!(input.original_amount, 100.0);
        assert_eq!(input.asking_price, 130.0);

        let no_price = parse_entry_input(&args("2020-01 100")).unwrap();
        assert_eq!(no_price.asking_price, 0.0);
    }

    #[test]
    fn test_parse_entry_keyed_and_mixed() {
        let keyed = parse_entry_input(&args("p:130 a:100 m:2020-01")).unwrap();
        assert_eq!(keyed.month.as_str(), "2020-01");
        assert_eq!(keyed.original_amount, 100.0);
        assert_eq!(keyed.asking_price, 130.0);

        // Positional tokens skip the slot given by key
        let mixed = parse_entry_input(&args("m:2020-01 100 130")).unwrap();
        assert_eq!(mixed.original_amount, 100.0);
        assert_eq!(mixed.asking_price, 130.0);
    }

    #[test]
    fn test_parse_entry_errors() {
        assert!(matches!(
            parse_entry_input(&args("")),
            Err(LedgerError::InvalidMonth { .. })
        ));
        assert!(matches!(
            parse_entry_input(&args("2020-01")),
            Err(LedgerError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_entry_input(&args("2020-01 ten")),
            Err(LedgerError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_entry_input(&args("Jan-2020 10")),
            Err(LedgerError::InvalidMonth { .. })
        ));
        assert!(matches!(
            parse_entry_input(&args("2020-01 10 20 30")),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_entry_input(&args("2020-01 10 x:1")),
            Err(LedgerError::InvalidInput(_))
        ));
    }
}
