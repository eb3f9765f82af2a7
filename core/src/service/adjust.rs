use tracing::warn;

use crate::error::LedgerError;
use crate::model::cpi::CpiTable;
use crate::model::month::MonthKey;

/// Rescales `amount` from `month` dollars into base-month dollars.
///
/// No rounding happens here. A month without a published value yields
/// [`LedgerError::DataUnavailable`].
pub fn adjust(
    month: &MonthKey,
    amount: f64,
    table: &CpiTable,
    base_cpi: f64,
) -> Result<f64, LedgerError> {
    let cpi = table
        .get(month)
        .ok_or_else(|| LedgerError::DataUnavailable {
            month: month.to_string(),
        })?;
    Ok(amount * (base_cpi / cpi))
}

/// Fallback policy for a missing month: the nominal amount, unchanged.
pub fn adjust_or_nominal(month: &MonthKey, amount: f64, table: &CpiTable, base_cpi: f64) -> f64 {
    match adjust(month, amount, table, base_cpi) {
        Ok(adjusted) => adjusted,
        Err(e) => {
            warn!(%month, error = %e, "falling back to nominal amount");
            amount
        }
    }
}

/// Rejects amounts the calculator cannot rescale meaningfully.
pub fn check_original_amount(amount: f64) -> Result<f64, LedgerError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::invalid_amount(
            "original amount",
            amount.to_string(),
            "must be greater than zero",
        ));
    }
    Ok(amount)
}

pub fn check_asking_price(asking_price: f64) -> Result<f64, LedgerError> {
    if !asking_price.is_finite() {
        return Err(LedgerError::invalid_amount(
            "asking price",
            asking_price.to_string(),
            "not a finite number",
        ));
    }
    Ok(asking_price)
}

/// Positive when asking is below the adjusted amount, negative when above.
pub fn over_under_ratio(asking_price: f64, adjusted_amount: f64) -> f64 {
    1.0 - asking_price / adjusted_amount
}

/// A CPI table paired with the base index looked up once at startup.
#[derive(Debug, Clone)]
pub struct Adjuster {
    table: CpiTable,
    base_month: MonthKey,
    base_cpi: f64,
}

impl Adjuster {
    pub fn new(table: CpiTable, base_month: MonthKey) -> Result<Self, LedgerError> {
        let base_cpi = table.get(&base_month).ok_or_else(|| LedgerError::Configuration {
            base_month: base_month.to_string(),
        })?;
        Ok(Self {
            table,
            base_month,
            base_cpi,
        })
    }

    pub fn adjust(&self, month: &MonthKey, amount: f64) -> Result<f64, LedgerError> {
        adjust(month, amount, &self.table, self.base_cpi)
    }

    pub fn adjust_or_nominal(&self, month: &MonthKey, amount: f64) -> f64 {
        adjust_or_nominal(month, amount, &self.table, self.base_cpi)
    }

    pub fn table(&self) -> &CpiTable {
        &self.table
    }

    pub fn base_month(&self) -> &MonthKey {
        &self.base_month
    }

    pub fn base_cpi(&self) -> f64 {
        self.base_cpi
    }
}
