use thiserror::Error;

/// Every failure the ledger can report to its caller.
///
/// None of these leave the ledger in a partially updated state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The base month has no CPI value, so no adjustment can be trusted for the session.
    #[error("base month {base_month} is missing from the CPI table; adjustments are disabled")]
    Configuration { base_month: String },

    #[error("no CPI value published for {month}")]
    DataUnavailable { month: String },

    #[error("invalid month '{input}': {reason}")]
    InvalidMonth { input: String, reason: String },

    #[error("invalid {field} '{input}': {reason}")]
    InvalidAmount {
        field: &'static str,
        input: String,
        reason: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid CPI table: {0}")]
    InvalidTable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LedgerError {
    pub(crate) fn invalid_month(input: impl Into<String>, reason: impl Into<String>) -> Self {
        LedgerError::InvalidMonth {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_amount(
        field: &'static str,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LedgerError::InvalidAmount {
            field,
            input: input.into(),
            reason: reason.into(),
        }
    }
}
