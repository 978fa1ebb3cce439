//! Credit amounts.
//!
//! A credit is an abstract unit of usage redeemed 1:1 against an agent
//! request once the wrapped operation has succeeded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// USD value of one credit, reported alongside every logged operation.
pub const CREDIT_USD_RATE: f64 = 0.001;

/// A positive number of credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CreditAmount(u64);

impl CreditAmount {
    /// Create a credit amount, rejecting zero.
    pub fn new(credits: u64) -> Result<Self, CoreError> {
        if credits == 0 {
            return Err(CoreError::InvalidCreditAmount(
                "credit_amount must be greater than zero".into(),
            ));
        }
        Ok(Self(credits))
    }

    /// Number of credits.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// USD price of this amount at [`CREDIT_USD_RATE`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn price_usd(self) -> f64 {
        CREDIT_USD_RATE * self.0 as f64
    }
}

impl TryFrom<u64> for CreditAmount {
    type Error = CoreError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CreditAmount> for u64 {
    fn from(amount: CreditAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for CreditAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of redeeming credits against an agent request.
///
/// Redemption is best-effort: a failure is recorded here instead of failing
/// the operation that produced the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionOutcome {
    /// Credits actually redeemed (`0` on failure).
    pub credits_redeemed: u64,
    /// Transaction hash reported by the billing backend, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Error message when redemption failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RedemptionOutcome {
    /// A successful redemption.
    #[must_use]
    pub fn redeemed(amount: CreditAmount, tx_hash: Option<String>) -> Self {
        Self {
            credits_redeemed: amount.get(),
            tx_hash,
            error: None,
        }
    }

    /// A failed redemption.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            credits_redeemed: 0,
            tx_hash: None,
            error: Some(error.into()),
        }
    }

    /// Whether the credits were redeemed.
    #[must_use]
    pub fn is_redeemed(&self) -> bool {
        self.error.is_none()
    }
}
