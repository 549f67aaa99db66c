//! Price data model
//!
//! The closed set of currency codes the engine can emit, and the
//! `Price` record handed to the conversion layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency codes understood by the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Rub,
    Gbp,
    Kzt,
    Cny,
    Jpy,
    Uah,
    Byn,
    Try,
    Chf,
    Inr,
    Krw,
    Btc,
    Eth,
    Usdt,
}

/// Every code the engine may put into a `Price`
pub const VALID_CURRENCIES: &[CurrencyCode] = &[
    CurrencyCode::Usd,
    CurrencyCode::Eur,
    CurrencyCode::Rub,
    CurrencyCode::Gbp,
    CurrencyCode::Kzt,
    CurrencyCode::Cny,
    CurrencyCode::Jpy,
    CurrencyCode::Uah,
    CurrencyCode::Byn,
    CurrencyCode::Try,
    CurrencyCode::Chf,
    CurrencyCode::Inr,
    CurrencyCode::Krw,
    CurrencyCode::Btc,
    CurrencyCode::Eth,
    CurrencyCode::Usdt,
];

impl CurrencyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Rub => "RUB",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Kzt => "KZT",
            CurrencyCode::Cny => "CNY",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Uah => "UAH",
            CurrencyCode::Byn => "BYN",
            CurrencyCode::Try => "TRY",
            CurrencyCode::Chf => "CHF",
            CurrencyCode::Inr => "INR",
            CurrencyCode::Krw => "KRW",
            CurrencyCode::Btc => "BTC",
            CurrencyCode::Eth => "ETH",
            CurrencyCode::Usdt => "USDT",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of `VALID_CURRENCIES`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        VALID_CURRENCIES
            .iter()
            .copied()
            .find(|code| code.as_str() == upper)
            .ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

/// A recognized amount of money
///
/// Built only by the recognizer, after the amount has been checked to be
/// finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    amount: f64,
    currency: CurrencyCode,
}

impl Price {
    /// Returns `None` for negative or non-finite amounts
    pub fn new(amount: f64, currency: CurrencyCode) -> Option<Self> {
        if amount.is_finite() && amount >= 0.0 {
            Some(Self { amount, currency })
        } else {
            None
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
