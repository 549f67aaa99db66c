//! Exchange rate table
//!
//! Holds "units per one base currency" rates in the shape served by
//! OpenExchangeRates (`{"base": "USD", "rates": {"EUR": 0.92, ...}}`) and
//! converts recognized prices between currencies. Fetching and caching
//! the table is the caller's business.

use crate::error::{ValutaError, ValutaResult};
use crate::price::{CurrencyCode, Price};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RatesFile {
    #[serde(default = "default_base")]
    base: String,
    rates: HashMap<String, f64>,
}

fn default_base() -> String {
    CurrencyCode::Usd.as_str().to_string()
}

/// In-memory exchange rates relative to one base currency
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new(CurrencyCode::Usd)
    }
}

impl RateTable {
    /// Empty table; only the base currency converts
    pub fn new(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: HashMap::new(),
        }
    }

    /// Set how many units of `code` buy one unit of the base currency
    pub fn with_rate(mut self, code: CurrencyCode, rate: f64) -> Self {
        self.rates.insert(code, rate);
        self
    }

    /// Parse an OpenExchangeRates-style JSON document
    ///
    /// Currencies outside the recognizer's set are skipped.
    pub fn from_json(json: &str) -> ValutaResult<Self> {
        let file: RatesFile = serde_json::from_str(json)?;
        let base = file
            .base
            .parse::<CurrencyCode>()
            .map_err(|e| ValutaError::Rates(e.to_string()))?;

        let mut table = Self::new(base);
        let mut skipped = 0;
        for (code, rate) in file.rates {
            match code.parse::<CurrencyCode>() {
                Ok(code) if rate.is_finite() && rate > 0.0 => {
                    table.rates.insert(code, rate);
                }
                Ok(code) => warn!("Ignoring invalid rate {} for {}", rate, code),
                Err(_) => skipped += 1,
            }
        }

        debug!(
            "Loaded {} rates against {} ({} unsupported skipped)",
            table.rates.len(),
            base,
            skipped
        );
        Ok(table)
    }

    /// Load a rate table from a JSON file
    pub fn load(path: &Path) -> ValutaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn base(&self) -> CurrencyCode {
        self.base
    }

    /// Units of `code` per one base unit; the base itself is 1.0
    pub fn rate(&self, code: CurrencyCode) -> Option<f64> {
        if code == self.base {
            return Some(self.rates.get(&code).copied().unwrap_or(1.0));
        }
        self.rates.get(&code).copied()
    }

    /// `amount * rate(to) / rate(from)`
    pub fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> ValutaResult<f64> {
        let rate_from = self
            .rate(from)
            .ok_or_else(|| ValutaError::Rates(format!("no rate for {}", from)))?;
        let rate_to = self
            .rate(to)
            .ok_or_else(|| ValutaError::Rates(format!("no rate for {}", to)))?;

        if rate_from == 0.0 {
            return Err(ValutaError::Rates(format!("zero rate for {}", from)));
        }

        Ok(amount * rate_to / rate_from)
    }

    /// Convert a recognized price
    pub fn convert_price(&self, price: &Price, to: CurrencyCode) -> ValutaResult<f64> {
        self.convert(price.amount(), price.currency(), to)
    }
}
