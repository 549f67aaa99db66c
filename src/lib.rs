//! Valuta Library
//!
//! Recognizes money amounts and their currencies in Russian/English chat
//! messages and OCR text, e.g. "100 баксов", "5k eur", "$100 тысяч".

pub mod config;
pub mod core;
pub mod error;
pub mod price;
pub mod rates;
pub mod vocabulary;

pub use crate::core::recognizer::{Recognizer, RecognizerConfig};
pub use crate::core::Mode;
pub use crate::error::{ValutaError, ValutaResult};
pub use crate::price::{CurrencyCode, Price, VALID_CURRENCIES};
pub use crate::rates::RateTable;

use lazy_static::lazy_static;
use tracing::error;

lazy_static! {
    static ref DEFAULT_RECOGNIZER: Option<Recognizer> = match Recognizer::with_defaults() {
        Ok(recognizer) => Some(recognizer),
        Err(e) => {
            error!("Built-in vocabulary is broken: {}", e);
            None
        }
    };
}

/// Find every price in `text` using the built-in vocabulary
///
/// `strict` keeps only amounts marked with a currency symbol or ISO code.
pub fn recognize(text: &str, strict: bool) -> Vec<Price> {
    match DEFAULT_RECOGNIZER.as_ref() {
        Some(recognizer) => recognizer.recognize(text, Mode::from(strict)),
        None => Vec::new(),
    }
}
