//! Core recognition pipeline
//!
//! Sanitize, scan, normalize and filter. Each stage is usable on its own;
//! `Recognizer` chains them.

pub mod filter;
pub mod normalizer;
pub mod recognizer;
pub mod sanitizer;
pub mod scanner;

/// How picky the recognizer is about currency evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Accept currency words and slang
    #[default]
    Lenient,
    /// Only symbols and ISO codes, for noisy OCR text
    Strict,
}

impl From<bool> for Mode {
    fn from(strict: bool) -> Self {
        if strict {
            Mode::Strict
        } else {
            Mode::Lenient
        }
    }
}
