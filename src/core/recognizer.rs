//! Amount recognizer
//!
//! Owns a shared vocabulary and runs the four pipeline stages. A
//! `Recognizer` holds no per-call state, so one instance can serve any
//! number of threads.

use super::filter::filter;
use super::sanitizer::{Sanitizer, DEFAULT_MAX_INPUT_CHARS};
use super::scanner::{Scanner, DEFAULT_ADJACENCY_WINDOW};
use super::Mode;
use crate::price::Price;
use crate::vocabulary::{Vocabulary, VocabularyError};
use std::sync::Arc;
use tracing::debug;

/// Engine limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Input beyond this many characters is ignored
    pub max_input_chars: usize,
    /// Max characters between a number and its currency
    pub adjacency_window: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            adjacency_window: DEFAULT_ADJACENCY_WINDOW,
        }
    }
}

/// Finds prices in free text
#[derive(Debug, Clone)]
pub struct Recognizer {
    sanitizer: Sanitizer,
    scanner: Scanner,
}

impl Recognizer {
    pub fn new(vocabulary: Arc<Vocabulary>, config: RecognizerConfig) -> Self {
        Self {
            sanitizer: Sanitizer::new(config.max_input_chars),
            scanner: Scanner::new(vocabulary, config.adjacency_window),
        }
    }

    /// Recognizer over the built-in vocabulary with default limits
    pub fn with_defaults() -> Result<Self, VocabularyError> {
        let vocabulary = Arc::new(Vocabulary::builtin()?);
        Ok(Self::new(vocabulary, RecognizerConfig::default()))
    }

    /// Extract every price from `text`, left to right
    ///
    /// Never fails: text without a recognizable price yields an empty list.
    pub fn recognize(&self, text: &str, mode: Mode) -> Vec<Price> {
        let clean = self.sanitizer.sanitize(text);
        if clean.is_empty() {
            return Vec::new();
        }

        let candidates = self.scanner.scan(&clean);
        debug!("{} candidates in {} chars", candidates.len(), clean.len());

        filter(candidates, mode)
    }
}
