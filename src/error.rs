//! Valuta Error Types
//!
//! Errors of the surrounding layers (configuration, rate tables, I/O).
//! The recognition pipeline itself never fails; see `core::normalizer::ParseError`
//! and `vocabulary::VocabularyError` for the stage-local errors.

use thiserror::Error;

/// Central error type for Valuta
#[derive(Error, Debug)]
pub enum ValutaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate table error: {0}")]
    Rates(String),

    #[error(transparent)]
    Vocabulary(#[from] crate::vocabulary::VocabularyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Valuta operations
pub type ValutaResult<T> = Result<T, ValutaError>;
