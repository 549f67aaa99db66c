//! Currency and multiplier vocabulary
//!
//! All spellings are compiled into a single Aho-Corasick automaton so one
//! pass over the text finds every currency, multiplier, product and unit
//! token, regardless of how large the tables grow.

mod tables;

use crate::price::CurrencyCode;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// How a currency was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyKind {
    /// Native symbol such as `$` or `₽`
    Symbol,
    /// ISO 4217 code (or ticker for crypto)
    Code,
    /// Name or slang word such as "рублей" or "баксов"
    Word,
}

impl CurrencyKind {
    /// Symbols and codes are trusted in OCR text, words are not
    pub fn is_explicit(self) -> bool {
        matches!(self, CurrencyKind::Symbol | CurrencyKind::Code)
    }

    /// Rank used when two currencies compete for one number
    pub fn confidence(self) -> u8 {
        if self.is_explicit() {
            2
        } else {
            1
        }
    }
}

/// Multiplier families, used by the composition table in the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiplierClass {
    /// Single letter glued to the digits: `5k`, `3м`
    Suffix,
    /// Scale words: "тысяч", "млн", "billion"
    Scale,
    /// Slang that also names the currency: "косарь", "лям"
    Slang,
}

/// What a vocabulary spelling means
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lexeme {
    Currency {
        code: CurrencyCode,
        kind: CurrencyKind,
    },
    Multiplier {
        factor: f64,
        class: MultiplierClass,
        implies: Option<CurrencyCode>,
        standalone: bool,
    },
    /// Product or chip name ("rtx", "iphone")
    Product,
    /// Unit that follows a quantity ("гб", "кг", "году")
    Unit,
}

/// A vocabulary token found in text (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub start: usize,
    pub end: usize,
    pub lexeme: Lexeme,
}

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("spelling '{0}' is listed more than once")]
    DuplicateSpelling(String),

    #[error("empty spelling in vocabulary table")]
    EmptySpelling,

    #[error("could not compile vocabulary automaton: {0}")]
    Automaton(#[from] aho_corasick::BuildError),
}

/// Compiled, immutable vocabulary
///
/// Build once and share through an `Arc`; matching never mutates it.
#[derive(Debug)]
pub struct Vocabulary {
    automaton: AhoCorasick,
    lexemes: Vec<Lexeme>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// The built-in Russian/English vocabulary
    pub fn builtin() -> Result<Self, VocabularyError> {
        let mut builder = VocabularyBuilder::new();

        for entry in tables::CURRENCIES {
            builder = builder
                .currency(entry.code, CurrencyKind::Symbol, entry.symbols)
                .currency(entry.code, CurrencyKind::Code, entry.codes)
                .currency(entry.code, CurrencyKind::Word, entry.words);
        }

        for entry in tables::MULTIPLIERS {
            builder = builder.multiplier(
                entry.factor,
                entry.class,
                entry.implies,
                entry.spellings,
                entry.standalone,
            );
        }

        builder
            .products(tables::PRODUCTS)
            .units(tables::UNITS)
            .build()
    }

    /// Number of spellings in the vocabulary
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }

    /// Exact lookup of a single spelling (case-insensitive)
    pub fn lookup(&self, spelling: &str) -> Option<Lexeme> {
        self.index
            .get(&spelling.to_lowercase())
            .map(|&id| self.lexemes[id])
    }

    /// Find every vocabulary token in already lower-cased text
    ///
    /// Word spellings must stand on word boundaries: a letter directly
    /// before or after rejects the hit, digits and punctuation do not.
    pub fn find_all(&self, text: &str) -> Vec<Hit> {
        let mut hits = Vec::new();

        for m in self.automaton.find_iter(text) {
            let matched = &text[m.start()..m.end()];
            let starts_with_letter = matched.chars().next().is_some_and(char::is_alphabetic);
            let ends_with_letter = matched.chars().next_back().is_some_and(char::is_alphabetic);

            let letter_before = text[..m.start()]
                .chars()
                .next_back()
                .is_some_and(char::is_alphabetic);
            let letter_after = text[m.end()..]
                .chars()
                .next()
                .is_some_and(char::is_alphabetic);

            if (starts_with_letter && letter_before) || (ends_with_letter && letter_after) {
                continue;
            }

            hits.push(Hit {
                start: m.start(),
                end: m.end(),
                lexeme: self.lexemes[m.pattern().as_usize()],
            });
        }

        hits
    }
}

/// Assembles spellings and compiles them into a `Vocabulary`
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    spellings: Vec<String>,
    lexemes: Vec<Lexeme>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn currency(mut self, code: CurrencyCode, kind: CurrencyKind, spellings: &[&str]) -> Self {
        for spelling in spellings {
            self.push(spelling, Lexeme::Currency { code, kind });
        }
        self
    }

    pub fn multiplier(
        mut self,
        factor: f64,
        class: MultiplierClass,
        implies: Option<CurrencyCode>,
        spellings: &[&str],
        standalone: &[&str],
    ) -> Self {
        for spelling in spellings {
            self.push(
                spelling,
                Lexeme::Multiplier {
                    factor,
                    class,
                    implies,
                    standalone: standalone.contains(spelling),
                },
            );
        }
        self
    }

    pub fn products(mut self, spellings: &[&str]) -> Self {
        for spelling in spellings {
            self.push(spelling, Lexeme::Product);
        }
        self
    }

    pub fn units(mut self, spellings: &[&str]) -> Self {
        for spelling in spellings {
            self.push(spelling, Lexeme::Unit);
        }
        self
    }

    fn push(&mut self, spelling: &str, lexeme: Lexeme) {
        self.spellings.push(spelling.to_lowercase());
        self.lexemes.push(lexeme);
    }

    /// Validate the tables and compile the automaton
    pub fn build(self) -> Result<Vocabulary, VocabularyError> {
        let mut index = HashMap::with_capacity(self.spellings.len());

        for (id, spelling) in self.spellings.iter().enumerate() {
            if spelling.is_empty() {
                return Err(VocabularyError::EmptySpelling);
            }
            if index.insert(spelling.clone(), id).is_some() {
                return Err(VocabularyError::DuplicateSpelling(spelling.clone()));
            }
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&self.spellings)?;

        debug!("Compiled vocabulary with {} spellings", self.spellings.len());

        Ok(Vocabulary {
            automaton,
            lexemes: self.lexemes,
            index,
        })
    }
}
