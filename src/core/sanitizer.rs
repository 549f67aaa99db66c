//! Input Sanitization
//!
//! Turns raw chat or OCR text into a bounded, normalized string that the
//! scanner can trust: markup and invisible characters are gone and
//! whitespace is a single ASCII space.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

/// Default cap on input length, in characters
pub const DEFAULT_MAX_INPUT_CHARS: usize = 65_536;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex =
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid regex");
    static ref HTML_TAG: Regex = Regex::new(r"<[/!]?[a-zA-Z][^<>]*>").expect("valid regex");
}

/// Cleans untrusted text before scanning
#[derive(Debug, Clone)]
pub struct Sanitizer {
    max_input_chars: usize,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_CHARS)
    }
}

impl Sanitizer {
    pub fn new(max_input_chars: usize) -> Self {
        Self { max_input_chars }
    }

    /// Sanitize raw input. Never fails; oversized input is truncated.
    pub fn sanitize(&self, raw: &str) -> String {
        let bounded = self.truncate(raw);

        // NFKC folds full-width digits and symbols, NBSP becomes a space.
        // Folding can expand ligatures, so the cap is applied again.
        let expanded: String = bounded.nfkc().collect();
        let folded = self.truncate(&expanded);

        let without_scripts = SCRIPT_BLOCK.replace_all(folded, " ");
        let without_tags = HTML_TAG.replace_all(&without_scripts, " ");

        let mut result = String::with_capacity(without_tags.len());
        let mut prev_whitespace = true;

        for ch in without_tags.chars() {
            let ch = if is_markup_char(ch) { ' ' } else { ch };

            if ch.is_whitespace() {
                if !prev_whitespace {
                    result.push(' ');
                    prev_whitespace = true;
                }
            } else if !is_invisible(ch) {
                result.push(ch);
                prev_whitespace = false;
            }
        }

        result.truncate(result.trim_end().len());
        result
    }

    fn truncate<'a>(&self, raw: &'a str) -> &'a str {
        match raw.char_indices().nth(self.max_input_chars) {
            Some((cut, _)) => {
                warn!(
                    "Input longer than {} chars, truncating ({} bytes dropped)",
                    self.max_input_chars,
                    raw.len() - cut
                );
                &raw[..cut]
            }
            None => raw,
        }
    }
}

fn is_markup_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | '&' | '"' | '`')
}

/// Control characters plus the zero-width and bidi format characters
/// that OCR and copy-paste leave behind
fn is_invisible(ch: char) -> bool {
    ch.is_control()
        || matches!(
            ch,
            '\u{00AD}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{2069}'
                | '\u{FEFF}'
        )
}
