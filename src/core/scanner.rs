//! Candidate Scanner
//!
//! Finds numeric spans in sanitized text and pairs each one with the
//! multipliers and currency tokens around it. The scanner only proposes;
//! choosing between alternatives is the filter's job.

use crate::price::CurrencyCode;
use crate::vocabulary::{CurrencyKind, Hit, Lexeme, MultiplierClass, Vocabulary};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

/// Default number of characters allowed between a number and its currency
pub const DEFAULT_ADJACENCY_WINDOW: usize = 3;

/// Longest multiplier chain after a number ("10k косарей")
const MAX_CHAIN: usize = 2;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"[0-9]+(?:[.,][0-9]+)*").expect("valid regex");
    static ref GROUP_HEAD: Regex = Regex::new(r"^[0-9]{1,3}$").expect("valid regex");
    static ref GROUP_TAIL: Regex = Regex::new(r"^[0-9]{3}(?:[.,][0-9]{1,2})?$").expect("valid regex");
}

/// Digits as written, with byte offsets into the lower-cased text
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSpan {
    pub start: usize,
    pub end: usize,
    pub raw: String,
}

/// Where a currency token sits relative to its number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    Before,
    After,
    /// Named by a slang multiplier rather than a separate token
    Implied,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyToken {
    pub start: usize,
    pub end: usize,
    pub code: CurrencyCode,
    pub kind: CurrencyKind,
    /// Characters between the token and the number (or chain)
    pub gap: usize,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiplierToken {
    pub start: usize,
    pub end: usize,
    pub factor: f64,
    pub class: MultiplierClass,
    pub implies: Option<CurrencyCode>,
}

/// One possible reading of an amount
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMatch {
    /// Offset used for grouping and ordering: the number start, or the
    /// slang word start for a standalone slang amount
    pub anchor: usize,
    /// `None` for standalone slang ("косарь")
    pub span: Option<NumericSpan>,
    pub currency: Option<CurrencyToken>,
    pub multipliers: Vec<MultiplierToken>,
    pub strict_eligible: bool,
    pub non_monetary: bool,
}

impl CandidateMatch {
    fn new(
        anchor: usize,
        span: Option<NumericSpan>,
        currency: Option<CurrencyToken>,
        multipliers: Vec<MultiplierToken>,
        non_monetary: bool,
    ) -> Self {
        let strict_eligible = currency.is_some_and(|c| c.kind.is_explicit());
        Self {
            anchor,
            span,
            currency,
            multipliers,
            strict_eligible,
            non_monetary,
        }
    }
}

/// Proposes candidate amounts from sanitized text
#[derive(Debug, Clone)]
pub struct Scanner {
    vocabulary: Arc<Vocabulary>,
    window: usize,
}

impl Scanner {
    pub fn new(vocabulary: Arc<Vocabulary>, window: usize) -> Self {
        Self { vocabulary, window }
    }

    /// Scan sanitized text. Candidates come back ordered by anchor.
    pub fn scan(&self, text: &str) -> Vec<CandidateMatch> {
        let lower = text.to_lowercase();
        let hits = self.vocabulary.find_all(&lower);
        let mut consumed = vec![false; hits.len()];
        let mut candidates = Vec::new();

        for span in numeric_spans(&lower) {
            let (chain, next) = self.multiplier_chain(&lower, &hits, &span, &mut consumed);
            let chain_end = chain.last().map_or(span.end, |m| m.end);

            let after = hits
                .get(next)
                .and_then(|hit| Some((hit, self.gap(&lower, chain_end, hit.start)?)));

            let first_before = hits.partition_point(|h| h.end <= span.start);
            let before = first_before
                .checked_sub(1)
                .and_then(|i| Some((&hits[i], self.gap(&lower, hits[i].end, span.start)?)));

            // Product names mark both neighbours, units only the number in front
            let model_or_unit = before.is_some_and(|(hit, _)| hit.lexeme == Lexeme::Product)
                || after.is_some_and(|(hit, _)| {
                    matches!(hit.lexeme, Lexeme::Product | Lexeme::Unit)
                });

            let non_monetary = model_or_unit
                || glued_to_letters(&lower, &span, &hits)
                || hyphen_joined(&lower, &span);

            let anchor = span.start;

            let mut alternatives: Vec<CurrencyToken> = [(before, Side::Before), (after, Side::After)]
                .into_iter()
                .filter_map(|(found, side)| {
                    let (hit, gap) = found?;
                    match hit.lexeme {
                        Lexeme::Currency { code, kind } => Some(CurrencyToken {
                            start: hit.start,
                            end: hit.end,
                            code,
                            kind,
                            gap,
                            side,
                        }),
                        _ => None,
                    }
                })
                .collect();

            // Slang names a currency of its own, weaker than any written one
            let slang = chain
                .last()
                .filter(|m| m.class == MultiplierClass::Slang)
                .and_then(|m| Some((m, m.implies?)));
            if let Some((slang, code)) = slang {
                alternatives.push(CurrencyToken {
                    start: slang.start,
                    end: slang.end,
                    code,
                    kind: CurrencyKind::Word,
                    gap: 0,
                    side: Side::Implied,
                });
            }

            if alternatives.is_empty() {
                candidates.push(CandidateMatch::new(anchor, Some(span), None, chain, non_monetary));
            } else {
                for currency in alternatives {
                    candidates.push(CandidateMatch::new(
                        anchor,
                        Some(span.clone()),
                        Some(currency),
                        chain.clone(),
                        non_monetary,
                    ));
                }
            }
        }

        for (hit, used) in hits.iter().zip(&consumed) {
            if *used {
                continue;
            }
            if let Lexeme::Multiplier {
                factor,
                class: MultiplierClass::Slang,
                implies: Some(code),
                standalone: true,
            } = hit.lexeme
            {
                let token = MultiplierToken {
                    start: hit.start,
                    end: hit.end,
                    factor,
                    class: MultiplierClass::Slang,
                    implies: Some(code),
                };
                let currency = CurrencyToken {
                    start: hit.start,
                    end: hit.end,
                    code,
                    kind: CurrencyKind::Word,
                    gap: 0,
                    side: Side::Implied,
                };
                candidates.push(CandidateMatch::new(
                    hit.start,
                    None,
                    Some(currency),
                    vec![token],
                    false,
                ));
            }
        }

        candidates.sort_by_key(|c| c.anchor);
        candidates
    }

    /// Collect multipliers following a span. Returns the chain and the
    /// index of the first hit after it.
    fn multiplier_chain(
        &self,
        text: &str,
        hits: &[Hit],
        span: &NumericSpan,
        consumed: &mut [bool],
    ) -> (Vec<MultiplierToken>, usize) {
        let mut chain = Vec::new();
        let mut cursor = span.end;
        let mut idx = hits.partition_point(|h| h.start < span.end);

        while chain.len() < MAX_CHAIN {
            let Some(hit) = hits.get(idx) else { break };
            let Lexeme::Multiplier {
                factor,
                class,
                implies,
                ..
            } = hit.lexeme
            else {
                break;
            };
            let Some(gap) = self.gap(text, cursor, hit.start) else {
                break;
            };

            // Suffixes only count glued to the digits: "5k", not "5 k"
            if class == MultiplierClass::Suffix && (gap != 0 || cursor != span.end) {
                break;
            }

            chain.push(MultiplierToken {
                start: hit.start,
                end: hit.end,
                factor,
                class,
                implies,
            });
            consumed[idx] = true;
            cursor = hit.end;
            idx += 1;

            if class == MultiplierClass::Slang {
                break;
            }
        }

        (chain, idx)
    }

    /// Length in chars of the gap between two offsets, if it is short
    /// enough and holds only whitespace or dots
    fn gap(&self, text: &str, from: usize, to: usize) -> Option<usize> {
        let between = text.get(from..to)?;
        let mut len = 0;
        for ch in between.chars() {
            if !(ch.is_whitespace() || ch == '.') {
                return None;
            }
            len += 1;
        }
        (len <= self.window).then_some(len)
    }
}

/// Regex spans, with space-grouped thousands ("1 000 000") merged
fn numeric_spans(text: &str) -> Vec<NumericSpan> {
    let mut spans: Vec<NumericSpan> = Vec::new();
    let mut can_extend = false;

    for m in NUMBER.find_iter(text) {
        if can_extend {
            if let Some(last) = spans.last_mut() {
                if &text[last.end..m.start()] == " " && GROUP_TAIL.is_match(m.as_str()) {
                    last.end = m.end();
                    last.raw = text[last.start..last.end].to_string();
                    can_extend = m.as_str().len() == 3;
                    continue;
                }
            }
        }

        can_extend = GROUP_HEAD.is_match(m.as_str());
        spans.push(NumericSpan {
            start: m.start(),
            end: m.end(),
            raw: m.as_str().to_string(),
        });
    }

    spans
}

/// Letters touching the digits that are not a currency or multiplier
/// ("i7", "5060ti", "rtx5060")
fn glued_to_letters(text: &str, span: &NumericSpan, hits: &[Hit]) -> bool {
    let after_len: usize = text[span.end..]
        .chars()
        .take_while(|c| c.is_alphabetic())
        .map(char::len_utf8)
        .sum();
    if after_len > 0 && !is_amount_token(hits, span.end, span.end + after_len) {
        return true;
    }

    let before_len: usize = text[..span.start]
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .map(char::len_utf8)
        .sum();
    before_len > 0 && !is_amount_token(hits, span.start - before_len, span.start)
}

fn is_amount_token(hits: &[Hit], start: usize, end: usize) -> bool {
    let idx = hits.partition_point(|h| h.start < start);
    hits.get(idx).is_some_and(|h| {
        h.start == start
            && h.end == end
            && matches!(h.lexeme, Lexeme::Currency { .. } | Lexeme::Multiplier { .. })
    })
}

/// Part of a hyphenated code such as "i7-12700"
fn hyphen_joined(text: &str, span: &NumericSpan) -> bool {
    if let Some(rest) = text[..span.start].strip_suffix('-') {
        if rest
            .chars()
            .rev()
            .take_while(|c| c.is_alphanumeric())
            .any(char::is_alphabetic)
        {
            return true;
        }
    }

    text[span.end..].strip_prefix('-').is_some_and(|rest| {
        rest.chars()
            .take_while(|c| c.is_alphanumeric())
            .any(char::is_alphabetic)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> Scanner {
        let vocab = Vocabulary::builtin().expect("built-in vocabulary must compile");
        Scanner::new(Arc::new(vocab), DEFAULT_ADJACENCY_WINDOW)
    }

    #[test]
    fn test_merges_space_grouped_thousands() {
        let spans = numeric_spans("1 000 000 рублей и 5 000");
        let raws: Vec<&str> = spans.iter().map(|s| s.raw.as_str()).collect();
        assert_eq!(raws, vec!["1 000 000", "5 000"]);

        let spans = numeric_spans("2021 100");
        assert_eq!(spans.len(), 2);

        let spans = numeric_spans("1 234.56 000");
        let raws: Vec<&str> = spans.iter().map(|s| s.raw.as_str()).collect();
        assert_eq!(raws, vec!["1 234.56", "000"]);
    }

    #[test]
    fn test_currency_before_and_after() {
        let candidates = scanner().scan("rub 100 usd");
        assert_eq!(candidates.len(), 2);
        let sides: Vec<Side> = candidates
            .iter()
            .filter_map(|c| c.currency.map(|t| t.side))
            .collect();
        assert_eq!(sides, vec![Side::Before, Side::After]);
        assert!(candidates.iter().all(|c| c.strict_eligible));
    }

    #[test]
    fn test_gap_rule_blocks_words_between() {
        let candidates = scanner().scan("100 и usd");
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].currency.is_none());
    }

    #[test]
    fn test_suffix_must_be_glued() {
        let candidates = scanner().scan("5k eur");
        assert_eq!(candidates[0].multipliers.len(), 1);
        assert_eq!(candidates[0].multipliers[0].class, MultiplierClass::Suffix);

        let candidates = scanner().scan("5 k eur");
        assert!(candidates[0].multipliers.is_empty());
        assert!(candidates[0].currency.is_none());
    }

    #[test]
    fn test_slang_chain_implies_rub() {
        let candidates = scanner().scan("10k косарей");
        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.multipliers.len(), 2);
        let currency = c.currency.expect("slang implies a currency");
        assert_eq!(currency.code, CurrencyCode::Rub);
        assert_eq!(currency.side, Side::Implied);
        assert!(!c.strict_eligible);
    }

    #[test]
    fn test_standalone_slang() {
        let candidates = scanner().scan("дай косарь");
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].span.is_none());
        assert_eq!(candidates[0].multipliers[0].factor, 1e3);

        // plural needs a number
        assert!(scanner().scan("косарей").is_empty());
    }

    #[test]
    fn test_marks_model_numbers() {
        let s = scanner();
        for text in ["rtx 5060", "5060 rtx", "i7", "5060ti", "rtx5060", "16 гб", "128 бит"] {
            let candidates = s.scan(text);
            assert!(
                candidates.iter().all(|c| c.non_monetary),
                "{} should be non-monetary",
                text
            );
        }

        let candidates = s.scan("i7-12700 за 30000 руб");
        let flags: Vec<bool> = candidates.iter().map(|c| c.non_monetary).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_units_mark_only_the_number_before() {
        let s = scanner();
        for text in ["ssd 512 гб 5000 руб", "в 2023 году 100 долларов", "мешок 2 кг 300 руб"] {
            let flags: Vec<bool> = s
                .scan(text)
                .iter()
                .map(|c| c.non_monetary)
                .collect();
            assert_eq!(flags, vec![true, false], "{}", text);
        }

        // product names still mark the number after them
        let candidates = s.scan("rtx 5060 5000 руб");
        let flags: Vec<bool> = candidates.iter().map(|c| c.non_monetary).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn test_slang_chain_keeps_written_currency() {
        let candidates = scanner().scan("$2 ляма");
        let sides: Vec<Side> = candidates
            .iter()
            .filter_map(|c| c.currency.map(|t| t.side))
            .collect();
        assert_eq!(sides, vec![Side::Before, Side::Implied]);
        assert!(candidates[0].strict_eligible);
        assert!(candidates.iter().all(|c| c.multipliers.len() == 1));

        let candidates = scanner().scan("5 косарей usd");
        let codes: Vec<CurrencyCode> = candidates
            .iter()
            .filter_map(|c| c.currency.map(|t| t.code))
            .collect();
        assert_eq!(codes, vec![CurrencyCode::Usd, CurrencyCode::Rub]);
    }

    #[test]
    fn test_glued_currency_is_not_a_model_number() {
        let s = scanner();
        for text in ["2000р", "usd100", "5k", "30€"] {
            assert!(s.scan(text).iter().all(|c| !c.non_monetary), "{}", text);
        }
    }
}
