//! False-positive filtering and disambiguation
//!
//! Drops candidates that cannot be prices, picks one currency per number
//! and turns the survivors into `Price`s, left to right.

use super::normalizer::{compose_multipliers, normalize, ParseError};
use super::scanner::{CandidateMatch, CurrencyToken, Side};
use super::Mode;
use crate::price::Price;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Resolve candidates into prices
///
/// Candidates must be ordered by anchor, as the scanner returns them.
/// A currency token goes to the number sitting closest to it; on equal
/// distance the leftmost number takes it.
pub fn filter(candidates: Vec<CandidateMatch>, mode: Mode) -> Vec<Price> {
    let mut prices = Vec::new();
    let mut claimed: HashSet<usize> = HashSet::new();

    let eligible: Vec<CandidateMatch> = candidates
        .into_iter()
        .filter(|c| is_eligible(c, mode))
        .collect();

    let groups: Vec<Vec<&CandidateMatch>> = eligible
        .chunk_by(|a, b| a.anchor == b.anchor)
        .map(|group| {
            let mut alternatives: Vec<&CandidateMatch> = group.iter().collect();
            alternatives.sort_by_key(|c| c.currency.map(rank));
            alternatives
        })
        .collect();

    // Smallest gap at which some number wants each token as its first choice
    let mut nearest: HashMap<usize, usize> = HashMap::new();
    for currency in groups.iter().filter_map(|g| g.first().and_then(|c| c.currency)) {
        nearest
            .entry(currency.start)
            .and_modify(|gap| *gap = (*gap).min(currency.gap))
            .or_insert(currency.gap);
    }

    for alternatives in &groups {
        let free = alternatives.iter().find_map(|c| {
            let currency = c.currency?;
            let taken = claimed.contains(&currency.start);
            let closer = nearest
                .get(&currency.start)
                .is_some_and(|&gap| gap < currency.gap);
            (!taken && !closer).then_some((*c, currency))
        });

        let Some((winner, currency)) = free else {
            if let Some(first) = alternatives.first() {
                debug!("Currency for amount at {} already taken", first.anchor);
            }
            continue;
        };

        match amount_of(winner) {
            Ok(amount) => match Price::new(amount, currency.code) {
                Some(price) => {
                    claimed.insert(currency.start);
                    prices.push(price);
                }
                None => debug!("Rejected amount {} {}", amount, currency.code),
            },
            Err(e) => debug!("Dropped candidate at {}: {}", winner.anchor, e),
        }
    }

    prices
}

fn is_eligible(candidate: &CandidateMatch, mode: Mode) -> bool {
    if candidate.currency.is_none() {
        return false;
    }
    if candidate.non_monetary {
        debug!("Skipping model number or unit at {}", candidate.anchor);
        return false;
    }
    mode == Mode::Lenient || candidate.strict_eligible
}

/// Sort key: highest confidence, a written token over one implied by
/// slang, then nearest, then the preceding token
fn rank(currency: CurrencyToken) -> (Reverse<u8>, bool, usize, Side) {
    (
        Reverse(currency.kind.confidence()),
        currency.side == Side::Implied,
        currency.gap,
        currency.side,
    )
}

fn amount_of(candidate: &CandidateMatch) -> Result<f64, ParseError> {
    let factor = compose_multipliers(&candidate.multipliers)?;
    match &candidate.span {
        Some(span) => normalize(&span.raw, factor),
        None => Ok(factor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::{MultiplierToken, NumericSpan};
    use crate::price::CurrencyCode;
    use crate::vocabulary::{CurrencyKind, MultiplierClass};

    fn token(start: usize, code: CurrencyCode, kind: CurrencyKind, side: Side) -> CurrencyToken {
        CurrencyToken {
            start,
            end: start + 3,
            code,
            kind,
            gap: 1,
            side,
        }
    }

    fn candidate(anchor: usize, raw: &str, currency: Option<CurrencyToken>) -> CandidateMatch {
        CandidateMatch {
            anchor,
            span: Some(NumericSpan {
                start: anchor,
                end: anchor + raw.len(),
                raw: raw.to_string(),
            }),
            currency,
            multipliers: Vec::new(),
            strict_eligible: currency.is_some_and(|c| c.kind.is_explicit()),
            non_monetary: false,
        }
    }

    #[test]
    fn test_drops_currency_less_and_non_monetary() {
        let usd = token(15, CurrencyCode::Usd, CurrencyKind::Code, Side::After);
        let mut model = candidate(10, "5060", Some(usd));
        model.non_monetary = true;

        let prices = filter(vec![candidate(0, "100", None), model], Mode::Lenient);
        assert!(prices.is_empty());
    }

    #[test]
    fn test_strict_keeps_only_explicit_currencies() {
        let bucks = token(4, CurrencyCode::Usd, CurrencyKind::Word, Side::After);
        let eur = token(22, CurrencyCode::Eur, CurrencyKind::Code, Side::After);
        let word = candidate(0, "100", Some(bucks));
        let code = candidate(20, "5", Some(eur));

        let lenient = filter(vec![word.clone(), code.clone()], Mode::Lenient);
        assert_eq!(lenient.len(), 2);

        let strict = filter(vec![word, code], Mode::Strict);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].currency(), CurrencyCode::Eur);
    }

    #[test]
    fn test_prefers_confidence_over_gap() {
        let mut rubles = token(8, CurrencyCode::Rub, CurrencyKind::Word, Side::After);
        rubles.gap = 0;
        let usd = token(0, CurrencyCode::Usd, CurrencyKind::Code, Side::Before);

        let prices = filter(
            vec![candidate(4, "100", Some(rubles)), candidate(4, "100", Some(usd))],
            Mode::Lenient,
        );
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].currency(), CurrencyCode::Usd);
    }

    #[test]
    fn test_prefers_preceding_token_on_tie() {
        // "rub 100 usd"
        let rub = token(0, CurrencyCode::Rub, CurrencyKind::Code, Side::Before);
        let usd = token(8, CurrencyCode::Usd, CurrencyKind::Code, Side::After);

        let prices = filter(
            vec![candidate(4, "100", Some(rub)), candidate(4, "100", Some(usd))],
            Mode::Lenient,
        );
        assert_eq!(prices[0].currency(), CurrencyCode::Rub);
    }

    #[test]
    fn test_currency_claimed_once() {
        // "100 rub 200"
        let after = token(4, CurrencyCode::Rub, CurrencyKind::Code, Side::After);
        let before = token(4, CurrencyCode::Rub, CurrencyKind::Code, Side::Before);

        let prices = filter(
            vec![candidate(0, "100", Some(after)), candidate(8, "200", Some(before))],
            Mode::Lenient,
        );
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].amount(), 100.0);
    }

    #[test]
    fn test_adjacent_number_wins_the_currency() {
        // "2 $50": the symbol touches 50, sits a space away from 2
        let mut glued = token(2, CurrencyCode::Usd, CurrencyKind::Symbol, Side::Before);
        glued.gap = 0;
        let spaced = token(2, CurrencyCode::Usd, CurrencyKind::Symbol, Side::After);

        let prices = filter(
            vec![candidate(0, "2", Some(spaced)), candidate(3, "50", Some(glued))],
            Mode::Lenient,
        );
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].amount(), 50.0);
    }

    #[test]
    fn test_written_currency_beats_slang() {
        let slang = MultiplierToken {
            start: 2,
            end: 10,
            factor: 1e6,
            class: MultiplierClass::Slang,
            implies: Some(CurrencyCode::Rub),
        };
        let implied = CurrencyToken {
            start: 2,
            end: 10,
            code: CurrencyCode::Rub,
            kind: CurrencyKind::Word,
            gap: 0,
            side: Side::Implied,
        };

        // "2 ляма баксов": a word after the slang still outranks it
        let bucks = token(11, CurrencyCode::Usd, CurrencyKind::Word, Side::After);
        let mut by_word = candidate(0, "2", Some(bucks));
        let mut by_slang = candidate(0, "2", Some(implied));
        by_word.multipliers.push(slang);
        by_slang.multipliers.push(slang);

        let prices = filter(vec![by_slang.clone(), by_word], Mode::Lenient);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].currency(), CurrencyCode::Usd);
        assert_eq!(prices[0].amount(), 2_000_000.0);

        // Without a written token the slang currency is the fallback
        let prices = filter(vec![by_slang], Mode::Lenient);
        assert_eq!(prices[0].currency(), CurrencyCode::Rub);
    }

    #[test]
    fn test_applies_multipliers_and_drops_malformed() {
        let dollars = token(13, CurrencyCode::Usd, CurrencyKind::Word, Side::After);
        let mut scaled = candidate(0, "2,9", Some(dollars));
        scaled.multipliers.push(MultiplierToken {
            start: 4,
            end: 12,
            factor: 1e6,
            class: MultiplierClass::Scale,
            implies: None,
        });

        let usd = token(26, CurrencyCode::Usd, CurrencyKind::Code, Side::After);
        let broken = candidate(20, "1.2.3", Some(usd));

        let prices = filter(vec![scaled, broken], Mode::Lenient);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].amount(), 2_900_000.0);
    }

    #[test]
    fn test_standalone_slang_amount() {
        let rub = CurrencyToken {
            start: 0,
            end: 12,
            code: CurrencyCode::Rub,
            kind: CurrencyKind::Word,
            gap: 0,
            side: Side::Implied,
        };
        let standalone = CandidateMatch {
            anchor: 0,
            span: None,
            currency: Some(rub),
            multipliers: vec![MultiplierToken {
                start: 0,
                end: 12,
                factor: 1e3,
                class: MultiplierClass::Slang,
                implies: Some(CurrencyCode::Rub),
            }],
            strict_eligible: false,
            non_monetary: false,
        };

        let prices = filter(vec![standalone.clone()], Mode::Lenient);
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].amount(), 1000.0);
        assert!(filter(vec![standalone], Mode::Strict).is_empty());
    }
}
