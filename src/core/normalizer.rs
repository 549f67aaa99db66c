//! Number Normalization
//!
//! Converts a numeric span as written ("1 000", "1,5", "1.234,56") into an
//! `f64`, and folds a multiplier chain into a single factor.

use super::scanner::MultiplierToken;
use crate::vocabulary::MultiplierClass;
use thiserror::Error;

/// Why a single candidate could not be turned into an amount
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("malformed number '{0}'")]
    Malformed(String),

    #[error("number '{0}' is out of range")]
    Overflow(String),

    #[error("ambiguous multiplier chain: {0}")]
    AmbiguousMultiplier(String),
}

/// Parse `raw` and scale it by `factor`
pub fn normalize(raw: &str, factor: f64) -> Result<f64, ParseError> {
    let value = parse_number(raw)? * factor;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::Overflow(raw.to_string()))
    }
}

/// Resolve thousands and decimal separators
pub fn parse_number(raw: &str) -> Result<f64, ParseError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let malformed = || ParseError::Malformed(raw.to_string());

    let allowed = |c: char| c.is_ascii_digit() || c == ',' || c == '.';
    if compact.is_empty() || !compact.chars().all(allowed) {
        return Err(malformed());
    }

    let has_comma = compact.contains(',');
    let has_dot = compact.contains('.');

    let (integer, fraction) = match (has_comma, has_dot) {
        (false, false) => (compact.clone(), None),
        (true, false) => split_single_kind(&compact, ',', true).ok_or_else(malformed)?,
        (false, true) => split_single_kind(&compact, '.', false).ok_or_else(malformed)?,
        (true, true) => {
            let last = compact.rfind([',', '.']).ok_or_else(malformed)?;
            let decimal = compact[last..].chars().next().ok_or_else(malformed)?;
            let grouping = if decimal == ',' { '.' } else { ',' };
            let head = &compact[..last];
            if head.contains(decimal) {
                return Err(malformed());
            }
            let groups: Vec<&str> = head.split(grouping).collect();
            if !is_thousands_grouping(&groups) {
                return Err(malformed());
            }
            (groups.concat(), Some(compact[last + 1..].to_string()))
        }
    };

    let clean = match fraction {
        Some(fraction) => format!("{}.{}", integer, fraction),
        None => integer,
    };

    let value: f64 = clean.parse().map_err(|_| malformed())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::Overflow(raw.to_string()))
    }
}

/// Numbers that use only one separator kind. A lone comma followed by
/// exactly three digits is a thousands separator (unless the head is "0");
/// a lone dot is always decimal.
fn split_single_kind(
    compact: &str,
    sep: char,
    lone_may_group: bool,
) -> Option<(String, Option<String>)> {
    let groups: Vec<&str> = compact.split(sep).collect();

    if let [head, tail] = groups.as_slice() {
        let grouped = lone_may_group && tail.len() == 3 && head.len() <= 3 && *head != "0";
        return if grouped {
            Some((groups.concat(), None))
        } else {
            Some((head.to_string(), Some(tail.to_string())))
        };
    }

    is_thousands_grouping(&groups).then(|| (groups.concat(), None))
}

/// First group 1-3 digits, every later group exactly 3
fn is_thousands_grouping(groups: &[&str]) -> bool {
    match groups.split_first() {
        Some((first, rest)) => {
            !rest.is_empty()
                && (1..=3).contains(&first.len())
                && rest.iter().all(|g| g.len() == 3)
        }
        None => false,
    }
}

/// Fold a multiplier chain into one factor
///
/// Allowed: nothing, one multiplier of any class, or a suffix/scale word
/// followed by slang ("10k косарей").
pub fn compose_multipliers(chain: &[MultiplierToken]) -> Result<f64, ParseError> {
    match chain {
        [] => Ok(1.0),
        [only] => Ok(only.factor),
        [first, second]
            if second.class == MultiplierClass::Slang
                && matches!(first.class, MultiplierClass::Suffix | MultiplierClass::Scale) =>
        {
            Ok(first.factor * second.factor)
        }
        _ => {
            let classes: Vec<String> = chain.iter().map(|m| format!("{:?}", m.class)).collect();
            Err(ParseError::AmbiguousMultiplier(classes.join(" + ")))
        }
    }
}
