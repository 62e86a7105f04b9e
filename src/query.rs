//! Query interpretation
//!
//! Pulls an optional minimum-experience threshold out of free text. The
//! default policy takes the first number in the query whether or not a unit
//! follows it, so "devs in sector 62" filters on 62. That false positive is
//! accepted behaviour; [`ThresholdPolicy::RequireUnit`] is the stricter mode.
//!
//! Any Unicode decimal digit counts, so "٣ years" and "５ years" both give 3
//! and 5.

use crate::error::{Result, ScoutError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Shown to the user when the query is blank
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";

/// First digit run, optionally followed by `+` and a year/experience unit
static ANY_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*\+?\s*(?:year|yr|yrs|experience|exp)?")
        .expect("threshold pattern is valid")
});

/// Digit run that must be followed by `+` or a unit word
static WITH_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*(?:\+|(?:years?|yrs?|experience|exp)\b)")
        .expect("threshold pattern is valid")
});

/// A single Unicode decimal digit (general category Nd)
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").expect("digit pattern is valid"));

/// How strictly a number must look like an experience requirement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdPolicy {
    /// Any first number is a threshold
    #[default]
    AnyNumber,
    /// Only numbers followed by `+` or a unit word count
    RequireUnit,
}

/// A validated user query plus its parsed threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub raw_query: String,
    /// `None` disables experience filtering
    pub threshold: Option<u32>,
}

impl SearchQuery {
    pub fn parse(raw: &str, policy: ThresholdPolicy) -> Result<Self> {
        let raw = validate_query(raw)?;
        Ok(Self {
            raw_query: raw.to_string(),
            threshold: extract_threshold(raw, policy),
        })
    }
}

/// Reject empty and whitespace-only queries
pub fn validate_query(raw: &str) -> Result<&str> {
    if raw.trim().is_empty() {
        return Err(ScoutError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }
    Ok(raw)
}

/// Extract the experience threshold; only the first match is used.
///
/// Digit runs too large for `u32` saturate, which filters out every profile.
pub fn extract_threshold(raw: &str, policy: ThresholdPolicy) -> Option<u32> {
    let lowered = raw.to_lowercase();
    let pattern = match policy {
        ThresholdPolicy::AnyNumber => &*ANY_NUMBER,
        ThresholdPolicy::RequireUnit => &*WITH_UNIT,
    };

    let digits = pattern.captures(&lowered)?.get(1)?.as_str();
    let mut value: u32 = 0;
    for c in digits.chars() {
        let d = decimal_value(c)?;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(d))
            .unwrap_or(u32::MAX);
    }
    Some(value)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a Unicode decimal digit.
///
/// Nd digits are assigned in contiguous runs of ten from zero to nine, so a
/// digit's value is its distance from the start of its run, modulo ten.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut offset = 0u32;
    let mut cp = c as u32;
    while let Some(prev) = cp.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        cp -= 1;
    }
    Some(offset % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any(q: &str) -> Option<u32> {
        extract_threshold(q, ThresholdPolicy::AnyNumber)
    }

    fn strict(q: &str) -> Option<u32> {
        extract_threshold(q, ThresholdPolicy::RequireUnit)
    }

    #[test]
    fn extracts_number_with_unit() {
        assert_eq!(any("Python 3 years experience"), Some(3));
        assert_eq!(any("Java 5+ YRS"), Some(5));
        assert_eq!(any("at least 4"), Some(4));
        assert_eq!(any("data engineer 6yr"), Some(6));
    }

    #[test]
    fn no_digits_means_no_threshold() {
        assert_eq!(any("machine learning"), None);
        assert_eq!(strict("machine learning"), None);
    }

    #[test]
    fn only_first_number_is_used() {
        assert_eq!(any("2 years python, 7 years java"), Some(2));
    }

    #[test]
    fn unrelated_number_is_a_threshold_by_default() {
        assert_eq!(any("developers in sector 62 python"), Some(62));
        assert_eq!(any("C++ 11 backend"), Some(11));
    }

    #[test]
    fn require_unit_skips_bare_numbers() {
        assert_eq!(strict("developers in sector 62 python"), None);
        assert_eq!(strict("sector 62 with 3 years"), Some(3));
        assert_eq!(strict("react 2+"), Some(2));
        assert_eq!(strict("4 exp in nlp"), Some(4));
        assert_eq!(strict("10 yrs"), Some(10));
        assert_eq!(strict("3 yearly reviews"), None);
    }

    #[test]
    fn non_ascii_digits_are_thresholds() {
        assert_eq!(any("python ٣ years"), Some(3));
        assert_eq!(any("python ５ years"), Some(5));
        assert_eq!(any("nlp ٢٥ yrs"), Some(25));
        assert_eq!(any("java \u{1D7D7} years"), Some(9));
        assert_eq!(strict("sector ٦٢ with ٣ years"), Some(3));
    }

    #[test]
    fn first_number_wins_across_scripts() {
        assert_eq!(any("٧ yrs rust, 2 years go"), Some(7));
    }

    #[test]
    fn oversized_threshold_saturates() {
        assert_eq!(any("99999999999999999999 years"), Some(u32::MAX));
    }

    #[test]
    fn blank_queries_are_rejected() {
        for q in ["", "   ", "\t\n"] {
            match SearchQuery::parse(q, ThresholdPolicy::AnyNumber) {
                Err(ScoutError::Validation(msg)) => assert_eq!(msg, EMPTY_QUERY_MESSAGE),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_keeps_raw_query() {
        let q = SearchQuery::parse("  NLP 3 years ", ThresholdPolicy::AnyNumber).unwrap();
        assert_eq!(q.raw_query, "  NLP 3 years ");
        assert_eq!(q.threshold, Some(3));
    }
}
