//! Decimal text handling for grades and credit points.
//!
//! The portal renders numbers with a German decimal comma (`"1,7"`), leaves
//! cells blank for ungraded courses and occasionally puts free text (`"bestanden"`)
//! where a number would be. Values that do not pass [`NumericPolicy::accepts`]
//! are left out of the statistics instead of being reported as errors.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{LsfError, Result};

// ── NumericPolicy ─────────────────────────────────────────────────────────────

/// Which strings count as numbers during aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Drop at most one `.` and require every remaining character to be a
    /// digit (see [`is_digit`]). Also lets through `"23."` and `".23"`, which
    /// existing log files already contain.
    #[default]
    Legacy,
    /// Digits with an optional fractional part: `^[0-9]+(\.[0-9]+)?$`.
    Strict,
}

impl NumericPolicy {
    /// Pick the policy from the `--strict-numbers` flag.
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Legacy
        }
    }

    /// `true` when `raw` (before normalisation) should count as a number.
    pub fn accepts(self, raw: &str) -> bool {
        let normalized = normalize(raw);
        match self {
            Self::Legacy => {
                let without_dot = normalized.replacen('.', "", 1);
                !without_dot.is_empty() && without_dot.chars().all(is_digit)
            }
            Self::Strict => strict_pattern().is_match(&normalized),
        }
    }
}

fn strict_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("regex is valid"))
}

// ── Digit classes ─────────────────────────────────────────────────────────────

/// Code points of the `0` of every decimal digit run (general category Nd).
/// Each run holds the ten digits `0..=9` in order.
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Digits that are not decimal digits: superscripts, subscripts, circled and
/// parenthesised forms. They pass the legacy check but cannot be converted.
const NON_DECIMAL_DIGITS: &[(u32, u32)] = &[
    (0x00B2, 0x00B3),
    (0x00B9, 0x00B9),
    (0x1369, 0x1371),
    (0x19DA, 0x19DA),
    (0x2070, 0x2070),
    (0x2074, 0x2079),
    (0x2080, 0x2089),
    (0x2460, 0x2468),
    (0x2474, 0x247C),
    (0x2488, 0x2490),
    (0x24EA, 0x24EA),
    (0x24F5, 0x24FD),
    (0x24FF, 0x24FF),
    (0x2776, 0x277E),
    (0x2780, 0x2788),
    (0x278A, 0x2792),
    (0x10A40, 0x10A43),
    (0x10E60, 0x10E68),
    (0x11052, 0x1105A),
    (0x1F100, 0x1F10A),
];

/// Value of `c` if it is a decimal digit in any script (`'٢'` is 2).
pub fn decimal_value(c: char) -> Option<u8> {
    let code = u32::from(c);
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .map(|&zero| (code - zero) as u8)
}

/// Decimal digits plus the superscript-like digit forms.
///
/// Fractions (`'½'`), Roman numerals and other numeric symbols are not digits.
pub fn is_digit(c: char) -> bool {
    if decimal_value(c).is_some() {
        return true;
    }
    let code = u32::from(c);
    NON_DECIMAL_DIGITS
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&code))
}

// ── Conversion ────────────────────────────────────────────────────────────────

/// Replace the decimal comma with a dot. Nothing else is touched.
pub fn normalize(raw: &str) -> String {
    raw.replace(',', ".")
}

/// Convert a value to `f64` after comma normalisation.
///
/// Decimal digits of any script are read as their ASCII counterparts, so
/// `"٢,٣"` is 2.3. Superscript digits pass the legacy check and still fail here.
pub fn parse_number(raw: &str) -> Result<f64> {
    normalize(raw)
        .chars()
        .map(|c| decimal_value(c).map_or(c, |d| char::from(b'0' + d)))
        .collect::<String>()
        .parse::<f64>()
        .map_err(|_| LsfError::InvalidNumber(raw.to_string()))
}

/// Arithmetic mean of every accepted value; `0.0` when none is accepted.
pub fn mean_of_valid<S: AsRef<str>>(values: &[S], policy: NumericPolicy) -> Result<f64> {
    let numbers = valid_numbers(values, policy)?;
    if numbers.is_empty() {
        return Ok(0.0);
    }
    Ok(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

/// Sum of every accepted value; `0.0` when none is accepted.
pub fn sum_of_valid<S: AsRef<str>>(values: &[S], policy: NumericPolicy) -> Result<f64> {
    Ok(valid_numbers(values, policy)?.iter().sum())
}

fn valid_numbers<S: AsRef<str>>(values: &[S], policy: NumericPolicy) -> Result<Vec<f64>> {
    let mut numbers = Vec::with_capacity(values.len());
    for value in values {
        let value: &str = value.as_ref();
        if policy.accepts(value) {
            numbers.push(parse_number(value)?);
        }
    }
    Ok(numbers)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── accepts (legacy) ──────────────────────────────────────────────────────

    #[test]
    fn test_legacy_accepts_comma_decimal() {
        assert!(NumericPolicy::Legacy.accepts("2,5"));
        assert!(approx(parse_number("2,5").unwrap(), 2.5));
    }

    #[test]
    fn test_legacy_accepts_integer() {
        assert!(NumericPolicy::Legacy.accepts("23"));
        assert!(approx(parse_number("23").unwrap(), 23.0));
    }

    #[test]
    fn test_legacy_rejects_garbage() {
        for raw in ["2.5.1", "2,5,1", "abc", "-1", "+2", "", ".", " 2,0", "1e3"] {
            assert!(!NumericPolicy::Legacy.accepts(raw), "{raw:?} must be rejected");
        }
    }

    #[test]
    fn test_legacy_keeps_degenerate_forms() {
        assert!(NumericPolicy::Legacy.accepts("23."));
        assert!(NumericPolicy::Legacy.accepts(".23"));
        assert!(NumericPolicy::Legacy.accepts("23,"));
        assert!(approx(parse_number("23.").unwrap(), 23.0));
        assert!(approx(parse_number(".23").unwrap(), 0.23));
    }

    // ── accepts (strict) ──────────────────────────────────────────────────────

    #[test]
    fn test_strict_accepts_well_formed() {
        assert!(NumericPolicy::Strict.accepts("2,5"));
        assert!(NumericPolicy::Strict.accepts("23"));
        assert!(NumericPolicy::Strict.accepts("1.0"));
    }

    #[test]
    fn test_strict_rejects_degenerate_forms() {
        for raw in ["23.", ".23", "2.5.1", "abc", "", "\u{0662}"] {
            assert!(!NumericPolicy::Strict.accepts(raw), "{raw:?} must be rejected");
        }
    }

    #[test]
    fn test_from_strict_flag() {
        assert_eq!(NumericPolicy::from_strict_flag(true), NumericPolicy::Strict);
        assert_eq!(NumericPolicy::from_strict_flag(false), NumericPolicy::Legacy);
    }

    // ── statistics ────────────────────────────────────────────────────────────

    #[test]
    fn test_mean_of_valid_grades() {
        let grades = ["2,0", "3,3"];
        let mean = mean_of_valid(&grades, NumericPolicy::Legacy).unwrap();
        assert!(approx(mean, 2.65));
    }

    #[test]
    fn test_mean_with_no_valid_values_is_zero() {
        let grades = ["bestanden", ""];
        assert_eq!(mean_of_valid(&grades, NumericPolicy::Legacy).unwrap(), 0.0);
        let empty: [&str; 0] = [];
        assert_eq!(mean_of_valid(&empty, NumericPolicy::Legacy).unwrap(), 0.0);
    }

    #[test]
    fn test_sum_of_valid_points() {
        let points = ["5", "2,5"];
        assert!(approx(sum_of_valid(&points, NumericPolicy::Legacy).unwrap(), 7.5));
    }

    #[test]
    fn test_sum_skips_invalid_points() {
        let points = ["5", "n/a", "2.5.1", "10"];
        assert!(approx(sum_of_valid(&points, NumericPolicy::Legacy).unwrap(), 15.0));
    }

    // ── non-ASCII digits ──────────────────────────────────────────────────────

    #[test]
    fn test_decimal_value_across_scripts() {
        assert_eq!(decimal_value('7'), Some(7));
        assert_eq!(decimal_value('\u{0662}'), Some(2));
        assert_eq!(decimal_value('\u{0969}'), Some(3));
        assert_eq!(decimal_value('\u{FF19}'), Some(9));
        assert_eq!(decimal_value('\u{00B2}'), None);
        assert_eq!(decimal_value('a'), None);
    }

    #[test]
    fn test_is_digit_classes() {
        assert!(is_digit('0'));
        assert!(is_digit('\u{0662}'));
        assert!(is_digit('\u{00B2}'));
        assert!(is_digit('\u{2460}'));
        assert!(!is_digit('\u{00BD}'));
        assert!(!is_digit('\u{2163}'));
        assert!(!is_digit('.'));
    }

    #[test]
    fn test_arabic_indic_digits_parse() {
        assert!(NumericPolicy::Legacy.accepts("\u{0662}"));
        assert!(approx(parse_number("\u{0662}").unwrap(), 2.0));
        assert!(approx(parse_number("\u{0662},\u{0663}").unwrap(), 2.3));
        let grades = ["1,0", "\u{0662}"];
        assert!(approx(mean_of_valid(&grades, NumericPolicy::Legacy).unwrap(), 1.5));
    }

    #[test]
    fn test_vulgar_fraction_is_skipped() {
        assert!(!NumericPolicy::Legacy.accepts("\u{00BD}"));
        let grades = ["\u{00BD}", "1,0"];
        assert!(approx(mean_of_valid(&grades, NumericPolicy::Legacy).unwrap(), 1.0));
    }

    #[test]
    fn test_superscript_digit_fails_conversion() {
        // Superscript two: a digit, but not a decimal one.
        let grades = ["2,0", "\u{00B2}"];
        assert!(NumericPolicy::Legacy.accepts("\u{00B2}"));
        let err = mean_of_valid(&grades, NumericPolicy::Legacy).unwrap_err();
        assert!(matches!(err, LsfError::InvalidNumber(_)));
    }

    #[test]
    fn test_strict_stays_ascii_only() {
        assert!(!NumericPolicy::Strict.accepts("\u{0662}"));
        assert!(!NumericPolicy::Strict.accepts("\u{00B2}"));
    }
}
