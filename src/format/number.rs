//! Parsing and formatting of grouped decimal numbers.
//!
//! German input is ambiguous when only one kind of separator appears, so the
//! parser applies these rules:
//! - both `.` and `,` present: `.` groups thousands, `,` is the decimal mark
//! - only `,`: decimal mark when it appears once with at most 3 trailing chars
//! - only `.`: the last fragment is the fraction when it is 1-3 chars long,
//!   otherwise every dot is a thousands separator

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::NumberLocale;
use crate::error::ParseError;

/// Largest number of fractional digits a `Decimal` can carry.
pub const MAX_DECIMALS: u32 = 28;

/// Parse user-entered text in the given locale.
///
/// Empty or whitespace-only text is `0`. Scientific notation, currency
/// symbols and any other characters are rejected.
pub fn parse_number(text: &str, locale: NumberLocale) -> Result<Decimal, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let cleaned = match locale {
        NumberLocale::German => normalize_german(trimmed),
        NumberLocale::Us => trimmed.replace(',', ""),
    };

    let error = || ParseError {
        input: text.to_string(),
        locale,
    };

    let canonical = canonical_decimal(&cleaned).ok_or_else(error)?;
    Decimal::from_str(&canonical).map_err(|_| error())
}

/// Rewrite German-formatted text to use `.` as the only decimal mark.
fn normalize_german(s: &str) -> String {
    let has_dot = s.contains('.');
    let has_comma = s.contains(',');

    if has_dot && has_comma {
        return s.replace('.', "").replace(',', ".");
    }

    if has_comma {
        return match s.split_once(',') {
            Some((_, fraction)) if !fraction.contains(',') && fraction.chars().count() <= 3 => {
                s.replace(',', ".")
            }
            // Ambiguous, left untouched so that validation rejects it
            _ => s.to_string(),
        };
    }

    if let Some((head, tail)) = s.rsplit_once('.') {
        let tail_len = tail.chars().count();
        if (1..=3).contains(&tail_len) {
            return format!("{}.{}", head.replace('.', ""), tail);
        }
        return s.replace('.', "");
    }

    s.to_string()
}

/// Accept `[+-]digits[.digits]` and return it in the form `Decimal` parses.
fn canonical_decimal(s: &str) -> Option<String> {
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }

    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    let mut out = String::with_capacity(unsigned.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    Some(out)
}

/// Format `value` with grouped thousands and exactly `decimals` fraction digits.
///
/// Rounds half away from zero. A value that rounds to zero never carries a
/// minus sign.
pub fn format_number(value: Decimal, decimals: u32, locale: NumberLocale) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, locale.thousands_separator()));
    if !frac_part.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(frac_part);
    }
    out
}

/// Monetary amounts are always shown with two decimals.
pub fn format_money(value: Decimal, locale: NumberLocale) -> String {
    format_number(value, 2, locale)
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn de(s: &str) -> Decimal {
        parse_number(s, NumberLocale::German).unwrap()
    }

    fn us(s: &str) -> Decimal {
        parse_number(s, NumberLocale::Us).unwrap()
    }

    #[test]
    fn test_parse_german_both_separators() {
        assert_eq!(de("115.327,2"), dec!(115327.2));
        assert_eq!(de("1.234.567,89"), dec!(1234567.89));
        assert_eq!(de("-1.234,50"), dec!(-1234.50));
    }

    #[test]
    fn test_parse_german_comma_only() {
        assert_eq!(de("0,51"), dec!(0.51));
        assert_eq!(de("50000,123"), dec!(50000.123));

        // More than three digits after the comma is ambiguous
        assert!(parse_number("12,3456", NumberLocale::German).is_err());
        assert!(parse_number("1,234,567", NumberLocale::German).is_err());
    }

    #[test]
    fn test_parse_german_dot_only() {
        // Short final fragment reads as a fraction
        assert_eq!(de("0.5"), dec!(0.5));
        assert_eq!(de("1.234"), dec!(1.234));
        assert_eq!(de("1.234.567"), dec!(1234.567));

        // Long final fragment: all dots are grouping
        assert_eq!(de("1.2345"), dec!(12345));
        assert_eq!(de("12."), dec!(12));
    }

    #[test]
    fn test_parse_us() {
        assert_eq!(us("115,327.2"), dec!(115327.2));
        assert_eq!(us("1,234,567"), dec!(1234567));
        assert_eq!(us("0.014"), dec!(0.014));
        assert_eq!(us("+.5"), dec!(0.5));
    }

    #[test]
    fn test_parse_plain_integers() {
        assert_eq!(de("50000"), dec!(50000));
        assert_eq!(us("50000"), dec!(50000));
        assert_eq!(us("-7"), dec!(-7));
    }

    #[test]
    fn test_parse_empty_is_zero() {
        assert_eq!(de(""), Decimal::ZERO);
        assert_eq!(us("   "), Decimal::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["abc", "12€", "1e5", "-", ".", "1.2.3", "--1", "inf"] {
            let err = parse_number(input, NumberLocale::Us).unwrap_err();
            assert_eq!(err.input, input);
            assert_eq!(err.locale, NumberLocale::Us);
        }
        assert!(parse_number("1,5,", NumberLocale::German).is_err());
    }

    #[test]
    fn test_format_german() {
        assert_eq!(format_number(dec!(1234567.891), 2, NumberLocale::German), "1.234.567,89");
        assert_eq!(format_number(dec!(49750), 6, NumberLocale::German), "49.750,000000");
        assert_eq!(format_number(dec!(-1234.5), 2, NumberLocale::German), "-1.234,50");
        assert_eq!(format_number(dec!(999), 2, NumberLocale::German), "999,00");
    }

    #[test]
    fn test_format_us() {
        assert_eq!(format_number(dec!(1234567.891), 2, NumberLocale::Us), "1,234,567.89");
        assert_eq!(format_number(dec!(0.357142), 3, NumberLocale::Us), "0.357");
        assert_eq!(format_number(dec!(1234.5), 0, NumberLocale::Us), "1,235");
    }

    #[test]
    fn test_format_rounding_and_sign() {
        assert_eq!(format_number(dec!(0.005), 2, NumberLocale::Us), "0.01");
        assert_eq!(format_number(dec!(-0.005), 2, NumberLocale::Us), "-0.01");
        assert_eq!(format_number(dec!(-0.001), 2, NumberLocale::Us), "0.00");
        assert_eq!(format_money(dec!(-10), NumberLocale::German), "-10,00");
    }

    #[test]
    fn test_round_trip_two_decimals() {
        let samples = [
            dec!(0),
            dec!(0.5),
            dec!(7.25),
            dec!(999.99),
            dec!(1000),
            dec!(1785.71),
            dec!(50000),
            dec!(115327.2),
            dec!(1234567.89),
            dec!(-0.42),
            dec!(-98765.43),
        ];
        for locale in [NumberLocale::German, NumberLocale::Us] {
            for value in samples {
                let text = format_number(value, 2, locale);
                assert_eq!(parse_number(&text, locale).unwrap(), value, "{locale}: {text}");
            }
        }
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let tolerance = dec!(0.001);
        for value in [dec!(0.35714285), dec!(49750.123456), dec!(1785.7142857)] {
            for locale in [NumberLocale::German, NumberLocale::Us] {
                let text = format_number(value, 3, locale);
                let back = parse_number(&text, locale).unwrap();
                assert!((back - value).abs() < tolerance, "{locale}: {text}");
            }
        }
    }
}
