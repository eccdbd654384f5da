use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// How whitespace inside a recognized number is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// Prices and totals. "149 50" is 149.50.
    Amount,
    /// Counts and measures. "1 250" is 1250.
    Quantity,
}

/// A recognized number in exact decimal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNumber {
    pub value: Decimal,
    /// Digits found after the decimal separator. Zero when there was none.
    pub fraction_digits: usize,
}

impl ParsedNumber {
    /// Nearest `f64` to the exact decimal value.
    pub fn to_f64(&self) -> Option<f64> {
        f64::from_str(&self.value.to_string()).ok()
    }
}

const CURRENCY_SYMBOLS: &[char] = &[
    '€', '$', '£', '¥', '₹', '₽', '¢', '₩', '₪', '₴', '₦', '₲', '₵', '₡', '₤', '₱', '₿', '%',
];

static UNIT_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(EUR|USD|GBP|CHF|JPY|CNY|STK|ST|PCS|KG)\b").expect("valid unit regex")
});

/// Convert OCR text to a float, repairing character confusions and
/// working out which of `,` and `.` is the decimal separator.
///
/// Returns `None` when no number can be recovered. `None` means
/// "not extractable" and is distinct from a legitimate zero.
pub fn normalize_number(text: &str, style: NumberStyle) -> Option<f64> {
    canonicalize(text, style)?.to_f64()
}

/// Like [`normalize_number`] for fields printed with exactly `digits`
/// decimal places.
///
/// When the recognizer dropped the separator entirely ("1250" for "12,50"),
/// the value is shifted back by `10^digits`.
pub fn normalize_fixed_decimal(text: &str, digits: u32) -> Option<f64> {
    let canonical = canonicalize(text, NumberStyle::Amount)?;
    if canonical.fraction_digits > 0 || digits == 0 {
        return canonical.to_f64();
    }

    // Exact shift where the literal fits a Decimal, float division otherwise.
    let exact = canonical.to_decimal().and_then(|value| {
        let divisor = Decimal::from(10_u64.checked_pow(digits)?);
        let shifted = ParsedNumber {
            value: value.checked_div(divisor)?,
            fraction_digits: digits as usize,
        };
        shifted.to_f64()
    });
    exact.or_else(|| Some(canonical.to_f64()? / 10_f64.powi(i32::try_from(digits).ok()?)))
}

/// Parse OCR text into an exact decimal.
///
/// `None` also when the number has more digits than a [`Decimal`] holds;
/// [`normalize_number`] still reads those as floats.
pub fn parse_number(text: &str, style: NumberStyle) -> Option<ParsedNumber> {
    let canonical = canonicalize(text, style)?;
    Some(ParsedNumber {
        value: canonical.to_decimal()?,
        fraction_digits: canonical.fraction_digits,
    })
}

/// Signed number literal with `.` as the only separator.
struct CanonicalNumber {
    literal: String,
    fraction_digits: usize,
}

impl CanonicalNumber {
    fn to_f64(&self) -> Option<f64> {
        f64::from_str(&self.literal).ok()
    }

    fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(&self.literal).ok()
    }
}

/// Steps, in order:
/// 1. Remove currency symbols and unit or currency-code tokens
/// 2. Collapse whitespace (a lone interior gap is a decimal point for amounts)
/// 3. Replace digit look-alike letters that touch a digit or separator
/// 4. Keep digits, separators and a leading minus
/// 5. Resolve separators by count and position
fn canonicalize(text: &str, style: NumberStyle) -> Option<CanonicalNumber> {
    let stripped: String = text.chars().filter(|c| !CURRENCY_SYMBOLS.contains(c)).collect();
    let stripped = UNIT_TOKENS.replace_all(&stripped, " ");

    let collapsed = collapse_whitespace(&stripped, style);
    let substituted = substitute_confusables(&collapsed);

    let filtered: String = substituted
        .chars()
        .filter(|&c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    let negative = filtered.starts_with('-');
    let unsigned = filtered.trim_start_matches('-');
    if unsigned.contains('-') {
        return None;
    }

    let resolved = resolve_separators(unsigned);
    let (integral, fraction) = match resolved.split_once('.') {
        Some((i, f)) => (i, f),
        None => (resolved.as_str(), ""),
    };
    if integral.is_empty() && fraction.is_empty() {
        return None;
    }

    let integral = if integral.is_empty() { "0" } else { integral };
    let sign = if negative { "-" } else { "" };
    let literal = if fraction.is_empty() {
        format!("{sign}{integral}")
    } else {
        format!("{sign}{integral}.{fraction}")
    };

    Some(CanonicalNumber {
        literal,
        fraction_digits: fraction.len(),
    })
}

fn collapse_whitespace(text: &str, style: NumberStyle) -> String {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let has_separator = text.contains(['.', ',']);
    if style == NumberStyle::Amount && parts.len() == 2 && !has_separator {
        parts.join(".")
    } else {
        parts.concat()
    }
}

/// Digit a letter is commonly misread for.
fn confusable_digit(c: char) -> Option<char> {
    match c {
        'O' | 'o' => Some('0'),
        'l' | 'I' | '|' => Some('1'),
        'Z' | 'z' => Some('2'),
        'S' | 's' => Some('5'),
        'B' => Some('8'),
        'g' | 'q' => Some('9'),
        _ => None,
    }
}

fn is_numeric_context(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ','
}

/// Replace look-alike letters with digits, but only where a neighbouring
/// character is a digit or separator. Letters inside words stay untouched.
pub fn substitute_confusables(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let Some(digit) = confusable_digit(c) else {
                return c;
            };
            let prev = i > 0 && is_numeric_context(chars[i - 1]);
            let next = chars.get(i + 1).is_some_and(|&n| is_numeric_context(n));
            if prev || next {
                digit
            } else {
                c
            }
        })
        .collect()
}

/// Rewrite a string of digits, commas and periods so that `.` is the only
/// separator left and marks the decimal point, if any.
fn resolve_separators(s: &str) -> String {
    let commas = s.matches(',').count();
    let periods = s.matches('.').count();

    match (commas, periods) {
        (0, 0) | (0, 1) => s.to_string(),
        (1, 0) => s.replace(',', "."),
        (_, 0) => s.replace(',', ""),
        (0, _) => s.replace('.', ""),
        _ => {
            let last_comma = s.rfind(',');
            let last_period = s.rfind('.');
            if last_comma > last_period {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn amount(s: &str) -> Option<f64> {
        normalize_number(s, NumberStyle::Amount)
    }

    fn assert_value(actual: Option<f64>, expected: f64) {
        let v = actual.unwrap_or_else(|| panic!("expected {expected}, got None"));
        assert!((v - expected).abs() < 1e-9, "expected {expected}, got {v}");
    }

    #[test]
    fn test_separator_table() {
        assert_value(amount("18,90"), 18.90);
        assert_value(amount("1.234,56"), 1234.56);
        assert_value(amount("1,234.56"), 1234.56);
        assert_value(amount("1.234.567"), 1234567.0);
        assert_value(amount("1,234,567"), 1234567.0);
        assert_value(amount("18.90"), 18.90);
        assert_value(amount("1890"), 1890.0);
        assert_eq!(amount(""), None);
    }

    #[test]
    fn test_exact_decimal_value() {
        let parsed = parse_number("1.234,56", NumberStyle::Amount).unwrap();
        assert_eq!(parsed.value, dec!(1234.56));
        assert_eq!(parsed.fraction_digits, 2);
    }

    #[test]
    fn test_currency_removed() {
        assert_value(amount("€ 18,90"), 18.90);
        assert_value(amount("18,90 EUR"), 18.90);
        assert_value(amount("$1,234.56"), 1234.56);
        assert_value(amount("12 Stk"), 12.0);
    }

    #[test]
    fn test_space_as_decimal_for_amounts() {
        assert_value(amount("149 50"), 149.50);
        assert_value(amount("-12 50"), -12.50);
    }

    #[test]
    fn test_space_as_thousands_for_quantities() {
        assert_value(normalize_number("1 250", NumberStyle::Quantity), 1250.0);
        assert_value(normalize_number("1 250,5", NumberStyle::Quantity), 1250.5);
    }

    #[test]
    fn test_spaces_with_existing_separator_collapse() {
        assert_value(amount("1 234,56"), 1234.56);
        assert_value(amount("1 234 567"), 1234567.0);
    }

    #[test]
    fn test_confusables_near_digits() {
        assert_eq!(substitute_confusables("1O5"), "105");
        assert_eq!(substitute_confusables("l2,5O"), "12,50");
        assert_eq!(substitute_confusables("B.S"), "8.5");
        assert_value(amount("1O5"), 105.0);
        assert_value(amount("2l,9O"), 21.90);
    }

    #[test]
    fn test_confusables_in_words_untouched() {
        assert_eq!(substitute_confusables("BOLTS 12"), "BOLTS 12");
        assert_eq!(substitute_confusables("Schloss"), "Schloss");
    }

    #[test]
    fn test_negative() {
        assert_value(amount("-18,90"), -18.90);
        assert_value(amount("- 1.234,56"), -1234.56);
    }

    #[test]
    fn test_malformed_is_absent() {
        assert_eq!(amount("   "), None);
        assert_eq!(amount("abc"), None);
        assert_eq!(amount("-"), None);
        assert_eq!(amount(",."), None);
        assert_eq!(amount("12-5"), None);
    }

    #[test]
    fn test_idempotent_on_canonical_form() {
        for v in [0.0, 18.9, 1234.56, 1234567.0, 0.05, 42.0, 99999.99] {
            let once = amount(&v.to_string()).unwrap();
            let twice = amount(&once.to_string()).unwrap();
            assert_eq!(once, v);
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_numbers_beyond_decimal_precision() {
        let long = "123456789012345678901234567890";
        assert_eq!(amount(long), long.parse::<f64>().ok());
        assert_eq!(parse_number(long, NumberStyle::Amount), None);

        let tiny = 1e-30_f64;
        let read = amount(&tiny.to_string()).unwrap();
        assert_ne!(read, 0.0);
        assert_eq!(read, tiny);

        for v in [1e30_f64, 1e-30, 1.2345678901234568e29] {
            let once = amount(&v.to_string()).unwrap();
            assert_eq!(once, v);
            assert_eq!(amount(&once.to_string()).unwrap(), once);
        }
    }

    #[test]
    fn test_fixed_decimal_beyond_decimal_precision() {
        let long = "123456789012345678901234567890";
        let expected = long.parse::<f64>().unwrap() / 100.0;
        assert_eq!(normalize_fixed_decimal(long, 2), Some(expected));
    }

    #[test]
    fn test_fixed_decimal_shift() {
        assert_value(normalize_fixed_decimal("1250", 2), 12.50);
        assert_value(normalize_fixed_decimal("12,50", 2), 12.50);
        assert_value(normalize_fixed_decimal("12,5", 2), 12.5);
        assert_value(normalize_fixed_decimal("7", 0), 7.0);
        assert_eq!(normalize_fixed_decimal("", 2), None);
    }

    #[test]
    fn test_fraction_digits_reported() {
        let parsed = parse_number("1250", NumberStyle::Amount).unwrap();
        assert_eq!(parsed.fraction_digits, 0);
        let parsed = parse_number("0,125", NumberStyle::Amount).unwrap();
        assert_eq!(parsed.fraction_digits, 3);
    }
}
