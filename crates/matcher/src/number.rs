//! Number formatting and parsing with scripting-language semantics.
//!
//! Rust's float formatting already produces the shortest digit string that
//! round-trips; this module only rearranges those digits into the
//! `Number.prototype.toString` layout (plain decimal between `1e-7` and
//! `1e21`, exponent form with an explicit sign outside that window).

use crate::text::CodeUnits;

/// Exponent window (exclusive upper bound) for plain decimal output
const MAX_PLAIN_EXPONENT: i32 = 21;

/// Exponent window (exclusive lower bound) for plain decimal output
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Format a number the way the scripting model stringifies it.
///
/// ```
/// use unitmatch_matcher::number_to_text;
///
/// assert_eq!(number_to_text(1.0), "1");
/// assert_eq!(number_to_text(1e100), "1e+100");
/// assert_eq!(number_to_text(0.000001), "0.000001");
/// assert_eq!(number_to_text(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn number_to_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{sign}{scientific}");
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or_default();

    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit
    let n = exponent + 1;

    let body = if k <= n && n <= MAX_PLAIN_EXPONENT {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= MAX_PLAIN_EXPONENT {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if MIN_PLAIN_EXPONENT < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{e_sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{e_sign}{}", e.abs())
        }
    };

    format!("{sign}{body}")
}

/// Parse text with the string-to-number grammar.
///
/// Surrounding whitespace is ignored, empty text is `0`, `Infinity` may carry
/// a sign, `0x`/`0o`/`0b` prefixes select a radix, and anything else that is
/// not a decimal literal yields `NaN`.
#[must_use]
pub fn text_to_number(text: &CodeUnits) -> f64 {
    let decoded = text.to_string_lossy();
    let trimmed = decoded.trim_matches(is_str_whitespace);

    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(radix_value) = parse_radix_literal(trimmed) {
        return radix_value;
    }

    if is_decimal_literal(trimmed) {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Whitespace and line terminators skipped around a numeric string.
///
/// Unlike [`char::is_whitespace`], U+0085 is excluded and U+FEFF included.
fn is_str_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{000A}'
            | '\u{000D}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Truncate toward zero, mapping `NaN` to `0` and keeping infinities
#[must_use]
pub fn to_integer_or_infinity(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    if value.is_infinite() {
        return value;
    }
    // `+ 0.0` folds -0 into 0
    value.trunc() + 0.0
}

/// Clamp an integral position into `[0, len]`
#[must_use]
pub fn clamp_position(position: f64, len: usize) -> usize {
    if position <= 0.0 {
        0
    } else if position >= len as f64 {
        len
    } else {
        position as usize
    }
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let mut value = 0.0_f64;
    for c in text[2..].chars() {
        let Some(digit) = c.to_digit(radix) else {
            return Some(f64::NAN);
        };
        value = value * f64::from(radix) + f64::from(digit);
    }
    Some(value)
}

fn is_decimal_literal(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    if matches!(chars.peek(), Some('+' | '-')) {
        chars.next();
    }

    let mut int_digits = 0;
    while chars.peek().is_some_and(char::is_ascii_digit) {
        chars.next();
        int_digits += 1;
    }

    let mut frac_digits = 0;
    if chars.peek() == Some(&'.') {
        chars.next();
        while chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
            frac_digits += 1;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(chars.peek(), Some('e' | 'E')) {
        chars.next();
        if matches!(chars.peek(), Some('+' | '-')) {
            chars.next();
        }
        let mut exp_digits = 0;
        while chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
            exp_digits += 1;
        }
        if exp_digits == 0 {
            return false;
        }
    }

    chars.next().is_none()
}
