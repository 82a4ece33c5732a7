//! Numeric-string primitives shared by the normalizers and the grader.

use lazy_static::lazy_static;
use regex::Regex;

/// Tolerance under which a float is considered integer-valued.
///
/// This constant is shared by every integer-ness check in the crate; the
/// normalizers and the grader must agree on it or an answer could collapse
/// to an integer in one place and not the other.
pub(crate) const INT_TOLERANCE: f64 = 1e-7;

lazy_static! {
    // A digit, a comma, exactly three digits, then a non-digit or the end.
    static ref FORMATTED_COMMA: Regex = Regex::new(r"(\d)(,)(\d\d\d)($|\D)").unwrap();
}

/// Parses a string as a float, tolerating surrounding whitespace.
pub(crate) fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Whether `x` is integer-valued within [INT_TOLERANCE].
///
/// Non-finite values are never integer-valued.
pub(crate) fn float_is_int(x: f64) -> bool {
    (x - x.round()).abs() <= INT_TOLERANCE
}

/// The numeric value of `s` after thousands-separator stripping, if it is
/// a plain number.
pub(crate) fn numeric_value(s: &str) -> Option<f64> {
    parse_float(&strip_properly_formatted_commas(s))
}

/// Whether `s`, after thousands-separator stripping, parses as an
/// integer-valued float.
pub(crate) fn str_is_int(s: &str) -> bool {
    match numeric_value(s) {
        Some(x) => float_is_int(x),
        None => false,
    }
}

/// Collapses an integer-valued numeric string to its plain integer form,
/// e.g. "12,345.0000001" to "12345". Strings that do not parse are returned
/// unchanged.
pub(crate) fn str_to_int(s: &str) -> String {
    let x = match parse_float(&s.replace(',', "")) {
        Some(x) => x,
        None => return s.to_string(),
    };
    let formatted = format!("{:.0}", x);
    if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    }
}

/// Removes "properly formatted" thousands-separator commas (a
/// digit-comma-three-digits pattern), applied repeatedly to a fixed point so
/// that "1,234,567" fully collapses.
pub(crate) fn strip_properly_formatted_commas(expr: &str) -> String {
    let mut expr = expr.to_string();
    loop {
        let next = FORMATTED_COMMA.replace_all(&expr, "$1$3$4").to_string();
        if next == expr {
            return expr;
        }
        expr = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatted_commas() {
        assert_eq!(strip_properly_formatted_commas("1,234"), "1234");
        assert_eq!(strip_properly_formatted_commas("1,234,567"), "1234567");
        assert_eq!(strip_properly_formatted_commas("(1,234, 5)"), "(1234, 5)");
        // A list separator is not a thousands separator.
        assert_eq!(strip_properly_formatted_commas("1,2"), "1,2");
        assert_eq!(strip_properly_formatted_commas("12,3456"), "12,3456");
    }

    #[test]
    fn integer_valued_strings() {
        assert!(str_is_int("3"));
        assert!(str_is_int("3.0000000001"));
        assert!(str_is_int("12,345"));
        assert!(str_is_int("-7."));
        assert!(!str_is_int("3.5"));
        assert!(!str_is_int("x"));
        assert!(!str_is_int("inf"));
    }

    #[test]
    fn integer_collapse() {
        assert_eq!(str_to_int("12,345"), "12345");
        assert_eq!(str_to_int("3.0000000001"), "3");
        assert_eq!(str_to_int("-7."), "-7");
        assert_eq!(str_to_int("-0.00000001"), "0");
    }
}
