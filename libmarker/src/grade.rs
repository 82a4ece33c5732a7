//! The equivalence decision procedure.
//!
//! `grade_answer` decides whether a candidate answer denotes the same
//! mathematical object as a reference answer, short-circuiting at the first
//! definitive branch: stage-A string equality, stage-B string equality,
//! tuple/set structural comparison, and finally a guarded
//! symbolic-difference-is-zero check. Guards reject expressions that are
//! malformed or combinatorially dangerous before any parsing happens; every
//! ambiguous or failing case grades as not equivalent. The caller sees a
//! boolean and nothing else.

use crate::normalize::{normalize_mathd, normalize_symbolic};
use crate::simplify::simplifies_to_zero;
use crate::utils::{float_is_int, numeric_value, strip_properly_formatted_commas};

use lazy_static::lazy_static;
use regex::Regex;

/// Bracket characters recognized as tuple/set/interval delimiters.
const TUPLE_CHARS: &[char] = &['(', ')', '[', ']'];

/// Syntactic shapes that disqualify an expression from symbolic
/// evaluation: braced or parenthesized exponents expand unpredictably.
const BAD_SUBSTRINGS: &[&str] = &["^{", "^("];

lazy_static! {
    // A simple fraction: optionally negative integer over a positive
    // integer, either side with an optional trailing dot.
    static ref SIMPLE_FRACTION: Regex =
        Regex::new(r"^-?[0-9]+\.?/0*[1-9][0-9]*\.?$").unwrap();
    // Chained exponents and multi-digit unbraced exponents blow up under
    // naive expansion; both are rejected outright.
    static ref BAD_EXPONENT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\^[0-9]+\^").unwrap(),
        Regex::new(r"\^[0-9][0-9]+").unwrap(),
    ];
}

/// Grades `given_answer` against `ground_truth`.
///
/// `None` means no answer was extracted and never matches.
pub fn grade_answer(given_answer: Option<&str>, ground_truth: &str) -> bool {
    let given_answer = match given_answer {
        Some(given) => given,
        None => return false,
    };

    // Fast path: both answers already agree after light cleanup.
    if normalize_mathd(ground_truth) == normalize_mathd(given_answer) {
        return true;
    }

    let truth = normalize_symbolic(ground_truth);
    let given = normalize_symbolic(given_answer);
    if given.is_empty() {
        return false;
    }
    if truth == given {
        return true;
    }

    let truth_elems = split_tuple(&truth);
    let given_elems = split_tuple(&given);

    // A multi-element reference must agree with the candidate on the
    // enclosing bracket style: "(1,2)" is not the bare list "1,2".
    if truth_elems.len() > 1
        && (truth.chars().next() != given.chars().next()
            || truth.chars().last() != given.chars().last())
    {
        return false;
    }
    if truth_elems.len() != given_elems.len() {
        return false;
    }

    truth_elems
        .iter()
        .zip(given_elems.iter())
        .all(|(truth_elem, given_elem)| elements_equal(truth_elem, given_elem))
}

fn elements_equal(truth_elem: &str, given_elem: &str) -> bool {
    if SIMPLE_FRACTION.is_match(truth_elem) && SIMPLE_FRACTION.is_match(given_elem) {
        // Simple fractions compare literally: "2/4" is not "1/2" here.
        return truth_elem == given_elem;
    }
    // When both sides are plain numbers, an integer/non-integer mismatch is
    // conclusive. A non-numeric side (an expression) can still denote an
    // integer, so it falls through to the symbolic check.
    if let (Some(truth_val), Some(given_val)) =
        (numeric_value(truth_elem), numeric_value(given_elem))
    {
        if float_is_int(truth_val) != float_is_int(given_val) {
            return false;
        }
    }
    are_equal_symbolically(truth_elem, given_elem)
}

/// Splits a normalized answer into its tuple elements.
///
/// Commas separate elements only when the whole string is delimited by
/// bracket characters with none inside; otherwise the answer is a single
/// element. Thousands-separator commas are stripped first so "1,234" stays
/// one number.
fn split_tuple(expr: &str) -> Vec<String> {
    let expr = strip_properly_formatted_commas(expr);
    if expr.is_empty() {
        return vec![];
    }

    let chars: Vec<char> = expr.chars().collect();
    let is_tuple_char = |c: &char| TUPLE_CHARS.contains(c);
    if chars.len() > 2
        && is_tuple_char(&chars[0])
        && is_tuple_char(&chars[chars.len() - 1])
        && !chars[1..chars.len() - 1].iter().any(is_tuple_char)
    {
        let inner: String = chars[1..chars.len() - 1].iter().collect();
        inner
            .split(',')
            .map(|elem| elem.trim().to_string())
            .collect()
    } else {
        vec![expr]
    }
}

// About how many distinct unknowns the difference expression may involve.
// "sqrt" and "frac" are spelling, not unknowns.
fn count_unknown_letters(expr: &str) -> usize {
    let expr = expr.replace("sqrt", "").replace("frac", "");
    let mut letters: Vec<char> = expr.chars().filter(|c| c.is_alphabetic()).collect();
    letters.sort_unstable();
    letters.dedup();
    letters.len()
}

fn should_allow_eval(expr: &str) -> bool {
    if count_unknown_letters(expr) > 2 {
        return false;
    }
    if BAD_SUBSTRINGS.iter().any(|bad| expr.contains(bad)) {
        return false;
    }
    if BAD_EXPONENT_PATTERNS.iter().any(|bad| bad.is_match(expr)) {
        return false;
    }
    true
}

fn are_equal_symbolically(ground_truth: &str, given: &str) -> bool {
    let diff = format!("({})-({})", ground_truth, given);
    if !should_allow_eval(&diff) {
        return false;
    }
    simplifies_to_zero(&diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! grade_tests {
        ($($name:ident: $given:expr, $truth:expr, $verdict:expr)*) => {
        $(
            #[test]
            fn $name() {
                use crate::grade::grade_answer;

                assert_eq!(grade_answer(Some($given), $truth), $verdict);
            }
        )*
        }
    }

    mod equivalent {
        grade_tests! {
            identical: "5", "5", true
            reflexive_latex: "\\frac{1}{2}", "\\frac{1}{2}", true
            mathd_fast_path: "\\tfrac{1}{2}", "\\frac{1}{2}", true
            half_decimal: "0.5", "1/2", true
            unit_stripping: "5 degrees", "5", true
            dollar_sign: "\\$10", "10", true
            thousands_separator: "12,345", "12345", true
            simplify_to_zero: "\\frac{1}{2}+\\frac{1}{2}", "1", true
            symbolic_with_unknown: "2x+2", "2(x+1)", true
            sqrt_forms: "\\sqrt2", "\\sqrt{2}", true
            tuple_elementwise: "(1/2, 2)", "(0.5, 2)", true
            scale_word: "2 million", "2*10^6", true
            mixed_number: "1 1/2", "3/2", true
        }
    }

    mod not_equivalent {
        grade_tests! {
            plain_difference: "4", "5", false
            fraction_literalism: "2/4", "1/2", false
            bracket_mismatch: "1,2", "(1,2)", false
            element_count_mismatch: "(1,2,3)", "(1,2)", false
            element_order_significant: "(2,1)", "(1,2)", false
            integer_ness_mismatch: "7.5", "7", false
            empty_candidate: "", "5", false
            sqrt_vs_decimal: "1.414", "\\sqrt{2}", false
            chained_exponent: "2^3^2", "512", false
            multi_digit_exponent: "2^10", "1024", false
        }
    }

    #[test]
    fn missing_answer_never_matches() {
        assert!(!grade_answer(None, "42"));
    }

    #[test]
    fn too_many_unknowns_grades_false_even_when_equal() {
        // Conservative guard: a+b+c equals itself, but three unknowns never
        // reach the symbolic backend.
        assert!(!grade_answer(Some("a+b+c"), "c+b+a"));
    }

    #[test]
    fn splits_tuples_on_commas() {
        assert_eq!(split_tuple("(1,2)"), vec!["1", "2"]);
        assert_eq!(split_tuple("[1,2]"), vec!["1", "2"]);
        assert_eq!(split_tuple("1,2"), vec!["1,2"]);
        assert_eq!(split_tuple("(1,234)"), vec!["1234"]);
        assert_eq!(split_tuple("((1,2))"), vec!["((1,2))"]);
        assert!(split_tuple("").is_empty());
    }

    #[test]
    fn guards_reject_dangerous_shapes() {
        assert!(!should_allow_eval("x+y+z"));
        assert!(!should_allow_eval("2^{3}"));
        assert!(!should_allow_eval("2^(3)"));
        assert!(!should_allow_eval("2^3^2"));
        assert!(!should_allow_eval("2^31"));
        assert!(should_allow_eval("x+y"));
        assert!(should_allow_eval("2^3"));
        assert!(should_allow_eval("sqrt(2)+frac"));
    }
}
