//! Stage-B ("symbolic-style") answer canonicalization.
//!
//! The aggressive pass run before structural and symbolic comparison. Where
//! stage A preserves LaTeX shape, this stage destroys it: units and
//! currency markup are stripped, scale words become powers of ten,
//! disjunctions become tuple-like lists, remaining LaTeX is flattened to
//! plain expression text, and the result is lowercased with all whitespace
//! and braces removed. Integer-valued floats collapse to their plain
//! integer form under the shared [INT_TOLERANCE](crate::utils::INT_TOLERANCE).
//!
//! The vocabularies here are immutable configuration, not runtime state.

use crate::normalize::latex::latex_to_text;
use crate::utils::{float_is_int, parse_float, str_is_int, str_to_int};

use lazy_static::lazy_static;
use regex::Regex;

/// Scale words and their power-of-ten expansions.
const SCALE_WORDS: &[(&str, &str)] = &[
    ("million", "*10^6"),
    ("billion", "*10^9"),
    ("trillion", "*10^12"),
];

/// Unit words stripped wherever they appear, including plural and
/// exponentiated forms ("cm^2", "degrees").
const UNIT_WORDS: &[&str] = &[
    "degree",
    "cm",
    "centimeter",
    "meter",
    "mile",
    "second",
    "minute",
    "hour",
    "day",
    "week",
    "month",
    "year",
    "foot",
    "feet",
    "inch",
    "yard",
];

lazy_static! {
    // A whole answer wrapped in \text{...}.
    static ref TEXT_WRAPPER: Regex = Regex::new(r"^\\text\{(.+?)\}$").unwrap();
    static ref UNITS: Regex = {
        let words = UNIT_WORDS.join("|");
        Regex::new(&format!(r"(?:{})(?:es)?s? *(?:\^[0-9]+)?", words)).unwrap()
    };
    // A degree marker that survived earlier rules, at either backslash depth.
    static ref DEGREE_REMNANT: Regex = Regex::new(r"\^ *\\{1,2}circ").unwrap();
    // A LaTeX thin space after a thousands comma, like "1,\! 000".
    static ref THIN_SPACE_COMMA: Regex = Regex::new(r",\\! *").unwrap();
    static ref MINUS_SPACE: Regex = Regex::new(r"- *").unwrap();
    // Two whitespace-separated digits read as a mixed number: "1 1/2" is
    // 1 + 1/2. Single digits only; "12 3/4" is out of scope.
    static ref MIXED_NUMBER: Regex = Regex::new(r"([0-9]) +([0-9])").unwrap();
}

/// Canonicalizes an answer with the stage-B rule pipeline.
pub fn normalize_symbolic(expr: &str) -> String {
    let mut expr = match TEXT_WRAPPER.captures(expr) {
        Some(caps) => caps[1].to_string(),
        None => expr.to_string(),
    };

    expr = expr.replace("\\%", "%");
    expr = expr.replace("\\$", "$");
    expr = expr.replace('$', "");
    expr = expr.replace('%', "");

    // Disjunctions and conjunctions compare like tuples.
    expr = expr.replace(" or ", " , ");
    expr = expr.replace(" and ", " , ");

    for (word, expansion) in SCALE_WORDS {
        expr = expr.replace(word, expansion);
    }
    expr = UNITS.replace_all(&expr, "").to_string();
    expr = DEGREE_REMNANT.replace_all(&expr, "").to_string();

    if expr.len() >= 2 && expr.starts_with('{') && expr.ends_with('}') {
        expr = expr[1..expr.len() - 1].to_string();
    }
    expr = THIN_SPACE_COMMA.replace_all(&expr, "").to_string();

    if parse_float(&expr).map(float_is_int).unwrap_or(false) {
        expr = str_to_int(&expr);
    }

    if expr.contains('\\') {
        // Best effort; on failure the string continues unflattened.
        if let Ok(flattened) = latex_to_text(&expr) {
            expr = flattened;
        }
    }

    expr = MINUS_SPACE.replace_all(&expr, "-").to_string();
    expr = MIXED_NUMBER.replace_all(&expr, "$1+$2").to_string();

    expr = expr.replace(' ', "");
    expr = expr.replace('{', "");
    expr = expr.replace('}', "");
    expr = expr.to_lowercase();

    // Re-collapse integers now that thousands separators are bare commas.
    if str_is_int(&expr) {
        expr = str_to_int(&expr);
    }
    expr
}

#[cfg(test)]
mod tests {
    macro_rules! symbolic_tests {
        ($($name:ident: $input:expr, $expected:expr)*) => {
        $(
            #[test]
            fn $name() {
                use crate::normalize::normalize_symbolic;

                assert_eq!(normalize_symbolic($input), $expected);
            }
        )*
        }
    }

    mod normalize {
        symbolic_tests! {
            plain: "5", "5"
            empty: "", ""
            text_wrapper: "\\text{5 miles}", "5"
            dollars: "\\$5", "5"
            percent: "80\\%", "80"
            bare_percent: "80%", "80"
            disjunction: "1 or 2", "1,2"
            conjunction: "1 and 2", "1,2"
            million: "2 million", "2*10^6"
            trillion: "2 trillion", "2*10^12"
            unit_word: "5 degrees", "5"
            unit_abbreviation: "3 cm", "3"
            unit_exponent: "9 cm^2", "9"
            degree_remnant: "45^\\circ", "45"
            brace_wrapper: "{x}", "x"
            thin_space_comma: "1,\\! 000", "1000"
            integer_valued_float: "5.0000000001", "5"
            non_integer_float: "5.5", "5.5"
            latex_fraction: "\\frac{1}{2}", "1/2"
            latex_sqrt: "\\sqrt{2}", "sqrt(2)"
            minus_space: "- 5", "-5"
            mixed_number: "1 1/2", "1+1/2"
            removes_braces: "\\frac{x+1}{2}", "(x+1)/2"
            lowercases: "X+Y", "x+y"
            thousands_separator: "12,345", "12345"
            trailing_spaces: " 7 ", "7"
        }
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "5 degrees",
            "2 million",
            "\\frac{1}{2}",
            "1 or 2",
            "12,345",
            "1 1/2",
            "\\sqrt{2}",
            "80\\%",
            "(1,2)",
            "x+y",
        ];
        for input in &inputs {
            let once = crate::normalize::normalize_symbolic(input);
            let twice = crate::normalize::normalize_symbolic(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }
}
