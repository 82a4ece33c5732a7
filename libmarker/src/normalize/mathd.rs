//! Stage-A ("mathd-style") answer canonicalization.
//!
//! A lightweight, ordered pipeline of string rewrites that scrubs the most
//! common LaTeX typography out of a final answer: fraction macro variants,
//! sizing commands, degree and currency markup, a trailing units
//! annotation, and a handful of number-formatting fixes. Two answers whose
//! stage-A forms are string-equal are considered equivalent without any
//! symbolic work.
//!
//! Rule order matters; later rules assume earlier ones already ran (the
//! fraction reformatter, for instance, relies on whitespace having been
//! removed). Each rule is a named function so it can be tested on its own.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A whole answer wrapped in a (doubly-escaped) \\text{...}.
    static ref ESCAPED_TEXT_WRAPPER: Regex = Regex::new(r"^\\\\text\{(.+?)\}$").unwrap();
}

/// Canonicalizes an answer with the stage-A rule pipeline.
pub fn normalize_mathd(answer: &str) -> String {
    let answer = answer.trim();
    let answer = match ESCAPED_TEXT_WRAPPER.captures(answer) {
        Some(caps) => caps[1].trim().to_string(),
        None => answer.to_string(),
    };
    strip_string(&answer)
}

fn strip_string(answer: &str) -> String {
    let mut s = answer.replace('\n', "");
    s = s.replace("\\!", "");
    s = s.replace("\\\\", "\\");
    s = s.replace("tfrac", "frac");
    s = s.replace("dfrac", "frac");
    s = s.replace("\\left", "");
    s = s.replace("\\right", "");
    s = s.replace("^{\\circ}", "");
    s = s.replace("^\\circ", "");
    s = s.replace("\\$", "");
    s = remove_right_units(&s);
    s = s.replace("\\%", "");
    // A decimal point with no leading digit gets one.
    s = s.replace(" .", " 0.");
    s = s.replace("{.", "{0.");
    if s.is_empty() {
        return s;
    }
    if s.starts_with('.') {
        s = format!("0{}", s);
    }
    s = keep_assignment_rhs(&s);
    s = fix_sqrt(&s);
    s = s.replace(' ', "");
    s = fix_fracs(&s);
    if s == "0.5" {
        s = "\\frac{1}{2}".to_string();
    }
    fix_a_slash_b(&s)
}

// "x=5" means the answer is 5; only fires on a single '=' with a short
// left-hand side, so equations-as-answers are left alone.
fn keep_assignment_rhs(s: &str) -> String {
    let parts: Vec<&str> = s.split('=').collect();
    if parts.len() == 2 && parts[0].chars().count() <= 2 {
        parts[1].to_string()
    } else {
        s.to_string()
    }
}

// Removes a trailing units annotation like "5\text{ cm}". Expects exactly
// one annotation; any other shape is left unmodified.
fn remove_right_units(s: &str) -> String {
    if !s.contains("\\text{ ") {
        return s.to_string();
    }
    let splits: Vec<&str> = s.split("\\text{ ").collect();
    if splits.len() == 2 {
        splits[0].to_string()
    } else {
        s.to_string()
    }
}

// Wraps a bare single-character radicand in braces: \sqrt2 -> \sqrt{2}.
fn fix_sqrt(s: &str) -> String {
    if !s.contains("\\sqrt") {
        return s.to_string();
    }
    let mut parts = s.split("\\sqrt");
    let mut out = String::from(parts.next().unwrap_or(""));
    for part in parts {
        out.push_str("\\sqrt");
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c != '{' => {
                out.push('{');
                out.push(c);
                out.push('}');
                out.push_str(chars.as_str());
            }
            Some(c) => {
                out.push(c);
                out.push_str(chars.as_str());
            }
            None => {}
        }
    }
    out
}

// Rewrites every \frac so numerator and denominator are brace-delimited,
// covering the four bracing variants by single-character extraction. A
// malformed occurrence (nothing after \frac to extract) leaves the whole
// string unmodified.
fn fix_fracs(s: &str) -> String {
    let mut parts = s.split("\\frac");
    let mut out = String::from(parts.next().unwrap_or(""));
    for part in parts {
        out.push_str("\\frac");
        let chars: Vec<char> = part.chars().collect();
        if chars.first() == Some(&'{') {
            out.push_str(part);
            continue;
        }
        if chars.len() < 2 {
            return s.to_string();
        }
        let (a, b) = (chars[0], chars[1]);
        let rest: String = chars[2..].iter().collect();
        if b != '{' {
            // \frac12 -> \frac{1}{2}
            out.push('{');
            out.push(a);
            out.push_str("}{");
            out.push(b);
            out.push('}');
            out.push_str(&rest);
        } else {
            // \frac1{2} -> \frac{1}{2}
            out.push('{');
            out.push(a);
            out.push('}');
            out.push(b);
            out.push_str(&rest);
        }
    }
    out
}

// "3/4" -> \frac{3}{4}, only when the whole string is exactly an
// integer-slash-integer.
fn fix_a_slash_b(s: &str) -> String {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 2 {
        return s.to_string();
    }
    match (parts[0].parse::<i64>(), parts[1].parse::<i64>()) {
        (Ok(a), Ok(b)) if s == format!("{}/{}", a, b) => {
            format!("\\frac{{{}}}{{{}}}", a, b)
        }
        _ => s.to_string(),
    }
}
