//! Best-effort flattening of LaTeX markup into plain expression text.
//!
//! Turns the LaTeX that survives earlier normalization rules into something
//! the expression scanner can read: `\frac{1}{2}` becomes `1/2`,
//! `\sqrt{x}` becomes `sqrt(x)`, text-mode wrappers unwrap, spacing macros
//! vanish, and unknown macros degrade to their bare names. The conversion
//! is deliberately partial: on any failure the caller keeps the
//! pre-conversion string, so a wrong answer can never become an error.

use core::fmt;
use std::error::Error;

/// Group nesting deeper than this is rejected rather than recursed into.
const MAX_DEPTH: usize = 32;

/// A failure to flatten LaTeX markup.
#[derive(PartialEq, Clone, Debug)]
pub enum LatexError {
    /// A macro that required an argument hit the end of input instead.
    MissingArgument(String),
    /// A `{...}` group was never closed.
    UnbalancedGroup,
    /// Groups were nested past [MAX_DEPTH].
    TooDeep,
    /// A macro this converter cannot express as an expression.
    Unsupported(String),
}

impl fmt::Display for LatexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LatexError::*;
        match self {
            MissingArgument(name) => write!(f, r#"Macro "\{}" is missing an argument"#, name),
            UnbalancedGroup => write!(f, "Unbalanced group braces"),
            TooDeep => write!(f, "Groups nested too deeply"),
            Unsupported(name) => write!(f, r#"Macro "\{}" has no expression form"#, name),
        }
    }
}

impl Error for LatexError {}

/// Flattens `expr` to plain expression text.
pub(crate) fn latex_to_text(expr: &str) -> Result<String, LatexError> {
    let mut converter = Converter::new(expr);
    converter.convert(0)
}

struct Converter {
    chars: Vec<char>,
    pos: usize,
}

impl Converter {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn collect_while<P: Fn(char) -> bool>(&mut self, pred: P) -> String {
        let mut collected = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            collected.push(c);
            self.pos += 1;
        }
        collected
    }

    fn convert(&mut self, depth: usize) -> Result<String, LatexError> {
        let mut out = String::with_capacity(self.chars.len());
        while let Some(c) = self.peek() {
            match c {
                '\\' => {
                    self.pos += 1;
                    self.convert_macro(depth, &mut out)?;
                }
                '~' => {
                    self.pos += 1;
                    out.push(' ');
                }
                // Unicode the reference tooling rendered; emit the ASCII the
                // scanner understands.
                '·' | '×' => {
                    self.pos += 1;
                    out.push('*');
                }
                'π' => {
                    self.pos += 1;
                    out.push_str("pi");
                }
                '∞' => {
                    self.pos += 1;
                    out.push_str("inf");
                }
                '√' => {
                    self.pos += 1;
                    out.push_str("sqrt");
                }
                '∪' => {
                    self.pos += 1;
                    out.push('u');
                }
                _ => {
                    self.pos += 1;
                    out.push(c);
                }
            }
        }
        Ok(out)
    }

    fn convert_macro(&mut self, depth: usize, out: &mut String) -> Result<(), LatexError> {
        let name = self.collect_while(|c| c.is_ascii_alphabetic());
        if name.is_empty() {
            // A single-character escape like `\%`, `\{`, or the `\\` line
            // break; spacing escapes vanish, the rest keep their character.
            match self.next() {
                Some('!') | Some(',') | Some(';') | Some(' ') | Some('\\') | None => {}
                Some(c) => out.push(c),
            }
            return Ok(());
        }

        match name.as_str() {
            "frac" | "tfrac" | "dfrac" => {
                let numerator = self.argument(depth, &name)?;
                let denominator = self.argument(depth, &name)?;
                out.push_str(&wrap(&numerator));
                out.push('/');
                out.push_str(&wrap(&denominator));
            }
            "sqrt" => {
                let index = self.optional_index(depth)?;
                let radicand = self.argument(depth, &name)?;
                match index {
                    Some(index) => {
                        // \sqrt[n]{x} is x^(1/n).
                        out.push('(');
                        out.push_str(&radicand);
                        out.push_str(")^(1/(");
                        out.push_str(&index);
                        out.push_str("))");
                    }
                    None => {
                        out.push_str("sqrt(");
                        out.push_str(&radicand);
                        out.push(')');
                    }
                }
            }
            "text" | "mbox" | "mathrm" | "mathbf" | "textbf" | "operatorname" => {
                let inner = self.argument(depth, &name)?;
                out.push_str(&inner);
            }
            "left" | "right" => {
                // The delimiter itself flows through the main loop; a null
                // delimiter `.` is dropped with the macro.
                if let Some('.') = self.peek() {
                    self.pos += 1;
                }
            }
            "pi" => out.push_str("pi"),
            "infty" => out.push_str("inf"),
            "cdot" | "times" => out.push('*'),
            "div" => out.push('/'),
            "cup" => out.push('u'),
            "quad" | "qquad" => {}
            "pm" | "mp" => return Err(LatexError::Unsupported(name)),
            // Anything else degrades to its bare name, which either scans
            // as a variable or fails the grader's unknown-letter guard.
            _ => out.push_str(&name),
        }
        Ok(())
    }

    // Reads one macro argument: a braced group, a nested macro, or a single
    // character.
    fn argument(&mut self, depth: usize, macro_name: &str) -> Result<String, LatexError> {
        if depth >= MAX_DEPTH {
            return Err(LatexError::TooDeep);
        }
        while let Some(' ') = self.peek() {
            self.pos += 1;
        }
        match self.peek() {
            None => Err(LatexError::MissingArgument(macro_name.to_string())),
            Some('{') => self.group(depth),
            Some('\\') => {
                self.pos += 1;
                let mut out = String::new();
                self.convert_macro(depth + 1, &mut out)?;
                Ok(out)
            }
            Some(c) => {
                self.pos += 1;
                Ok(c.to_string())
            }
        }
    }

    // Consumes a `{...}` group and converts its contents.
    fn group(&mut self, depth: usize) -> Result<String, LatexError> {
        if depth >= MAX_DEPTH {
            return Err(LatexError::TooDeep);
        }
        self.pos += 1; // eat the opening brace
        let start = self.pos;
        let mut nesting = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '{' => nesting += 1,
                '}' if nesting == 0 => {
                    let inner: String = self.chars[start..self.pos].iter().collect();
                    self.pos += 1; // eat the closing brace
                    return Converter::new(&inner).convert(depth + 1);
                }
                '}' => nesting -= 1,
                // Skip escaped braces so `\{` does not unbalance the scan.
                '\\' => {
                    self.pos += 1;
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(LatexError::UnbalancedGroup)
    }

    // Reads an optional `[...]` index argument, as in `\sqrt[3]{8}`.
    fn optional_index(&mut self, depth: usize) -> Result<Option<String>, LatexError> {
        if self.peek() != Some('[') {
            return Ok(None);
        }
        if depth >= MAX_DEPTH {
            return Err(LatexError::TooDeep);
        }
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == ']' {
                let inner: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Converter::new(&inner).convert(depth + 1).map(Some);
            }
            self.pos += 1;
        }
        Err(LatexError::UnbalancedGroup)
    }
}

// Fraction operands parenthesize unless they are a single atom.
fn wrap(operand: &str) -> String {
    let atomic = !operand.is_empty()
        && operand.chars().all(|c| c.is_alphanumeric() || c == '.');
    if atomic {
        operand.to_string()
    } else {
        format!("({})", operand)
    }
}

#[cfg(test)]
mod tests {
    macro_rules! latex_tests {
        ($($name:ident: $input:expr, $expected:expr)*) => {
        $(
            #[test]
            fn $name() {
                use crate::normalize::latex::latex_to_text;

                assert_eq!(latex_to_text($input).expect("should convert"), $expected);
            }
        )*
        }
    }

    macro_rules! latex_error_tests {
        ($($name:ident: $input:expr)*) => {
        $(
            #[test]
            fn $name() {
                use crate::normalize::latex::latex_to_text;

                assert!(latex_to_text($input).is_err());
            }
        )*
        }
    }

    mod convert {
        latex_tests! {
            plain_text: "12", "12"
            frac: r"\frac{1}{2}", "1/2"
            frac_unbraced: r"\frac12", "1/2"
            frac_compound_numerator: r"\frac{x+1}{2}", "(x+1)/2"
            nested_frac: r"\frac{\frac{1}{2}}{3}", "(1/2)/3"
            tfrac_alias: r"\tfrac{1}{2}", "1/2"
            sqrt: r"\sqrt{2}", "sqrt(2)"
            sqrt_unbraced: r"\sqrt2", "sqrt(2)"
            sqrt_index: r"\sqrt[3]{8}", "(8)^(1/(3))"
            text_unwrap: r"\text{abc}", "abc"
            left_right: r"\left(1,2\right)", "(1,2)"
            right_null_delimiter: r"\left.\frac{1}{2}\right|", "1/2|"
            pi: r"\pi/2", "pi/2"
            infinity: r"(-\infty,3)", "(-inf,3)"
            cdot: r"2\cdot3", "2*3"
            spacing_vanishes: r"1\!2\,3\quad4", "1234"
            unknown_macro_bare_name: r"\gamma", "gamma"
            unicode_times: "2×3", "2*3"
            macro_argument: r"\frac\pi2", "pi/2"
        }
    }

    mod convert_invalid {
        latex_error_tests! {
            missing_frac_argument: r"\frac{1}"
            unclosed_group: r"\frac{1}{2"
            plus_minus: r"1\pm2"
        }
    }
}
