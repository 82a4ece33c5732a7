//! Tokenizes a normalized answer expression.
//!
//! The scanner sees strings after stage-B normalization, so the alphabet is
//! small: numbers, names, the five arithmetic operators, and two bracket
//! pairs. Anything else becomes an [Invalid](types::TokenType::Invalid)
//! token, which the parser rejects; malformed answers grade as not
//! equivalent rather than erroring.

pub mod types;

use std::iter::Peekable;
use std::str::Chars;
use types::*;

/// Scans `input` into tokens, ending with an [Eof](types::TokenType::Eof)
/// token.
pub fn scan(input: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    scanner.scan();
    scanner.output
}

struct Scanner<'a> {
    input: Peekable<Chars<'a>>,
    output: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.chars().peekable(),
            output: Vec::new(),
        }
    }

    fn scan(&mut self) {
        while let Some(&c) = self.input.peek() {
            match c {
                _ if c.is_whitespace() => {
                    self.input.next();
                }
                _ if c.is_ascii_digit() => self.scan_num(),
                // A leading decimal point also starts a number, as in ".5".
                '.' => self.scan_num(),
                _ if c.is_alphabetic() => self.scan_var(),
                _ => self.scan_symbol(),
            }
        }

        self.output.push(Token::new(TokenType::Eof));
    }

    fn scan_symbol(&mut self) {
        use TokenType::*;
        let ty = match self.input.next().unwrap() {
            '+' => Plus,
            '-' => Minus,
            '*' => Mult,
            '/' => Div,
            '^' => Exp,
            '(' => OpenParen,
            ')' => CloseParen,
            '[' => OpenBracket,
            ']' => CloseBracket,
            c => Invalid(c),
        };
        self.output.push(Token::new(ty));
    }

    fn scan_num(&mut self) {
        let mut float_str = self.collect_while(|c| c.is_ascii_digit());
        if let Some('.') = self.input.peek() {
            float_str.push('.');
            self.input.next();
            float_str.push_str(&self.collect_while(|c| c.is_ascii_digit()));
        }
        // A bare "." scans to an unparseable string; surface it as invalid
        // rather than a number.
        let ty = match float_str.parse::<f64>() {
            Ok(f) => TokenType::Float(f),
            Err(_) => TokenType::Invalid('.'),
        };
        self.output.push(Token::new(ty));
    }

    // A name is a letter followed by any alphanumeric run, so "sqrt2" is
    // one name while "2x" is a number and a name.
    fn scan_var(&mut self) {
        let name = self.collect_while(|c| c.is_alphanumeric());
        self.output.push(Token::new(TokenType::Variable(name)));
    }

    fn collect_while<P: Fn(char) -> bool>(&mut self, pred: P) -> String {
        let mut collected = String::new();
        while let Some(&c) = self.input.peek() {
            if !pred(c) {
                break;
            }
            collected.push(c);
            self.input.next();
        }
        collected
    }
}
