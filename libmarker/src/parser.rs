//! Parses token streams into answer expressions.
//!
//! Precedence follows convention: `+ -` bind loosest, then `* /` (explicit
//! or implicit by adjacency, as in `2x` or `2(1+1)`), then sign prefixes,
//! then a right-associative `^` that binds tighter than unary minus, so
//! `-2^2` parses as `-(2^2)`.

pub mod errors;
pub use errors::ParseError;

use crate::grammar::*;
use crate::scanner::types::{Token, TokenType};

use std::iter::Peekable;
use std::rc::Rc;
use std::vec::IntoIter;

/// Parses `input` into an expression, failing on the first malformed or
/// dangling token.
pub fn parse(input: Vec<Token>) -> Result<Rc<Expr>, ParseError> {
    let mut parser = Parser::new(input);
    let parsed = parser.expr()?;
    let tok = parser.next_tok();
    match tok.ty {
        TokenType::Eof => Ok(parsed),
        TokenType::Invalid(c) => Err(ParseError::InvalidToken(c)),
        _ => Err(ParseError::UnexpectedToken(tok)),
    }
}

struct Parser {
    input: Peekable<IntoIter<Token>>,
}

impl Parser {
    fn new(input: Vec<Token>) -> Self {
        Self {
            input: input.into_iter().peekable(),
        }
    }

    fn peek_ty(&mut self) -> TokenType {
        self.input
            .peek()
            .map(|tok| tok.ty.clone())
            .unwrap_or(TokenType::Eof)
    }

    fn next_tok(&mut self) -> Token {
        self.input.next().unwrap_or_else(|| Token::new(TokenType::Eof))
    }

    fn expr(&mut self) -> Result<Rc<Expr>, ParseError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_ty() {
                TokenType::Plus => BinaryOperator::Plus,
                TokenType::Minus => BinaryOperator::Minus,
                _ => break,
            };
            self.next_tok();
            let rhs = self.term()?;
            lhs = Rc::new(Expr::BinaryExpr(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Rc<Expr>, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_ty() {
                TokenType::Mult => {
                    self.next_tok();
                    BinaryOperator::Mult
                }
                TokenType::Div => {
                    self.next_tok();
                    BinaryOperator::Div
                }
                // An operand directly follows another operand: implicit
                // multiplication, same precedence as the explicit form.
                TokenType::Float(_)
                | TokenType::Variable(_)
                | TokenType::OpenParen
                | TokenType::OpenBracket => BinaryOperator::Mult,
                _ => break,
            };
            let rhs = self.unary()?;
            lhs = Rc::new(Expr::BinaryExpr(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Rc<Expr>, ParseError> {
        let op = match self.peek_ty() {
            TokenType::Plus => UnaryOperator::SignPositive,
            TokenType::Minus => UnaryOperator::SignNegative,
            _ => return self.power(),
        };
        self.next_tok();
        let rhs = self.unary()?;
        Ok(Rc::new(Expr::UnaryExpr(UnaryExpr { op, rhs })))
    }

    fn power(&mut self) -> Result<Rc<Expr>, ParseError> {
        let base = self.atom()?;
        if let TokenType::Exp = self.peek_ty() {
            self.next_tok();
            // Right-associative; the exponent may carry its own sign.
            let exponent = self.unary()?;
            return Ok(Rc::new(Expr::BinaryExpr(BinaryExpr {
                op: BinaryOperator::Exp,
                lhs: base,
                rhs: exponent,
            })));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Rc<Expr>, ParseError> {
        let tok = self.next_tok();
        match tok.ty {
            TokenType::Float(f) => Ok(Rc::new(Expr::Const(f))),
            TokenType::Variable(name) => {
                if FUNCTIONS.contains(&name.as_str()) {
                    if let TokenType::OpenParen = self.peek_ty() {
                        self.next_tok();
                        let arg = self.expr()?;
                        self.expect(TokenType::CloseParen)?;
                        return Ok(Rc::new(Expr::Call(Call { name, arg })));
                    }
                }
                Ok(Rc::new(Expr::Var(name)))
            }
            TokenType::OpenParen => {
                let inner = self.expr()?;
                self.expect(TokenType::CloseParen)?;
                Ok(inner)
            }
            TokenType::OpenBracket => {
                let inner = self.expr()?;
                self.expect(TokenType::CloseBracket)?;
                Ok(inner)
            }
            TokenType::Invalid(c) => Err(ParseError::InvalidToken(c)),
            TokenType::Eof => Err(ParseError::UnexpectedEof),
            _ => Err(ParseError::UnexpectedToken(tok)),
        }
    }

    fn expect(&mut self, expected: TokenType) -> Result<(), ParseError> {
        let tok = self.next_tok();
        if tok.ty == expected {
            Ok(())
        } else if tok.ty == TokenType::Eof {
            Err(ParseError::UnexpectedEof)
        } else {
            Err(ParseError::UnexpectedToken(tok))
        }
    }
}
