//! Lowers answer expressions into the [math][crate::math] normal form and
//! tests differences for zero.
//!
//! This is the shim between the grammar and the arithmetic: the
//! equivalence checker builds the textual difference `(truth)-(given)`,
//! and an answer pair is symbolically equal exactly when that difference
//! lowers to a polynomial with all-zero coefficients. Every failure along
//! the way — scan, parse, explosion, domain — collapses to "not zero",
//! never to an error the caller can see.

use crate::grammar::*;
use crate::math::{Poly, PolyError};
use crate::parser::{parse, ParseError};
use crate::scanner::scan;

use core::fmt;
use std::error::Error;

/// A failure to reduce an expression to the normal form.
#[derive(PartialEq, Clone, Debug)]
pub enum SimplifyError {
    /// The expression did not parse.
    Parse(ParseError),
    /// The arithmetic left the bounded normal form.
    Arithmetic(PolyError),
    /// A call to a function the engine does not know.
    UnknownFunction(String),
}

impl fmt::Display for SimplifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SimplifyError::*;
        match self {
            Parse(err) => write!(f, "{}", err),
            Arithmetic(err) => write!(f, "{}", err),
            UnknownFunction(name) => write!(f, r#"Unknown function "{}""#, name),
        }
    }
}

impl Error for SimplifyError {}

impl From<ParseError> for SimplifyError {
    fn from(err: ParseError) -> Self {
        SimplifyError::Parse(err)
    }
}

impl From<PolyError> for SimplifyError {
    fn from(err: PolyError) -> Self {
        SimplifyError::Arithmetic(err)
    }
}

/// Whether `expr` simplifies to the zero expression.
///
/// Anything that cannot be scanned, parsed, or reduced is conservatively
/// not zero.
pub fn simplifies_to_zero(expr: &str) -> bool {
    match reduce(expr) {
        Ok(poly) => poly.is_zero(),
        Err(_) => false,
    }
}

/// Reduces expression text to its normal form.
pub fn reduce(expr: &str) -> Result<Poly, SimplifyError> {
    let parsed = parse(scan(expr))?;
    lower(&parsed)
}

fn lower(expr: &Expr) -> Result<Poly, SimplifyError> {
    use BinaryOperator::*;
    match expr {
        Expr::Const(c) => Ok(Poly::from_const(*c)),
        Expr::Var(name) => Ok(Poly::from_atom(name.clone())),
        Expr::UnaryExpr(UnaryExpr { op, rhs }) => {
            let rhs = lower(rhs)?;
            Ok(match op {
                UnaryOperator::SignPositive => rhs,
                UnaryOperator::SignNegative => rhs.neg(),
            })
        }
        Expr::BinaryExpr(BinaryExpr { op, lhs, rhs }) => {
            let lhs = lower(lhs)?;
            let rhs = lower(rhs)?;
            Ok(match op {
                Plus => lhs.add(&rhs),
                Minus => lhs.sub(&rhs),
                Mult => lhs.mul(&rhs)?,
                Div => lhs.div(&rhs)?,
                Exp => lhs.pow(&rhs)?,
            })
        }
        Expr::Call(Call { name, arg }) => {
            let arg = lower(arg)?;
            apply(name, arg)
        }
    }
}

fn apply(name: &str, arg: Poly) -> Result<Poly, SimplifyError> {
    match name {
        "sqrt" => match arg.as_const() {
            Some(c) if c >= 0.0 => Ok(Poly::from_const(c.sqrt())),
            Some(_) => Err(SimplifyError::Arithmetic(PolyError::Domain)),
            // A symbolic radicand stays opaque; `sqrt(x)` only ever equals
            // another `sqrt(x)`.
            None => Ok(Poly::from_atom(format!("sqrt({})", arg))),
        },
        _ => Err(SimplifyError::UnknownFunction(name.to_string())),
    }
}
