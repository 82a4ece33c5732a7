//! The grammar of answer expressions.
//!
//! Only as much structure as equivalence checking needs: constants,
//! variables, the four arithmetic operators plus exponentiation, sign
//! prefixes, and calls to the small set of functions that survive LaTeX
//! flattening (presently just `sqrt`).

use core::fmt;
use std::rc::Rc;

/// An answer expression.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    /// A constant.
    Const(f64),
    /// A variable (an unknown).
    Var(String),
    /// A function application.
    Call(Call),
    /// A binary operation.
    BinaryExpr(BinaryExpr),
    /// A unary (sign) operation.
    UnaryExpr(UnaryExpr),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        write!(
            f,
            "{}",
            match self {
                Const(num) => num.to_string(),
                Var(var) => var.to_string(),
                Call(call) => call.to_string(),
                BinaryExpr(binary_expr) => binary_expr.to_string(),
                UnaryExpr(unary_expr) => unary_expr.to_string(),
            }
        )
    }
}

/// A binary operator.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
pub enum BinaryOperator {
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Mult,
    /// /
    Div,
    /// ^
    Exp,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::*;
        write!(
            f,
            "{}",
            match self {
                Plus => "+",
                Minus => "-",
                Mult => "*",
                Div => "/",
                Exp => "^",
            }
        )
    }
}

/// A binary operation on two subexpressions.
#[derive(Clone, PartialEq, Debug)]
pub struct BinaryExpr {
    /// The operator.
    pub op: BinaryOperator,
    /// Left operand.
    pub lhs: Rc<Expr>,
    /// Right operand.
    pub rhs: Rc<Expr>,
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.lhs, self.op, self.rhs)
    }
}

/// A unary operator.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
pub enum UnaryOperator {
    /// +
    SignPositive,
    /// -
    SignNegative,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use UnaryOperator::*;
        write!(
            f,
            "{}",
            match self {
                SignPositive => "+",
                SignNegative => "-",
            }
        )
    }
}

/// A unary (sign) operation on a subexpression.
#[derive(Clone, PartialEq, Debug)]
pub struct UnaryExpr {
    /// The operator.
    pub op: UnaryOperator,
    /// The operand.
    pub rhs: Rc<Expr>,
}

impl fmt::Display for UnaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.op, self.rhs)
    }
}

/// A function application, like `sqrt(2)`.
#[derive(Clone, PartialEq, Debug)]
pub struct Call {
    /// The function name.
    pub name: String,
    /// The single argument.
    pub arg: Rc<Expr>,
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arg)
    }
}

/// Function names recognized as applications when followed by an opening
/// parenthesis. Any other adjacency is implicit multiplication.
pub const FUNCTIONS: &[&str] = &["sqrt"];
