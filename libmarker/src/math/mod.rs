//! Arithmetic over a bounded normal form, used by the equivalence checker.
//!
//! This module is decoupled from the [grammar][crate::grammar]: it knows
//! nothing about expression trees, only about sums of coefficient-carrying
//! monomials. The [simplify][crate::simplify] shim lowers a grammar
//! expression into this representation.

mod poly;
pub use poly::*;
