//! A bounded polynomial-like normal form.
//!
//! A [Poly] is a sum of terms, each a `f64` coefficient times a [Monomial]
//! (a sorted multiset of atomic symbolic factors with integer exponents).
//! Two expressions are equivalent when their difference reduces to a [Poly]
//! whose coefficients are all (numerically) zero.
//!
//! The form is deliberately not a full computer-algebra system. Whatever
//! cannot be distributed, cancelled, or folded within the term budget
//! collapses into an opaque atomic factor keyed by its canonical rendering,
//! so equivalence degrades to structural equality instead of diverging.

use core::fmt;
use std::collections::BTreeMap;
use std::error::Error;

/// Most terms a product is allowed to distribute into.
///
/// The grading guards already reject expressions with many unknowns; this
/// cap bounds the residual worst case (e.g. long sums raised to a power).
pub const MAX_TERMS: usize = 64;

/// Coefficient magnitude at or below which a term counts as zero.
///
/// Tight enough that an 8-digit decimal approximation of a fraction still
/// differs from the fraction itself, loose enough to absorb accumulated
/// rounding in genuinely equal expressions.
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Largest integer exponent expanded by repeated multiplication.
const MAX_EXPANDED_EXPONENT: f64 = 16.0;

/// A sorted multiset of atomic factors with (nonzero) integer exponents.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Monomial {
    factors: BTreeMap<String, i32>,
}

impl Monomial {
    /// The empty monomial (the constant term's key).
    fn one() -> Self {
        Self::default()
    }

    /// A single factor raised to `exp`.
    fn atom<S: Into<String>>(name: S, exp: i32) -> Self {
        let mut factors = BTreeMap::new();
        if exp != 0 {
            factors.insert(name.into(), exp);
        }
        Self { factors }
    }

    fn is_one(&self) -> bool {
        self.factors.is_empty()
    }

    /// Multiplies two monomials, cancelling factors whose exponents sum to
    /// zero (so `x * x^-1` vanishes).
    fn mul(&self, other: &Self) -> Self {
        let mut factors = self.factors.clone();
        for (name, exp) in &other.factors {
            let entry = factors.entry(name.clone()).or_insert(0);
            *entry += exp;
            if *entry == 0 {
                factors.remove(name);
            }
        }
        Self { factors }
    }

    fn powi(&self, n: i32) -> Self {
        if n == 0 {
            return Self::one();
        }
        Self {
            factors: self
                .factors
                .iter()
                .map(|(name, exp)| (name.clone(), exp * n))
                .collect(),
        }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .factors
            .iter()
            .map(|(name, exp)| {
                if *exp == 1 {
                    name.clone()
                } else {
                    format!("{}^{}", name, exp)
                }
            })
            .collect::<Vec<_>>()
            .join("*");
        f.write_str(&rendered)
    }
}

/// A failure to keep an expression inside the normal form.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum PolyError {
    /// Distribution exceeded [MAX_TERMS].
    TooManyTerms,
    /// A division by (exact) zero.
    DivisionByZero,
    /// The result is not a real number.
    Domain,
}

impl fmt::Display for PolyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PolyError::*;
        match self {
            TooManyTerms => write!(f, "Expression expands to too many terms"),
            DivisionByZero => write!(f, "Division by zero"),
            Domain => write!(f, "Result is not a real number"),
        }
    }
}

impl Error for PolyError {}

/// A sum of coefficient-carrying monomials.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Poly {
    terms: BTreeMap<Monomial, f64>,
}

impl Poly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A constant.
    pub fn from_const(c: f64) -> Self {
        Self::from_term(Monomial::one(), c)
    }

    /// A bare symbolic atom, like a variable.
    pub fn from_atom<S: Into<String>>(name: S) -> Self {
        Self::from_term(Monomial::atom(name, 1), 1.0)
    }

    fn from_term(mono: Monomial, coeff: f64) -> Self {
        let mut terms = BTreeMap::new();
        if coeff != 0.0 {
            terms.insert(mono, coeff);
        }
        Self { terms }
    }

    /// The constant value of this polynomial, if it has no symbolic part.
    pub fn as_const(&self) -> Option<f64> {
        match self.terms.len() {
            0 => Some(0.0),
            1 => self
                .terms
                .iter()
                .next()
                .and_then(|(mono, coeff)| if mono.is_one() { Some(*coeff) } else { None }),
            _ => None,
        }
    }

    fn single_term(&self) -> Option<(&Monomial, f64)> {
        if self.terms.len() == 1 {
            self.terms.iter().next().map(|(mono, coeff)| (mono, *coeff))
        } else {
            None
        }
    }

    fn prune(mut self) -> Self {
        self.terms.retain(|_, coeff| *coeff != 0.0);
        self
    }

    /// Whether every coefficient is within [ZERO_TOLERANCE] of zero.
    pub fn is_zero(&self) -> bool {
        self.terms.values().all(|coeff| coeff.abs() <= ZERO_TOLERANCE)
    }

    /// Adds two polynomials, folding like terms.
    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (mono, coeff) in &other.terms {
            *out.terms.entry(mono.clone()).or_insert(0.0) += coeff;
        }
        out.prune()
    }

    /// Negates every term.
    pub fn neg(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(mono, coeff)| (mono.clone(), -coeff))
                .collect(),
        }
    }

    /// Subtracts `other` from `self`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials by full distribution.
    pub fn mul(&self, other: &Self) -> Result<Self, PolyError> {
        let mut out = Poly::zero();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                *out.terms.entry(m1.mul(m2)).or_insert(0.0) += c1 * c2;
                if out.terms.len() > MAX_TERMS {
                    return Err(PolyError::TooManyTerms);
                }
            }
        }
        Ok(out.prune())
    }

    /// Divides by `other`.
    ///
    /// Single-term divisors divide the coefficients and cancel exponents
    /// (`x/x` is 1). A multi-term divisor cannot be cancelled in this form
    /// and becomes an atomic reciprocal factor keyed by its rendering.
    pub fn div(&self, other: &Self) -> Result<Self, PolyError> {
        if other.terms.is_empty() {
            return Err(PolyError::DivisionByZero);
        }
        if let Some((dm, dc)) = other.single_term() {
            let recip = dm.powi(-1);
            let mut out = Poly::zero();
            for (mono, coeff) in &self.terms {
                *out.terms.entry(mono.mul(&recip)).or_insert(0.0) += coeff / dc;
            }
            return Ok(out.prune());
        }
        self.mul(&Poly::from_term(Monomial::atom(format!("({})", other), -1), 1.0))
    }

    /// Raises `self` to `exponent`.
    ///
    /// Small integer exponents expand; fractional exponents of nonnegative
    /// constants evaluate numerically; everything else collapses to an
    /// atomic factor.
    pub fn pow(&self, exponent: &Self) -> Result<Self, PolyError> {
        if let Some(e) = exponent.as_const() {
            if e.fract() == 0.0 && e.abs() <= MAX_EXPANDED_EXPONENT {
                return self.powi(e as i32);
            }
            if let Some(base) = self.as_const() {
                let powed = base.powf(e);
                if powed.is_finite() {
                    return Ok(Poly::from_const(powed));
                }
                return Err(PolyError::Domain);
            }
            return Ok(Poly::from_term(
                Monomial::atom(format!("({})^({})", self, e), 1),
                1.0,
            ));
        }
        Ok(Poly::from_term(
            Monomial::atom(format!("({})^({})", self, exponent), 1),
            1.0,
        ))
    }

    fn powi(&self, n: i32) -> Result<Self, PolyError> {
        if n == 0 {
            return Ok(Poly::from_const(1.0));
        }
        if let Some((mono, coeff)) = self.single_term() {
            let powed = coeff.powi(n);
            if !powed.is_finite() {
                return Err(PolyError::Domain);
            }
            return Ok(Poly::from_term(mono.powi(n), powed));
        }
        if n < 0 {
            if self.terms.is_empty() {
                return Err(PolyError::DivisionByZero);
            }
            // A negated power of a sum cannot be expanded; keep it atomic.
            return Ok(Poly::from_term(Monomial::atom(format!("({})", self), n), 1.0));
        }
        let mut out = Poly::from_const(1.0);
        for _ in 0..n {
            out = out.mul(self)?;
        }
        Ok(out)
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for (mono, coeff) in &self.terms {
            if first {
                if *coeff < 0.0 {
                    write!(f, "-")?;
                }
            } else if *coeff < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let magnitude = coeff.abs();
            if mono.is_one() {
                write!(f, "{}", magnitude)?;
            } else if magnitude == 1.0 {
                write!(f, "{}", mono)?;
            } else {
                write!(f, "{}*{}", magnitude, mono)?;
            }
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Poly {
        Poly::from_atom(name)
    }

    #[test]
    fn folds_like_terms() {
        // 2x + 3x - 5x = 0
        let x = atom("x");
        let sum = x
            .mul(&Poly::from_const(2.0))
            .unwrap()
            .add(&x.mul(&Poly::from_const(3.0)).unwrap())
            .sub(&x.mul(&Poly::from_const(5.0)).unwrap());
        assert!(sum.is_zero());
    }

    #[test]
    fn cancels_in_division() {
        // (2x) / x = 2
        let x = atom("x");
        let two_x = x.mul(&Poly::from_const(2.0)).unwrap();
        assert_eq!(two_x.div(&x).unwrap().as_const(), Some(2.0));
    }

    #[test]
    fn distributes_products() {
        // (x + 1)(x - 1) = x^2 - 1
        let x = atom("x");
        let one = Poly::from_const(1.0);
        let product = x.add(&one).mul(&x.sub(&one)).unwrap();
        let expanded = x.mul(&x).unwrap().sub(&one);
        assert_eq!(product, expanded);
    }

    #[test]
    fn expands_integer_powers() {
        // (x + 1)^2 = x^2 + 2x + 1
        let x = atom("x");
        let one = Poly::from_const(1.0);
        let squared = x.add(&one).pow(&Poly::from_const(2.0)).unwrap();
        let expanded = x
            .mul(&x)
            .unwrap()
            .add(&x.mul(&Poly::from_const(2.0)).unwrap())
            .add(&one);
        assert_eq!(squared, expanded);
    }

    #[test]
    fn folds_fractional_powers_of_constants() {
        let eight = Poly::from_const(8.0);
        let third = Poly::from_const(1.0).div(&Poly::from_const(3.0)).unwrap();
        let cbrt = eight.pow(&third).unwrap().as_const().unwrap();
        assert!((cbrt - 2.0).abs() <= ZERO_TOLERANCE);
    }

    #[test]
    fn rejects_division_by_zero() {
        assert_eq!(
            Poly::from_const(1.0).div(&Poly::zero()),
            Err(PolyError::DivisionByZero)
        );
    }

    #[test]
    fn rejects_term_explosions() {
        // A 33-term sum squared overruns the 64-term cap.
        let mut sum = Poly::zero();
        for i in 0..33 {
            sum = sum.add(&Poly::from_atom(format!("x{}", i)));
        }
        assert_eq!(sum.mul(&sum), Err(PolyError::TooManyTerms));
    }

    #[test]
    fn canonical_rendering() {
        // x^2 - 2x + 0.5, terms ordered by monomial
        let x = atom("x");
        let poly = x
            .mul(&x)
            .unwrap()
            .sub(&x.mul(&Poly::from_const(2.0)).unwrap())
            .add(&Poly::from_const(0.5));
        assert_eq!(poly.to_string(), "0.5 - 2*x + x^2");
    }
}
