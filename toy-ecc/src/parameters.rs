use crate::arithmetic::{FieldElement, PrimeField};
use crate::utils::is_prime;
use crate::CurveError;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Largest prime the enumerator accepts. Every table is `O(p)`, and keeping
/// `p < 2^32` lets products of two field elements fit in a `u64`.
pub const MAX_PRIME: u64 = u32::MAX as u64;

/// Coefficients of `y^2 = x^3 + ax + b` over `GF(p)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedParameters")]
pub struct CurveParameters {
    a: i64,
    b: i64,
    p: u64,
}

#[derive(Deserialize)]
struct UncheckedParameters {
    a: i64,
    b: i64,
    #[serde(alias = "prime")]
    p: u64,
}

impl TryFrom<UncheckedParameters> for CurveParameters {
    type Error = CurveError;
    fn try_from(raw: UncheckedParameters) -> Result<Self, Self::Error> {
        Self::new(raw.a, raw.b, raw.p)
    }
}

impl fmt::Display for CurveParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a: {}, b: {}, prime: {}", self.a, self.b, self.p)
    }
}

impl CurveParameters {
    /// Fails when `p` is not a prime above 3 (or is too large to enumerate)
    /// and when the curve is singular, i.e. `4a^3 + 27b^2 = 0 (mod p)`.
    pub fn new(a: i64, b: i64, p: u64) -> Result<Self, CurveError> {
        if p <= 3 {
            return Err(CurveError::InvalidParameter(format!(
                "prime must be greater than 3, got {}",
                p
            )));
        }
        if p > MAX_PRIME {
            return Err(CurveError::InvalidParameter(format!(
                "prime {} is too large to enumerate (max {})",
                p, MAX_PRIME
            )));
        }
        if !is_prime(p) {
            return Err(CurveError::InvalidParameter(format!(
                "{} is not a prime",
                p
            )));
        }

        let params = Self { a, b, p };
        if params.discriminant().is_zero() {
            return Err(CurveError::InvalidParameter(format!(
                "curve with a = {}, b = {} is singular modulo {}",
                a, b, p
            )));
        }
        Ok(params)
    }

    pub fn a(&self) -> i64 {
        self.a
    }

    pub fn b(&self) -> i64 {
        self.b
    }

    pub fn p(&self) -> u64 {
        self.p
    }

    pub fn with_a(&self, a: i64) -> Result<Self, CurveError> {
        Self::new(a, self.b, self.p)
    }

    pub fn with_b(&self, b: i64) -> Result<Self, CurveError> {
        Self::new(self.a, b, self.p)
    }

    pub fn with_prime(&self, p: u64) -> Result<Self, CurveError> {
        Self::new(self.a, self.b, p)
    }

    pub fn field(&self) -> PrimeField {
        PrimeField::new_unchecked(self.p)
    }

    pub fn coeff_a(&self) -> FieldElement {
        self.field().element(self.a)
    }

    pub fn coeff_b(&self) -> FieldElement {
        self.field().element(self.b)
    }

    /// `x^3 + ax + b mod p`
    pub fn evaluate(&self, x: FieldElement) -> FieldElement {
        let field = self.field();
        let x3 = field.mul(field.square(x), x);
        let ax = field.mul(self.coeff_a(), x);
        field.add(field.add(x3, ax), self.coeff_b())
    }

    // 4a^3 + 27b^2 mod p
    fn discriminant(&self) -> FieldElement {
        let field = self.field();
        let a = self.coeff_a();
        let b = self.coeff_b();
        let a3 = field.mul(field.square(a), a);
        let lhs = field.mul(field.element_u64(4), a3);
        let rhs = field.mul(field.element_u64(27), field.square(b));
        field.add(lhs, rhs)
    }
}
