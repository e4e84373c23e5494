use crate::CurveError;

use num_integer::Integer;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Canonical representative of a residue class, always in `[0, p)` for the
/// field that produced it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FieldElement(pub(crate) u64);

impl FieldElement {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    pub fn inner(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reduces `x` into `[0, p)`. `p` must be nonzero.
pub fn normalize(x: i64, p: u64) -> FieldElement {
    FieldElement((x as i128).mod_floor(&(p as i128)) as u64)
}

/// Multiplicative inverse of `x` modulo `p` via the iterative extended
/// Euclidean algorithm.
pub fn modular_inverse(x: i64, p: u64) -> Result<FieldElement, CurveError> {
    if p < 2 {
        return Err(CurveError::NoInverse {
            value: 0,
            modulus: p,
        });
    }
    let field = PrimeField::new_unchecked(p);
    field.invert(field.element(x))
}

// `value` is already reduced into `[0, modulus)`
fn extended_euclid(value: i128, modulus: i128) -> Option<i128> {
    let mut u = value;
    let mut v = modulus;
    let mut x1 = 1_i128;
    let mut x2 = 0_i128;
    while u != 1 {
        // u runs down the remainder sequence, so it hits zero iff gcd != 1
        if u == 0 {
            return None;
        }
        let q = v / u;
        let r = v - q * u;
        let x = x2 - q * x1;
        v = u;
        u = r;
        x2 = x1;
        x1 = x;
    }
    Some(x1.mod_floor(&modulus))
}

/// Arithmetic over `Z/pZ` for a runtime modulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: u64,
}

impl PrimeField {
    /// Primality is checked by [`CurveParameters`](crate::CurveParameters); a
    /// bare field only requires a modulus of at least 2.
    pub fn new(modulus: u64) -> Result<Self, CurveError> {
        if modulus < 2 {
            return Err(CurveError::InvalidParameter(format!(
                "modulus must be at least 2, got {}",
                modulus
            )));
        }
        Ok(Self { modulus })
    }

    // modulus already checked by `CurveParameters`
    pub(crate) fn new_unchecked(modulus: u64) -> Self {
        debug_assert!(modulus >= 2);
        Self { modulus }
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn element(&self, x: i64) -> FieldElement {
        normalize(x, self.modulus)
    }

    pub fn element_u64(&self, x: u64) -> FieldElement {
        FieldElement(x % self.modulus)
    }

    pub fn contains(&self, x: FieldElement) -> bool {
        x.0 < self.modulus
    }

    pub fn add(&self, lhs: FieldElement, rhs: FieldElement) -> FieldElement {
        self.reduce(lhs.0 as u128 + rhs.0 as u128)
    }

    pub fn sub(&self, lhs: FieldElement, rhs: FieldElement) -> FieldElement {
        let m = self.modulus as u128;
        self.reduce(lhs.0 as u128 % m + m - rhs.0 as u128 % m)
    }

    pub fn neg(&self, x: FieldElement) -> FieldElement {
        self.sub(FieldElement::ZERO, x)
    }

    pub fn mul(&self, lhs: FieldElement, rhs: FieldElement) -> FieldElement {
        self.reduce(lhs.0 as u128 * rhs.0 as u128)
    }

    pub fn square(&self, x: FieldElement) -> FieldElement {
        self.mul(x, x)
    }

    pub fn invert(&self, x: FieldElement) -> Result<FieldElement, CurveError> {
        let reduced = x.0 % self.modulus;
        extended_euclid(reduced as i128, self.modulus as i128)
            .map(|inv| FieldElement(inv as u64))
            .ok_or(CurveError::NoInverse {
                value: reduced,
                modulus: self.modulus,
            })
    }

    fn reduce(&self, wide: u128) -> FieldElement {
        FieldElement((wide % self.modulus as u128) as u64)
    }
}
