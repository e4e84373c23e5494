#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

//! Brute-force arithmetic on tiny short-Weierstrass curves `y^2 = x^3 + ax + b (mod p)`.
//!
//! Only meant for teaching sized primes. Nothing in here is constant time.

pub mod arithmetic;
pub mod curve;
pub mod exchange;
pub mod export;
pub mod order;
pub mod parameters;
pub mod report;
mod utils;

pub use arithmetic::{FieldElement, GroupLaw, Point, PrimeField};
pub use curve::EllipticCurve;
pub use parameters::CurveParameters;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("{value} has no multiplicative inverse modulo {modulus}")]
    NoInverse { value: u64, modulus: u64 },
    #[error("invalid curve parameter: {0}")]
    InvalidParameter(String),
    #[error("point ({x}, {y}) is not on the curve")]
    PointNotOnCurve { x: u64, y: u64 },
}
