use super::field::FieldElement;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Either an affine coordinate pair or the group identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Point {
    Infinity,
    Affine { x: FieldElement, y: FieldElement },
}

impl Point {
    pub const IDENTITY: Self = Self::Infinity;

    /// Builds an affine point from raw coordinates. The caller is responsible
    /// for passing values already reduced modulo the curve prime.
    pub fn new(x: u64, y: u64) -> Self {
        Self::Affine {
            x: FieldElement(x),
            y: FieldElement(y),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    pub fn x(&self) -> Option<FieldElement> {
        match self {
            Self::Affine { x, .. } => Some(*x),
            Self::Infinity => None,
        }
    }

    pub fn y(&self) -> Option<FieldElement> {
        match self {
            Self::Affine { y, .. } => Some(*y),
            Self::Infinity => None,
        }
    }

    pub fn coordinates(&self) -> Option<(u64, u64)> {
        match self {
            Self::Affine { x, y } => Some((x.inner(), y.inner())),
            Self::Infinity => None,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Affine { x, y } => write!(f, "({}, {})", x, y),
            Self::Infinity => write!(f, "O"),
        }
    }
}
