mod field;
mod group;
mod point;

pub use field::{modular_inverse, normalize, FieldElement, PrimeField};
pub use group::GroupLaw;
pub use point::Point;
