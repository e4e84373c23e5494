use super::field::{FieldElement, PrimeField};
use super::point::Point;
use crate::{CurveError, CurveParameters};

use log::trace;

/// The chord-and-tangent group law for one set of curve parameters.
///
/// Inputs are trusted to lie on the curve, except in [`GroupLaw::checked_add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupLaw {
    params: CurveParameters,
    field: PrimeField,
}

impl From<CurveParameters> for GroupLaw {
    fn from(params: CurveParameters) -> Self {
        Self::new(params)
    }
}

impl GroupLaw {
    pub fn new(params: CurveParameters) -> Self {
        Self {
            params,
            field: params.field(),
        }
    }

    pub fn parameters(&self) -> &CurveParameters {
        &self.params
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn is_on_curve(&self, point: &Point) -> bool {
        match *point {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                self.field.contains(x)
                    && self.field.contains(y)
                    && self.field.square(y) == self.params.evaluate(x)
            }
        }
    }

    /// True iff both points are affine, share `x` and `y1 = -y2 (mod p)`.
    pub fn is_inverse_point(&self, lhs: &Point, rhs: &Point) -> bool {
        match (lhs, rhs) {
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                x1 == x2 && *y1 == self.field.neg(*y2)
            }
            _ => false,
        }
    }

    pub fn negate(&self, point: &Point) -> Point {
        match *point {
            Point::Affine { x, y } => Point::Affine {
                x,
                y: self.field.neg(y),
            },
            Point::Infinity => Point::Infinity,
        }
    }

    pub fn add(&self, lhs: &Point, rhs: &Point) -> Result<Point, CurveError> {
        // equality is tested first, so O + O goes through `double` as well
        if lhs == rhs {
            return self.double(lhs);
        }
        let (x1, y1, x2, y2) = match (*lhs, *rhs) {
            (Point::Infinity, _) => return Ok(*rhs),
            (_, Point::Infinity) => return Ok(*lhs),
            _ if self.is_inverse_point(lhs, rhs) => {
                trace!("{} + {} = O", lhs, rhs);
                return Ok(Point::Infinity);
            }
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };

        let f = &self.field;
        let slope = f.mul(f.sub(y2, y1), f.invert(f.sub(x2, x1))?);
        let x3 = f.sub(f.sub(f.square(slope), x1), x2);
        let y3 = f.sub(f.mul(slope, f.sub(x1, x3)), y1);
        trace!("{} + {} = ({}, {})", lhs, rhs, x3, y3);
        Ok(Point::Affine { x: x3, y: y3 })
    }

    /// Tangent doubling. A point with `y = 0` has a vertical tangent and
    /// reports [`CurveError::NoInverse`].
    pub fn double(&self, point: &Point) -> Result<Point, CurveError> {
        let (x, y) = match *point {
            Point::Affine { x, y } => (x, y),
            Point::Infinity => return Ok(Point::Infinity),
        };

        let f = &self.field;
        let three = f.element_u64(3);
        let numerator = f.add(f.mul(three, f.square(x)), self.params.coeff_a());
        let slope = f.mul(numerator, f.invert(f.add(y, y))?);
        let x3 = f.sub(f.square(slope), f.add(x, x));
        let y3 = f.sub(f.mul(slope, f.sub(x, x3)), y);
        trace!("2 * {} = ({}, {})", point, x3, y3);
        Ok(Point::Affine { x: x3, y: y3 })
    }

    /// Like [`GroupLaw::add`] but rejects operands that do not satisfy the
    /// curve equation.
    pub fn checked_add(&self, lhs: &Point, rhs: &Point) -> Result<Point, CurveError> {
        self.ensure_on_curve(lhs)?;
        self.ensure_on_curve(rhs)?;
        self.add(lhs, rhs)
    }

    /// `k * point` by double-and-add over the bits of `scalar`, most
    /// significant first.
    pub fn scalar_mul(&self, scalar: u64, point: &Point) -> Result<Point, CurveError> {
        let mut q = Point::Infinity;
        for bit in (0..u64::BITS - scalar.leading_zeros()).rev() {
            q = self.sum(&q, &q)?;
            if (scalar >> bit) & 1 == 1 {
                q = self.sum(&q, point)?;
            }
        }
        Ok(q)
    }

    // `add` that also maps `P + P` to O when `P` has a vertical tangent
    fn sum(&self, lhs: &Point, rhs: &Point) -> Result<Point, CurveError> {
        if self.is_inverse_point(lhs, rhs) {
            return Ok(Point::Infinity);
        }
        self.add(lhs, rhs)
    }

    pub fn ensure_on_curve(&self, point: &Point) -> Result<(), CurveError> {
        if self.is_on_curve(point) {
            return Ok(());
        }
        // Infinity is always on the curve, so this is an affine point
        let (x, y) = point.coordinates().unwrap_or_default();
        Err(CurveError::PointNotOnCurve { x, y })
    }

    pub fn point(&self, x: i64, y: i64) -> Point {
        Point::Affine {
            x: self.field.element(x),
            y: self.field.element(y),
        }
    }

    pub fn element(&self, x: i64) -> FieldElement {
        self.field.element(x)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn law(a: i64, b: i64, p: u64) -> GroupLaw {
        GroupLaw::new(CurveParameters::new(a, b, p).unwrap())
    }

    #[test]
    fn point_doubling() {
        let law = law(2, 2, 17);
        let g = Point::new(5, 1);
        assert_eq!(law.double(&g), Ok(Point::new(6, 3)));
        assert_eq!(law.add(&g, &g), law.double(&g));
        assert_eq!(law.double(&Point::new(6, 3)), Ok(Point::new(3, 1)));
    }

    #[test]
    fn point_addition() {
        let law = law(2, 2, 17);
        let g = Point::new(5, 1);
        let g2 = Point::new(6, 3);
        assert_eq!(law.add(&g, &g2), Ok(Point::new(10, 6)));
        assert_eq!(law.add(&g2, &g), Ok(Point::new(10, 6)));
        assert_eq!(law.add(&Point::new(10, 6), &g), Ok(Point::new(3, 1)));
        assert!(law.is_on_curve(&Point::new(10, 6)));
    }

    #[test]
    fn identity_and_inverse() {
        let law = law(2, 2, 17);
        let g = Point::new(5, 1);
        assert_eq!(law.add(&g, &Point::Infinity), Ok(g));
        assert_eq!(law.add(&Point::Infinity, &g), Ok(g));
        assert_eq!(law.add(&Point::Infinity, &Point::Infinity), Ok(Point::Infinity));

        let minus_g = law.negate(&g);
        assert_eq!(minus_g, Point::new(5, 16));
        assert!(law.is_inverse_point(&g, &minus_g));
        assert!(!law.is_inverse_point(&g, &g));
        assert!(!law.is_inverse_point(&g, &Point::Infinity));
        assert!(!law.is_inverse_point(&Point::Infinity, &Point::Infinity));
        assert_eq!(law.add(&g, &minus_g), Ok(Point::Infinity));
        assert_eq!(law.negate(&Point::Infinity), Point::Infinity);
    }

    #[test]
    fn vertical_tangent_reports_no_inverse() {
        // x^3 + x = 0 at x = 0, so (0, 0) has order two
        let law = law(1, 0, 23);
        let t = Point::new(0, 0);
        assert!(law.is_on_curve(&t));
        assert_eq!(
            law.double(&t),
            Err(CurveError::NoInverse {
                value: 0,
                modulus: 23
            })
        );
        assert_eq!(law.add(&t, &t), law.double(&t));
    }

    #[test]
    fn equal_x_off_curve_is_an_error() {
        let law = law(2, 2, 17);
        // (5, 2) is not on the curve, so the chord formula divides by zero
        let result = law.add(&Point::new(5, 1), &Point::new(5, 2));
        assert!(matches!(result, Err(CurveError::NoInverse { .. })));
        assert_eq!(
            law.checked_add(&Point::new(5, 1), &Point::new(5, 2)),
            Err(CurveError::PointNotOnCurve { x: 5, y: 2 })
        );
    }

    #[test]
    fn scalar_multiplication() {
        let law = law(2, 2, 17);
        let g = Point::new(5, 1);
        assert_eq!(law.scalar_mul(0, &g), Ok(Point::Infinity));
        assert_eq!(law.scalar_mul(1, &g), Ok(g));
        assert_eq!(law.scalar_mul(2, &g), Ok(Point::new(6, 3)));
        assert_eq!(law.scalar_mul(3, &g), Ok(Point::new(10, 6)));
        assert_eq!(law.scalar_mul(4, &g), Ok(Point::new(3, 1)));
        assert_eq!(law.scalar_mul(18, &g), Ok(Point::new(5, 16)));
        assert_eq!(law.scalar_mul(19, &g), Ok(Point::Infinity));
        assert_eq!(law.scalar_mul(20, &g), Ok(g));
        assert_eq!(law.scalar_mul(5, &Point::Infinity), Ok(Point::Infinity));
    }

    #[test]
    fn scalar_multiplication_large_scalars() {
        let law = law(2, 2, 17);
        let g = Point::new(5, 1);
        // 50_000_000 = 18 mod 19
        assert_eq!(law.scalar_mul(50_000_000, &g), Ok(Point::new(5, 16)));
        assert_eq!(law.scalar_mul(u64::MAX, &g), law.scalar_mul(u64::MAX % 19, &g));
        assert_eq!(law.scalar_mul(19 * 1_000_003, &g), Ok(Point::Infinity));
    }

    #[test]
    fn scalar_multiplication_through_order_two_points() {
        let law = law(1, 1, 23);
        let t = Point::new(4, 0);
        assert!(law.is_on_curve(&t));
        assert_eq!(law.scalar_mul(1, &t), Ok(t));
        assert_eq!(law.scalar_mul(2, &t), Ok(Point::Infinity));
        assert_eq!(law.scalar_mul(3, &t), Ok(t));

        let g = Point::new(0, 1);
        assert_eq!(law.scalar_mul(14, &g), Ok(t));
        assert_eq!(law.scalar_mul(28, &g), Ok(Point::Infinity));
        assert_eq!(law.scalar_mul(2, &g), Ok(Point::new(6, 19)));
        // the plain group law still reports the vertical tangent
        assert!(law.double(&t).is_err());
    }

    #[test]
    fn curve_membership() {
        let law = law(2, 2, 17);
        assert!(law.is_on_curve(&Point::Infinity));
        assert!(law.is_on_curve(&Point::new(0, 6)));
        assert!(!law.is_on_curve(&Point::new(0, 7)));
        assert!(!law.is_on_curve(&Point::new(22, 6)));
        assert_eq!(law.point(-12, -11), Point::new(5, 6));
        assert_eq!(law.element(-1).inner(), 16);
    }
}
