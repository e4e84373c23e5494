use crate::arithmetic::{GroupLaw, Point};
use crate::utils::{is_prime, isqrt};
use crate::CurveError;

use log::debug;

/// Number of entries in an enumerated point set, identity included.
pub fn group_order(curve_points: &[Point]) -> u64 {
    curve_points.len() as u64
}

/// Generator test against an enumerated point set.
///
/// `point` must be a member of `curve_points`, otherwise the call fails with
/// [`CurveError::PointNotOnCurve`]; the identity never generates. When the set
/// has prime size every other member is accepted right away. Otherwise the
/// multiples `2P, 3P, ...` are accumulated as many times as the set has
/// entries, and the test fails as soon as one of them falls outside the set.
pub fn is_generator(
    law: &GroupLaw,
    point: &Point,
    curve_points: &[Point],
) -> Result<bool, CurveError> {
    if !curve_points.contains(point) {
        let (x, y) = point.coordinates().unwrap_or_default();
        return Err(CurveError::PointNotOnCurve { x, y });
    }
    if point.is_identity() {
        return Ok(false);
    }

    let order = group_order(curve_points);
    if is_prime(order) {
        debug!("point set has prime size {}, {} generates it", order, point);
        return Ok(true);
    }

    let mut result = *point;
    for _ in 0..order {
        result = law.add(&result, point)?;
        if !curve_points.contains(&result) {
            debug!("{} left the point set at {}", point, result);
            return Ok(false);
        }
    }
    Ok(true)
}

/// Smallest `n >= 1` with `n * point = O`.
pub fn point_order(law: &GroupLaw, point: &Point) -> Result<u64, CurveError> {
    if point.is_identity() {
        return Ok(1);
    }
    law.ensure_on_curve(point)?;

    // Hasse: #E <= p + 1 + 2 sqrt(p)
    let p = law.parameters().p();
    let bound = p + 1 + 2 * (isqrt(p) + 1);

    let mut acc = *point;
    for n in 1..=bound {
        // checked before adding so that points with y = 0 never get doubled
        if law.is_inverse_point(&acc, point) {
            return Ok(n + 1);
        }
        acc = law.add(&acc, point)?;
    }
    let (x, y) = point.coordinates().unwrap_or_default();
    Err(CurveError::PointNotOnCurve { x, y })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::EllipticCurve;

    #[test]
    fn prime_size_shortcut() {
        let curve = EllipticCurve::new(2, 2, 17).unwrap();
        let law = curve.group_law();
        let points = curve.curve_points();
        assert_eq!(group_order(points), 19);
        for point in points.iter().filter(|p| !p.is_identity()) {
            assert_eq!(is_generator(&law, point, points), Ok(true));
            assert_eq!(point_order(&law, point), Ok(19));
        }
        let curve = EllipticCurve::new(1, 6, 11).unwrap();
        assert_eq!(curve.is_generator(&Point::new(2, 7)), Ok(true));
    }

    #[test]
    fn shortcut_validates_the_candidate() {
        let curve = EllipticCurve::new(2, 2, 17).unwrap();
        assert_eq!(
            curve.is_generator(&Point::new(5, 2)),
            Err(CurveError::PointNotOnCurve { x: 5, y: 2 })
        );
        assert_eq!(curve.is_generator(&Point::Infinity), Ok(false));
    }

    #[test]
    fn accumulation_without_shortcut() {
        // 8 affine points plus the identity
        let curve = EllipticCurve::new(1, 1, 5).unwrap();
        assert_eq!(group_order(curve.curve_points()), 9);
        assert_eq!(curve.is_generator(&Point::new(0, 1)), Ok(true));
        assert_eq!(curve.is_generator(&Point::new(4, 3)), Ok(true));
    }

    #[test]
    fn accumulation_leaving_the_point_set() {
        // the set misses the order two point (4, 0), so it has 27 entries
        // while the group has 28 elements
        let curve = EllipticCurve::new(1, 1, 23).unwrap();
        let law = curve.group_law();
        assert_eq!(group_order(curve.curve_points()), 27);
        assert!(!curve.contains(&Point::new(4, 0)));
        assert!(law.is_on_curve(&Point::new(4, 0)));

        assert_eq!(curve.is_generator(&Point::new(0, 1)), Ok(false));
        assert_eq!(curve.is_generator(&Point::new(6, 4)), Ok(false));
        assert_eq!(curve.is_generator(&Point::new(5, 4)), Ok(true));
        assert_eq!(curve.is_generator(&Point::new(17, 20)), Ok(true));
    }

    #[test]
    fn point_orders() {
        let curve = EllipticCurve::new(1, 1, 23).unwrap();
        let law = curve.group_law();
        assert_eq!(point_order(&law, &Point::Infinity), Ok(1));
        assert_eq!(point_order(&law, &Point::new(4, 0)), Ok(2));
        assert_eq!(point_order(&law, &Point::new(11, 3)), Ok(4));
        assert_eq!(point_order(&law, &Point::new(5, 4)), Ok(7));
        assert_eq!(point_order(&law, &Point::new(6, 4)), Ok(14));
        assert_eq!(point_order(&law, &Point::new(0, 1)), Ok(28));
        for point in curve.curve_points() {
            assert_eq!(28 % point_order(&law, point).unwrap(), 0);
        }
        assert_eq!(
            point_order(&law, &Point::new(0, 2)),
            Err(CurveError::PointNotOnCurve { x: 0, y: 2 })
        );
    }
}
