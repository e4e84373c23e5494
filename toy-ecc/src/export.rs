use crate::arithmetic::Point;
use crate::CurveParameters;

use serde::{Deserialize, Serialize};

/// Point set of a curve in a form meant for plotting tools.
///
/// The identity keeps its own variant in `points`, it never shows up as a
/// numeric coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSetExport {
    pub a: i64,
    pub b: i64,
    pub prime: u64,
    pub points: Vec<Point>,
}

impl PointSetExport {
    pub fn new(params: &CurveParameters, points: &[Point]) -> Self {
        Self {
            a: params.a(),
            b: params.b(),
            prime: params.p(),
            points: points.to_vec(),
        }
    }

    pub fn affine_len(&self) -> usize {
        self.points.iter().filter(|p| !p.is_identity()).count()
    }

    pub fn includes_identity(&self) -> bool {
        self.points.iter().any(Point::is_identity)
    }

    /// `(xs, ys)` of the affine points, ready for a scatter plot.
    pub fn plot_series(&self) -> (Vec<u64>, Vec<u64>) {
        self.points.iter().filter_map(Point::coordinates).unzip()
    }

    /// Coordinate pairs with the identity replaced by a caller chosen marker.
    pub fn pairs_with<T: Clone>(&self, identity: T) -> Vec<Coordinates<T>> {
        self.points
            .iter()
            .map(|p| match p.coordinates() {
                Some((x, y)) => Coordinates::Finite(x, y),
                None => Coordinates::Identity(identity.clone()),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coordinates<T> {
    Finite(u64, u64),
    Identity(T),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::EllipticCurve;

    #[test]
    fn export_small_curve() {
        let curve = EllipticCurve::new(1, 6, 11).unwrap();
        let export = curve.export();
        assert_eq!((export.a, export.b, export.prime), (1, 6, 11));
        assert_eq!(export.points.len(), 13);
        assert_eq!(export.affine_len(), 12);
        assert!(export.includes_identity());

        let (xs, ys) = export.plot_series();
        assert_eq!(xs.len(), 12);
        assert_eq!(ys.len(), 12);
        assert_eq!((xs[0], ys[0]), (2, 4));
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));

        let pairs = export.pairs_with("inf");
        assert_eq!(pairs.first(), Some(&Coordinates::Finite(2, 4)));
        assert_eq!(pairs.last(), Some(&Coordinates::Identity("inf")));
    }

    #[test]
    fn json_shape() {
        let params = CurveParameters::new(2, 2, 17).unwrap();
        let export = PointSetExport::new(&params, &[Point::new(5, 1), Point::Infinity]);
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "a": 2,
                "b": 2,
                "prime": 17,
                "points": [{"Affine": {"x": 5, "y": 1}}, "Infinity"],
            })
        );
        let back: PointSetExport = serde_json::from_value(json).unwrap();
        assert_eq!(back, export);
    }
}
