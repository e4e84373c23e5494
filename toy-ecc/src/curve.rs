use crate::arithmetic::{FieldElement, GroupLaw, Point};
use crate::export::PointSetExport;
use crate::order;
use crate::report;
use crate::{CurveError, CurveParameters};

use log::debug;
use once_cell::unsync::OnceCell;

use std::collections::{BTreeMap, BTreeSet};

pub type SquareRootIndex = BTreeMap<FieldElement, Vec<FieldElement>>;

/// A curve together with its brute-force tables.
///
/// Every table is computed on first access and memoized. Any parameter change
/// goes through [`EllipticCurve::invalidate`], which drops all of them.
#[derive(Debug, Clone)]
pub struct EllipticCurve {
    params: CurveParameters,
    evaluation_results: OnceCell<Vec<FieldElement>>,
    quadratic_residues: OnceCell<BTreeSet<FieldElement>>,
    square_roots: OnceCell<SquareRootIndex>,
    curve_points: OnceCell<Vec<Point>>,
}

impl From<CurveParameters> for EllipticCurve {
    fn from(params: CurveParameters) -> Self {
        Self {
            params,
            evaluation_results: OnceCell::new(),
            quadratic_residues: OnceCell::new(),
            square_roots: OnceCell::new(),
            curve_points: OnceCell::new(),
        }
    }
}

impl EllipticCurve {
    pub fn new(a: i64, b: i64, prime: u64) -> Result<Self, CurveError> {
        Ok(Self::from(CurveParameters::new(a, b, prime)?))
    }

    pub fn parameters(&self) -> &CurveParameters {
        &self.params
    }

    pub fn a(&self) -> i64 {
        self.params.a()
    }

    pub fn b(&self) -> i64 {
        self.params.b()
    }

    pub fn prime(&self) -> u64 {
        self.params.p()
    }

    pub fn set_a(&mut self, a: i64) -> Result<(), CurveError> {
        self.set_parameters(self.params.with_a(a)?);
        Ok(())
    }

    pub fn set_b(&mut self, b: i64) -> Result<(), CurveError> {
        self.set_parameters(self.params.with_b(b)?);
        Ok(())
    }

    pub fn set_prime(&mut self, prime: u64) -> Result<(), CurveError> {
        self.set_parameters(self.params.with_prime(prime)?);
        Ok(())
    }

    pub fn set_parameters(&mut self, params: CurveParameters) {
        self.params = params;
        self.invalidate();
    }

    /// Drops every memoized table.
    pub fn invalidate(&mut self) {
        debug!("invalidating cached tables for {}", self.params);
        self.evaluation_results.take();
        self.quadratic_residues.take();
        self.square_roots.take();
        self.curve_points.take();
    }

    /// `f(x) = x^3 + ax + b mod p` for every `x` in `[0, p)`.
    pub fn evaluation_table(&self) -> &[FieldElement] {
        self.evaluation_results.get_or_init(|| {
            debug!("computing evaluation table for {}", self.params);
            let field = self.params.field();
            (0..self.prime())
                .map(|x| self.params.evaluate(field.element_u64(x)))
                .collect()
        })
    }

    /// Squares of `x` in `[1, p)`; zero is never listed.
    pub fn quadratic_residues(&self) -> &BTreeSet<FieldElement> {
        self.quadratic_residues.get_or_init(|| {
            debug!("computing quadratic residues modulo {}", self.prime());
            let field = self.params.field();
            (1..self.prime())
                .map(|x| field.square(field.element_u64(x)))
                .collect()
        })
    }

    /// Maps every quadratic residue to its roots in ascending order.
    pub fn square_roots(&self) -> &SquareRootIndex {
        self.square_roots.get_or_init(|| {
            debug!("computing square roots modulo {}", self.prime());
            let field = self.params.field();
            let mut roots: SquareRootIndex = self
                .quadratic_residues()
                .iter()
                .map(|&residue| (residue, Vec::with_capacity(2)))
                .collect();
            for x in 1..self.prime() {
                let x = field.element_u64(x);
                roots.entry(field.square(x)).or_default().push(x);
            }
            roots
        })
    }

    /// Affine points ordered by `x` then by root order, followed by a single
    /// [`Point::Infinity`].
    pub fn curve_points(&self) -> &[Point] {
        self.curve_points.get_or_init(|| {
            let table = self.evaluation_table();
            let roots = self.square_roots();
            let mut points = Vec::new();
            for (x, value) in table.iter().enumerate() {
                if let Some(ys) = roots.get(value) {
                    let x = FieldElement(x as u64);
                    points.extend(ys.iter().map(|&y| Point::Affine { x, y }));
                }
            }
            points.push(Point::Infinity);
            debug!("found {} points on {}", points.len(), self.params);
            points
        })
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.curve_points().contains(point)
    }

    pub fn group_law(&self) -> GroupLaw {
        GroupLaw::new(self.params)
    }

    pub fn add(&self, lhs: &Point, rhs: &Point) -> Result<Point, CurveError> {
        self.group_law().add(lhs, rhs)
    }

    pub fn double(&self, point: &Point) -> Result<Point, CurveError> {
        self.group_law().double(point)
    }

    pub fn is_inverse_point(&self, lhs: &Point, rhs: &Point) -> bool {
        self.group_law().is_inverse_point(lhs, rhs)
    }

    pub fn is_generator(&self, point: &Point) -> Result<bool, CurveError> {
        order::is_generator(&self.group_law(), point, self.curve_points())
    }

    pub fn evaluation_table_report(&self) -> String {
        report::evaluation_table_report(
            &self.params,
            self.evaluation_table(),
            self.square_roots(),
        )
    }

    pub fn export(&self) -> PointSetExport {
        PointSetExport::new(&self.params, self.curve_points())
    }
}
