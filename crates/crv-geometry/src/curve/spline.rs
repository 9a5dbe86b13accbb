//! Quadratic B-spline curve with optional interpolation and curvature-adaptive
//! rectification.

use crv_core::traits::Validate;
use crv_core::{CrvError, Result, Tolerance};
use crv_math::{solve_cyclic_tridiagonal, solve_tridiagonal, Point2, Polynomial, Vector2};
use serde::{Deserialize, Serialize};

use super::{check_finite, private, Curve};
use crate::bspline::{closed_knots, find_interval, midpoint, open_knots, QuadraticBasis};
use crate::rectify;

/// Construction options for [`Spline`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineOptions {
    /// Close the curve into a loop.
    pub closed: bool,
    /// Solve for control points so the curve passes through the given points.
    pub interpolate: bool,
    /// Spacing of the near-duplicate knots at the ends of open splines.
    pub ghost_spacing: f64,
    pub tolerance: Tolerance,
}

impl SplineOptions {
    pub const DEFAULT_GHOST_SPACING: f64 = 0.01;

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn interpolate(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    pub fn ghost_spacing(mut self, spacing: f64) -> Self {
        self.ghost_spacing = spacing;
        self
    }

    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for SplineOptions {
    fn default() -> Self {
        Self {
            closed: false,
            interpolate: true,
            ghost_spacing: Self::DEFAULT_GHOST_SPACING,
            tolerance: Tolerance::default(),
        }
    }
}

impl Validate for SplineOptions {
    fn validate(&self) -> Result<()> {
        if !(self.ghost_spacing > 0.0 && self.ghost_spacing < 0.5) {
            return Err(CrvError::InvalidInput(format!(
                "ghost knot spacing must lie in (0, 0.5), got {}",
                self.ghost_spacing
            )));
        }
        if !self.tolerance.is_well_formed() {
            return Err(CrvError::InvalidInput(format!(
                "ill-formed tolerance: {:?}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// A piecewise-quadratic spline.
///
/// With control points `a[0..=n]` and knots `U[0..=n+3]`, interval `i` in
/// `2..=n` carries the polynomial
/// `a[i] * rising[i] + a[i-1] * middle[i-1] + a[i-2] * falling[i-2]`.
/// Closed splines wrap the first two control points around to the end and
/// use uniform knots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spline {
    control_points: Vec<Point2>,
    knots: Vec<f64>,
    /// `pieces[i - 2]` is the polynomial of interval `i`.
    pieces: Vec<Polynomial<Point2>>,
    closed: bool,
    tolerance: Tolerance,
}

impl Spline {
    pub fn new(points: Vec<Point2>, options: &SplineOptions) -> Result<Self> {
        options.validate()?;
        if points.len() < 3 {
            return Err(CrvError::InvalidInput(format!(
                "spline needs at least 3 points, got {}",
                points.len()
            )));
        }
        check_finite(&points)?;

        let mut control = points.clone();
        if options.closed {
            control.push(points[0]);
            control.push(points[1]);
        }
        let n = control.len() - 1;

        let knots = if options.closed {
            closed_knots(n)
        } else {
            open_knots(n, options.ghost_spacing)
        };
        let basis = QuadraticBasis::new(&knots, n);

        if options.interpolate {
            control = if options.closed {
                interpolate_closed(&basis, &knots, &points)?
            } else {
                interpolate_open(&basis, &knots, &points)?
            };
        }

        let pieces = (2..=n)
            .map(|i| {
                &(&basis.rising(i).weighted(control[i])
                    + &basis.middle(i - 1).weighted(control[i - 1]))
                    + &basis.falling(i - 2).weighted(control[i - 2])
            })
            .collect::<Vec<_>>();

        log::debug!(
            "spline: {} points, closed={}, interpolated={}, {} intervals",
            points.len(),
            options.closed,
            options.interpolate,
            pieces.len()
        );

        Ok(Self {
            control_points: control,
            knots,
            pieces,
            closed: options.closed,
            tolerance: options.tolerance,
        })
    }

    /// Control points after wrap-around and interpolation.
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn interval_count(&self) -> usize {
        self.pieces.len()
    }

    /// Index of the last control point.
    fn n(&self) -> usize {
        self.control_points.len() - 1
    }

    fn domain(&self) -> (f64, f64) {
        (self.knots[2], self.knots[self.n() + 1])
    }

    /// Map `t` in `[0, 1]` into the knot domain.
    fn convert(&self, t: f64) -> f64 {
        let (lo, hi) = self.domain();
        lo + t * (hi - lo)
    }

    fn piece(&self, i: usize) -> &Polynomial<Point2> {
        &self.pieces[i - 2]
    }

    /// Evaluate interval `i` at knot parameter `u`.
    fn spline(&self, i: usize, u: f64, order: usize) -> Point2 {
        self.piece(i).eval_derivative(u, order)
    }

    /// Parameters `t` at which the construction points are reproduced when
    /// the spline was built with interpolation, one per input point.
    pub fn data_parameters(&self) -> Vec<f64> {
        let (lo, hi) = self.domain();
        let to_t = |u: f64| (u - lo) / (hi - lo);
        let n = self.n();
        if self.closed {
            let count = n - 1;
            (0..count)
                .map(|k| to_t(midpoint(&self.knots, closed_row_interval(k, count))))
                .collect()
        } else {
            (0..=n)
                .map(|i| match i {
                    0 => 0.0,
                    i if i == n => 1.0,
                    i => to_t(midpoint(&self.knots, i + 1)),
                })
                .collect()
        }
    }

    /// Derivative of order 0, 1 or 2 with respect to `t`. Other orders
    /// evaluate the position.
    ///
    /// Parameters outside `[0, 1]` are clamped to the domain ends.
    pub fn evaluate_derivative(&self, t: f64, order: usize) -> Vector2 {
        let order = if order > 2 { 0 } else { order };
        let (lo, hi) = self.domain();
        let u = self.convert(t).clamp(lo, hi);
        let i = find_interval(&self.knots, self.n(), u);
        self.spline(i, u, order) * (hi - lo).powi(order as i32)
    }

    /// Radius estimate for interval `i` over the knot range `[u1, u2]`.
    ///
    /// Uses the point where the speed of the quadratic piece is smallest,
    /// clamped into the range; the squared speed over the acceleration
    /// there bounds the radius from below.
    fn piece_curvature(&self, i: usize, u1: f64, u2: f64) -> f64 {
        let p = self.piece(i);
        let a = p.coeff(2);
        let b = p.coeff(1);
        if a.length() == 0.0 {
            return f64::INFINITY;
        }

        let mut u = -a.dot(b) / (2.0 * a.dot(a));
        if u1 > u {
            u = u1;
        } else if u2 < u {
            u = u2;
        }

        let pp = self.spline(i, u, 1);
        let ps = self.spline(i, u, 2);
        if ps.length() == 0.0 {
            return f64::INFINITY;
        }
        pp.length_squared() / ps.length()
    }

    /// Whether the chord over `[u1, u2]` of interval `i` is within `err`.
    fn approx(&self, i: usize, u1: f64, u2: f64, err: f64) -> bool {
        let chord = (self.spline(i, u2, 0) - self.spline(i, u1, 0)).length();
        let chord = self.tolerance.snap_chord(chord);
        let radius = self.piece_curvature(i, u1, u2);
        let accepted = rectify::sagitta_accepts(chord, radius, err);
        log::trace!(
            "spline interval {} [{}, {}]: chord={} radius={} accepted={}",
            i,
            u1,
            u2,
            chord,
            radius,
            accepted
        );
        accepted
    }

    fn rectify_interval(&self, acc: &mut Vec<Point2>, i: usize, u1: f64, u2: f64, err: f64) {
        if self.approx(i, u1, u2, err) {
            acc.push(self.spline(i, u2, 0));
        } else {
            let u = 0.5 * (u1 + u2);
            self.rectify_interval(acc, i, u1, u, err);
            self.rectify_interval(acc, i, u, u2, err);
        }
    }
}

impl private::Sealed for Spline {}

impl Curve for Spline {
    fn name(&self) -> &'static str {
        "spline"
    }

    fn evaluate(&self, t: f64) -> Point2 {
        self.evaluate_derivative(t, 0)
    }

    fn rectify_cumul(&self, acc: &mut Vec<Point2>, err: f64) -> Result<()> {
        for i in 2..=self.n() {
            self.rectify_interval(acc, i, self.knots[i], self.knots[i + 1], err);
        }
        Ok(())
    }

    fn grad(&self, t: f64) -> Option<Vector2> {
        let d = self.evaluate_derivative(t, 1);
        (d.length() > 0.0).then_some(d)
    }

    fn curvature(&self, t1: f64, t2: f64) -> f64 {
        let (u1, u2) = (self.convert(t1.min(t2)), self.convert(t1.max(t2)));
        let n = self.n();
        let first = find_interval(&self.knots, n, u1);
        let last = find_interval(&self.knots, n, u2);
        (first..=last)
            .map(|i| self.piece_curvature(i, u1, u2))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Interval whose midpoint carries row `k` of a closed system with `count`
/// unknowns; row `k` is centred on control point `k`.
fn closed_row_interval(k: usize, count: usize) -> usize {
    if k == 0 {
        count + 1
    } else {
        k + 1
    }
}

/// Control points of an open spline through `data`.
///
/// Row 0 samples the domain start, row `n` the domain end and row `i`
/// the midpoint of interval `i + 1`.
fn interpolate_open(basis: &QuadraticBasis, knots: &[f64], data: &[Point2]) -> Result<Vec<Point2>> {
    let n = data.len() - 1;
    let mut sub = vec![0.0; n + 1];
    let mut diag = vec![0.0; n + 1];
    let mut sup = vec![0.0; n + 1];

    diag[0] = basis.value(0, knots[2]);
    sup[0] = basis.value(1, knots[2]);
    for i in 1..n {
        let u = midpoint(knots, i + 1);
        sub[i] = basis.value(i - 1, u);
        diag[i] = basis.value(i, u);
        sup[i] = basis.value(i + 1, u);
    }
    sub[n] = basis.value(n - 1, knots[n + 1]);
    diag[n] = basis.value(n, knots[n + 1]);

    solve_tridiagonal(&sub, &diag, &sup, data)
}

/// Control points of a closed spline through `data`, wrap points included.
fn interpolate_closed(
    basis: &QuadraticBasis,
    knots: &[f64],
    data: &[Point2],
) -> Result<Vec<Point2>> {
    let count = data.len();
    let mut sub = vec![0.0; count];
    let mut diag = vec![0.0; count];
    let mut sup = vec![0.0; count];

    for k in 0..count {
        let j = closed_row_interval(k, count);
        let u = midpoint(knots, j);
        sub[k] = basis.value(j - 2, u);
        diag[k] = basis.value(j - 1, u);
        sup[k] = basis.value(j, u);
    }

    let top_right = sub[0];
    let bottom_left = sup[count - 1];
    let mut x = solve_cyclic_tridiagonal(&sub, &diag, &sup, top_right, bottom_left, data)?;
    x.push(x[0]);
    x.push(x[1]);
    Ok(x)
}
