//! The curve contract and its implementations.
//!
//! Every curve maps a normalized parameter `t` in `[0, 1]` to a planar point
//! and can rectify itself into a polyline whose chords stay within a given
//! error of the true curve. Curves are immutable once built and shared
//! through [`CurveRef`] handles, so one curve can sit inside several
//! composites at once.

mod arc;
mod compound;
mod inverted;
mod poly_segment;
mod segment;
mod spline;
mod transformed;

use std::fmt;
use std::ops::{Deref, Mul};
use std::sync::Arc;

use crv_core::{CrvError, Result};
use crv_math::{Frame, Point2, Vector2};

use crate::rectify;

pub use arc::EllipticArc;
pub use compound::CompoundCurve;
pub use inverted::InvertedCurve;
pub use poly_segment::PolySegment;
pub use segment::Segment;
pub use spline::{Spline, SplineOptions};
pub use transformed::TransformedCurve;

mod private {
    pub trait Sealed {}
}

/// Trait for parametric planar curves over `[0, 1]`.
///
/// The set of implementors is closed: segments, poly-segments, splines,
/// elliptic arcs, and the three composites.
pub trait Curve: private::Sealed + fmt::Debug + Send + Sync {
    /// Short variant name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Evaluate the curve at parameter `t`.
    fn evaluate(&self, t: f64) -> Point2;

    /// Number of components, used to proportion parameter ranges in
    /// concatenations.
    fn nr_components(&self) -> usize {
        1
    }

    /// Append the rectification of the curve to `acc`.
    ///
    /// The point at `t = 0` is not appended; the caller seeds it. The last
    /// appended point is the curve's end point.
    fn rectify_cumul(&self, acc: &mut Vec<Point2>, err: f64) -> Result<()>;

    /// First derivative with respect to `t`, `None` where it is unavailable
    /// or degenerate.
    fn grad(&self, _t: f64) -> Option<Vector2> {
        None
    }

    /// Lower estimate of the radius of curvature over `[t1, t2]`;
    /// `f64::INFINITY` where the curve is locally straight.
    fn curvature(&self, _t1: f64, _t2: f64) -> f64 {
        f64::INFINITY
    }

    /// Parameter step from `t` that keeps chord errors around `err`.
    fn bound(&self, t: f64, err: f64) -> f64 {
        rectify::step_bound(self.grad(t), err)
    }

    /// Rectify the curve, without the seed point at `t = 0`.
    fn rectify(&self, err: f64) -> Result<Vec<Point2>> {
        rectify::check_tolerance(err)?;
        let mut acc = Vec::new();
        self.rectify_cumul(&mut acc, err)?;
        log::debug!(
            "{}: rectified at err={} into {} points",
            self.name(),
            err,
            acc.len()
        );
        Ok(acc)
    }

    /// Rectify the curve into a full polyline starting at `evaluate(0)`.
    fn polyline(&self, err: f64) -> Result<Vec<Point2>> {
        rectify::check_tolerance(err)?;
        let mut acc = vec![self.evaluate(0.0)];
        self.rectify_cumul(&mut acc, err)?;
        log::debug!(
            "{}: polyline at err={} has {} points",
            self.name(),
            err,
            acc.len()
        );
        Ok(acc)
    }
}

/// Shared, immutable handle to a curve.
#[derive(Debug, Clone)]
pub struct CurveRef(Arc<dyn Curve>);

impl CurveRef {
    pub fn new<C: Curve + 'static>(curve: C) -> Self {
        Self(Arc::new(curve))
    }

    /// Whether two handles point to the same curve.
    pub fn ptr_eq(&self, other: &CurveRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for CurveRef {
    type Target = dyn Curve;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// `c1 * c2` concatenates two curves.
impl Mul for CurveRef {
    type Output = CurveRef;

    fn mul(self, rhs: CurveRef) -> CurveRef {
        concat(self, rhs)
    }
}

impl Mul for &CurveRef {
    type Output = CurveRef;

    fn mul(self, rhs: &CurveRef) -> CurveRef {
        concat(self.clone(), rhs.clone())
    }
}

/// Straight segment from `p1` to `p2`.
pub fn segment(p1: Point2, p2: Point2) -> CurveRef {
    CurveRef::new(Segment::new(p1, p2))
}

/// Consecutive straight segments through `points` (at least two).
pub fn poly_segment(points: Vec<Point2>) -> Result<CurveRef> {
    Ok(CurveRef::new(PolySegment::new(points)?))
}

/// Quadratic spline through or near `points` (at least three).
pub fn spline(points: Vec<Point2>, close: bool, interpol: bool) -> Result<CurveRef> {
    let options = SplineOptions::default().closed(close).interpolate(interpol);
    spline_with(points, &options)
}

pub fn spline_with(points: Vec<Point2>, options: &SplineOptions) -> Result<CurveRef> {
    Ok(CurveRef::new(Spline::new(points, options)?))
}

/// Elliptic arc; `e1` and `e2` are the start and end angles in turns.
pub fn arc(center: Point2, r1: f64, r2: f64, alpha: f64, e1: f64, e2: f64) -> CurveRef {
    CurveRef::new(EllipticArc::new(center, r1, r2, alpha, e1, e2))
}

/// Concatenation of `c1` followed by `c2`; continuity is the caller's concern.
pub fn concat(c1: CurveRef, c2: CurveRef) -> CurveRef {
    CurveRef::new(CompoundCurve::new(c1, c2))
}

/// The curve traversed backwards.
pub fn invert(c: CurveRef) -> CurveRef {
    CurveRef::new(InvertedCurve::new(c))
}

/// The curve mapped through `frame`.
pub fn transform(frame: Frame, c: CurveRef) -> CurveRef {
    CurveRef::new(TransformedCurve::new(frame, c))
}

/// The curve mapped through the inverse of `frame`.
pub fn transform_inverse(frame: Frame, c: CurveRef) -> Result<CurveRef> {
    let inverse = frame
        .inverse()
        .ok_or_else(|| CrvError::Geometry("frame is not invertible".into()))?;
    Ok(transform(inverse, c))
}

/// Reject control data with NaN or infinite coordinates.
fn check_finite(points: &[Point2]) -> Result<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(i) => Err(CrvError::Geometry(format!(
            "control point {} is not finite: {:?}",
            i, points[i]
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crv_math::dvec2;

    #[test]
    fn test_handles_share_curve() {
        let c = segment(dvec2(0.0, 0.0), dvec2(1.0, 0.0));
        let d = c.clone();
        assert!(c.ptr_eq(&d));
        assert!(!c.ptr_eq(&segment(dvec2(0.0, 0.0), dvec2(1.0, 0.0))));
    }

    #[test]
    fn test_mul_concatenates() {
        let a = segment(dvec2(0.0, 0.0), dvec2(1.0, 0.0));
        let b = segment(dvec2(1.0, 0.0), dvec2(1.0, 1.0));
        let c = &a * &b;
        assert_eq!(c.name(), "compound");
        assert_eq!(c.nr_components(), 2);
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        let c = segment(dvec2(0.0, 0.0), dvec2(1.0, 0.0));
        assert!(matches!(c.rectify(0.0), Err(CrvError::InvalidTolerance(_))));
        assert!(matches!(c.polyline(f64::NAN), Err(CrvError::InvalidTolerance(_))));
    }

    #[test]
    fn test_transform_inverse_requires_invertible_frame() {
        let c = segment(dvec2(0.0, 0.0), dvec2(1.0, 0.0));
        let collapsed = Frame::scaling(dvec2(0.0, 1.0));
        assert!(matches!(
            transform_inverse(collapsed, c.clone()),
            Err(CrvError::Geometry(_))
        ));

        let shift = Frame::translation(dvec2(2.0, 3.0));
        let back = transform_inverse(shift, c).unwrap();
        assert!((back.evaluate(1.0) - dvec2(-1.0, -3.0)).length() < 1e-12);
    }

    #[test]
    fn test_check_finite() {
        assert!(check_finite(&[dvec2(0.0, 1.0)]).is_ok());
        assert!(check_finite(&[dvec2(0.0, 1.0), dvec2(f64::NAN, 0.0)]).is_err());
    }
}
