//! A curve mapped through a coordinate frame.

use crv_core::{CrvError, Result};
use crv_math::{singular_values, Frame, Point2, Vector2};

use super::{private, Curve, CurveRef};

#[derive(Debug, Clone)]
pub struct TransformedCurve {
    frame: Frame,
    inner: CurveRef,
}

impl TransformedCurve {
    pub fn new(frame: Frame, inner: CurveRef) -> Self {
        Self { frame, inner }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn inner(&self) -> &CurveRef {
        &self.inner
    }
}

impl private::Sealed for TransformedCurve {}

impl Curve for TransformedCurve {
    fn name(&self) -> &'static str {
        "transformed"
    }

    fn nr_components(&self) -> usize {
        self.inner.nr_components()
    }

    fn evaluate(&self, t: f64) -> Point2 {
        self.frame.apply(self.inner.evaluate(t))
    }

    /// Rectify the inner curve at a tolerance scaled down by the frame's
    /// stretch, then map the points.
    ///
    /// Only affine frames keep straight chords straight; projective frames
    /// are rejected.
    fn rectify_cumul(&self, acc: &mut Vec<Point2>, err: f64) -> Result<()> {
        if !self.frame.is_linear() {
            log::warn!(
                "cannot rectify {} curve through a projective frame",
                self.inner.name()
            );
            return Err(CrvError::Unsupported(
                "rectification through a projective frame".into(),
            ));
        }
        let inner_err = self.frame.direct_bound(self.inner.evaluate(0.0), err);
        let mut points = Vec::new();
        self.inner.rectify_cumul(&mut points, inner_err)?;
        acc.extend(points.into_iter().map(|p| self.frame.apply(p)));
        Ok(())
    }

    fn grad(&self, t: f64) -> Option<Vector2> {
        let g = self.inner.grad(t)?;
        let d = self.frame.jacobian(self.inner.evaluate(t)) * g;
        (d.is_finite() && d != Vector2::ZERO).then_some(d)
    }

    /// Under an affine frame the radius shrinks by at most `lo^2 / hi`, with
    /// `lo` and `hi` the singular values of the linear part. Projective frames
    /// report the inner estimate.
    fn curvature(&self, t1: f64, t2: f64) -> f64 {
        let radius = self.inner.curvature(t1, t2);
        match self.frame.linear_part() {
            Some(m) => {
                let (lo, hi) = singular_values(m);
                if hi <= f64::EPSILON {
                    f64::INFINITY
                } else {
                    radius * lo * lo / hi
                }
            }
            None => radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{arc, segment, spline, transform};
    use crate::rectify::chord_distance;
    use crv_math::{dvec2, DMat3, DVec3};
    use std::f64::consts::PI;

    #[test]
    fn test_affine_maps_points() {
        let seg = segment(dvec2(0.0, 0.0), dvec2(1.0, 0.0));
        let frame = Frame::rotation(PI / 2.0).then(&Frame::translation(dvec2(1.0, 1.0)));
        let curve = transform(frame, seg);

        assert_eq!(curve.name(), "transformed");
        let pts = curve.polyline(0.01).unwrap();
        assert_eq!(pts.len(), 2);
        assert!((pts[0] - dvec2(1.0, 1.0)).length() < 1e-12);
        assert!((pts[1] - dvec2(1.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_projective_rejected() {
        let m = DMat3::from_cols(
            DVec3::new(1.0, 0.0, 0.1),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        );
        let frame = Frame::from_projective(m);
        assert!(!frame.is_linear());

        let curve = transform(frame, segment(dvec2(0.0, 0.0), dvec2(1.0, 0.0)));
        assert!(matches!(curve.rectify(0.01), Err(CrvError::Unsupported(_))));
        // Evaluation still works
        let p = curve.evaluate(1.0);
        assert!((p - dvec2(1.0 / 1.1, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_scaled_arc_keeps_error_bound() {
        let circle = arc(dvec2(0.0, 0.0), 1.0, 1.0, 0.0, 0.0, 0.25);
        let curve = TransformedCurve::new(Frame::scaling(dvec2(10.0, 10.0)), circle.clone());
        let err = 0.01;

        let pts = curve.polyline(err).unwrap();
        assert!(pts.len() > circle.polyline(err).unwrap().len());
        for w in pts.windows(2) {
            // Midpoint of the true arc between two consecutive samples
            let a = w[0].y.atan2(w[0].x);
            let b = w[1].y.atan2(w[1].x);
            let m = 0.5 * (a + b);
            let on_curve = dvec2(10.0 * m.cos(), 10.0 * m.sin());
            assert!(chord_distance(on_curve, w[0], w[1]) <= err * 1.01);
        }
    }

    #[test]
    fn test_grad_through_frame() {
        let inner = spline(
            vec![dvec2(0.0, 0.0), dvec2(1.0, 2.0), dvec2(3.0, -1.0), dvec2(4.0, 1.0)],
            false,
            true,
        )
        .unwrap();
        let frame = Frame::rotation(0.7).then(&Frame::scaling(dvec2(2.0, 0.5)));
        let curve = TransformedCurve::new(frame, inner.clone());
        let h = 1e-6;
        for &t in &[0.2, 0.5, 0.8] {
            let g = curve.grad(t).unwrap();
            let fd = (curve.evaluate(t + h) - curve.evaluate(t - h)) / (2.0 * h);
            assert!((g - fd).length() < 1e-4, "grad {:?} vs {:?} at t={}", g, fd, t);
        }
    }

    #[test]
    fn test_curvature_scaling() {
        let circle = arc(dvec2(0.0, 0.0), 1.0, 1.0, 0.0, 0.0, 1.0);
        let uniform = TransformedCurve::new(Frame::scaling(dvec2(3.0, 3.0)), circle.clone());
        assert!((uniform.curvature(0.0, 1.0) - 3.0).abs() < 1e-12);

        let squashed = TransformedCurve::new(Frame::scaling(dvec2(2.0, 1.0)), circle.clone());
        assert!((squashed.curvature(0.0, 1.0) - 0.5).abs() < 1e-12);

        let rotated = TransformedCurve::new(Frame::rotation(1.2), circle);
        assert!((rotated.curvature(0.0, 1.0) - 1.0).abs() < 1e-12);
    }
}
