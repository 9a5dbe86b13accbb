//! Concatenation of two curves.

use crv_core::Result;
use crv_math::{Point2, Vector2};

use super::{private, Curve, CurveRef};

/// `first` followed by `second`.
///
/// The parameter range is split in proportion to the component counts of
/// the two parts, so a concatenation of `n` single-component curves gives
/// each of them `1/n` of `[0, 1]`.
#[derive(Debug, Clone)]
pub struct CompoundCurve {
    first: CurveRef,
    second: CurveRef,
    n1: usize,
    n2: usize,
}

impl CompoundCurve {
    pub fn new(first: CurveRef, second: CurveRef) -> Self {
        let n1 = first.nr_components();
        let n2 = second.nr_components();
        Self {
            first,
            second,
            n1,
            n2,
        }
    }

    pub fn first(&self) -> &CurveRef {
        &self.first
    }

    pub fn second(&self) -> &CurveRef {
        &self.second
    }

    fn total(&self) -> f64 {
        (self.n1 + self.n2) as f64
    }

    /// Parameter of the split point.
    fn split(&self) -> f64 {
        self.n1 as f64 / self.total()
    }

    fn to_first(&self, t: f64) -> f64 {
        t * self.total() / self.n1 as f64
    }

    fn to_second(&self, t: f64) -> f64 {
        (t * self.total() - self.n1 as f64) / self.n2 as f64
    }
}

impl private::Sealed for CompoundCurve {}

impl Curve for CompoundCurve {
    fn name(&self) -> &'static str {
        "compound"
    }

    fn nr_components(&self) -> usize {
        self.n1 + self.n2
    }

    fn evaluate(&self, t: f64) -> Point2 {
        if t <= self.split() {
            self.first.evaluate(self.to_first(t))
        } else {
            self.second.evaluate(self.to_second(t))
        }
    }

    fn rectify_cumul(&self, acc: &mut Vec<Point2>, err: f64) -> Result<()> {
        self.first.rectify_cumul(acc, err)?;
        self.second.rectify_cumul(acc, err)
    }

    fn grad(&self, t: f64) -> Option<Vector2> {
        if t <= self.split() {
            self.first
                .grad(self.to_first(t))
                .map(|g| g * self.total() / self.n1 as f64)
        } else {
            self.second
                .grad(self.to_second(t))
                .map(|g| g * self.total() / self.n2 as f64)
        }
    }

    /// Smallest radius over the parts the range touches.
    fn curvature(&self, t1: f64, t2: f64) -> f64 {
        let (lo, hi) = (t1.min(t2), t1.max(t2));
        let split = self.split();
        let mut radius = f64::INFINITY;
        if lo <= split {
            radius = radius.min(
                self.first
                    .curvature(self.to_first(lo), self.to_first(hi.min(split))),
            );
        }
        if hi >= split {
            radius = radius.min(
                self.second
                    .curvature(self.to_second(lo.max(split)), self.to_second(hi)),
            );
        }
        radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{arc, poly_segment, segment};
    use crv_math::dvec2;

    #[test]
    fn test_two_segments() {
        let a = dvec2(0.0, 0.0);
        let b = dvec2(1.0, 0.0);
        let c = dvec2(1.0, 1.0);
        let curve = segment(a, b) * segment(b, c);

        assert_eq!(curve.rectify(0.1).unwrap(), vec![b, c]);
        assert_eq!(curve.polyline(0.1).unwrap(), vec![a, b, c]);
        assert!((curve.evaluate(0.25) - dvec2(0.5, 0.0)).length() < 1e-12);
        assert!((curve.evaluate(0.75) - dvec2(1.0, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_split_follows_component_counts() {
        let poly = poly_segment(vec![
            dvec2(0.0, 0.0),
            dvec2(1.0, 0.0),
            dvec2(2.0, 0.0),
        ])
        .unwrap();
        let tail = segment(dvec2(2.0, 0.0), dvec2(2.0, 1.0));
        let curve = CompoundCurve::new(poly, tail);

        assert_eq!(curve.nr_components(), 3);
        // Each of the three components gets a third of the range
        assert!((curve.evaluate(1.0 / 3.0) - dvec2(1.0, 0.0)).length() < 1e-12);
        assert!((curve.evaluate(2.0 / 3.0) - dvec2(2.0, 0.0)).length() < 1e-12);
        assert!((curve.evaluate(5.0 / 6.0) - dvec2(2.0, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_grad_rescaled() {
        let curve = CompoundCurve::new(
            segment(dvec2(0.0, 0.0), dvec2(1.0, 0.0)),
            segment(dvec2(1.0, 0.0), dvec2(1.0, 3.0)),
        );
        assert_eq!(curve.grad(0.2), Some(dvec2(2.0, 0.0)));
        assert_eq!(curve.grad(0.7), Some(dvec2(0.0, 6.0)));
    }

    #[test]
    fn test_curvature_over_touched_parts() {
        let line = segment(dvec2(-1.0, 0.0), dvec2(1.0, 0.0));
        let circle = arc(dvec2(0.0, 0.0), 1.0, 1.0, 0.0, 0.0, 0.5);
        let curve = CompoundCurve::new(line, circle);

        assert!(curve.curvature(0.0, 0.4).is_infinite());
        assert!((curve.curvature(0.0, 1.0) - 1.0).abs() < 1e-12);
        assert!((curve.curvature(0.6, 0.9) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nested_concatenation() {
        let pts = [
            dvec2(0.0, 0.0),
            dvec2(1.0, 0.0),
            dvec2(1.0, 1.0),
            dvec2(0.0, 1.0),
        ];
        let curve = segment(pts[0], pts[1]) * segment(pts[1], pts[2]) * segment(pts[2], pts[3]);
        assert_eq!(curve.nr_components(), 3);
        assert_eq!(curve.polyline(0.01).unwrap(), pts.to_vec());
    }
}
