//! Poly-segment curve.

use crv_core::{CrvError, Result};
use crv_math::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use super::{check_finite, private, Curve};

/// Consecutive line segments through `n + 1` points.
///
/// Each segment takes an equal share of the parameter range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolySegment {
    points: Vec<Point2>,
}

impl PolySegment {
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 2 {
            return Err(CrvError::InvalidInput(format!(
                "poly-segment needs at least 2 points, got {}",
                points.len()
            )));
        }
        check_finite(&points)?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Segment index and local parameter for `t`.
    fn locate(&self, t: f64) -> (usize, f64) {
        let n = self.segment_count() as f64;
        let i = ((n * t).floor().max(0.0) as usize).min(self.segment_count() - 1);
        (i, n * t - i as f64)
    }
}

impl private::Sealed for PolySegment {}

impl Curve for PolySegment {
    fn name(&self) -> &'static str {
        "poly-segment"
    }

    fn nr_components(&self) -> usize {
        self.segment_count()
    }

    fn evaluate(&self, t: f64) -> Point2 {
        let (i, s) = self.locate(t);
        self.points[i].lerp(self.points[i + 1], s)
    }

    fn rectify_cumul(&self, acc: &mut Vec<Point2>, _err: f64) -> Result<()> {
        acc.extend_from_slice(&self.points[1..]);
        Ok(())
    }

    fn grad(&self, t: f64) -> Option<Vector2> {
        let (i, _) = self.locate(t);
        let d = (self.points[i + 1] - self.points[i]) * self.segment_count() as f64;
        (d != Vector2::ZERO).then_some(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crv_math::dvec2;

    fn staircase() -> PolySegment {
        PolySegment::new(vec![
            dvec2(0.0, 0.0),
            dvec2(1.0, 0.0),
            dvec2(1.0, 1.0),
            dvec2(2.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_evaluate_hits_control_points() {
        let poly = staircase();
        assert_eq!(poly.nr_components(), 3);
        assert!((poly.evaluate(0.0) - dvec2(0.0, 0.0)).length() < 1e-12);
        assert!((poly.evaluate(1.0 / 3.0) - dvec2(1.0, 0.0)).length() < 1e-12);
        assert!((poly.evaluate(2.0 / 3.0) - dvec2(1.0, 1.0)).length() < 1e-12);
        assert!((poly.evaluate(1.0) - dvec2(2.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_evaluate_interpolates_locally() {
        let poly = staircase();
        // Halfway along the second segment
        assert!((poly.evaluate(0.5) - dvec2(1.0, 0.5)).length() < 1e-12);
        assert!((poly.evaluate(1.0 / 6.0) - dvec2(0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_rectify_is_tail() {
        let poly = staircase();
        let pts = poly.rectify(0.01).unwrap();
        assert_eq!(pts, poly.points()[1..].to_vec());
        assert_eq!(pts.len(), 3);
    }

    #[test]
    fn test_grad_scaled_by_segment_count() {
        let poly = staircase();
        assert_eq!(poly.grad(0.5), Some(dvec2(0.0, 3.0)));
        assert_eq!(poly.grad(1.0), Some(dvec2(3.0, 0.0)));
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            PolySegment::new(vec![dvec2(0.0, 0.0)]),
            Err(CrvError::InvalidInput(_))
        ));
        assert!(matches!(
            PolySegment::new(vec![dvec2(0.0, 0.0), dvec2(f64::INFINITY, 0.0)]),
            Err(CrvError::Geometry(_))
        ));
    }
}
