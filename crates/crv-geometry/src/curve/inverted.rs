//! A curve traversed backwards.

use crv_core::Result;
use crv_math::{Point2, Vector2};

use super::{private, Curve, CurveRef};

#[derive(Debug, Clone)]
pub struct InvertedCurve {
    inner: CurveRef,
}

impl InvertedCurve {
    pub fn new(inner: CurveRef) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &CurveRef {
        &self.inner
    }
}

impl private::Sealed for InvertedCurve {}

impl Curve for InvertedCurve {
    fn name(&self) -> &'static str {
        "inverted"
    }

    fn nr_components(&self) -> usize {
        self.inner.nr_components()
    }

    fn evaluate(&self, t: f64) -> Point2 {
        self.inner.evaluate(1.0 - t)
    }

    /// Rectify the inner curve forwards, then append it reversed. The inner
    /// end point is this curve's start, so it is left out.
    fn rectify_cumul(&self, acc: &mut Vec<Point2>, err: f64) -> Result<()> {
        let mut forward = vec![self.inner.evaluate(0.0)];
        self.inner.rectify_cumul(&mut forward, err)?;
        acc.extend(forward.into_iter().rev().skip(1));
        Ok(())
    }

    fn grad(&self, t: f64) -> Option<Vector2> {
        self.inner.grad(1.0 - t).map(|g| -g)
    }

    fn curvature(&self, t1: f64, t2: f64) -> f64 {
        self.inner.curvature(1.0 - t2, 1.0 - t1)
    }
}
