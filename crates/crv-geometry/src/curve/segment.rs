//! Line segment curve.

use crv_core::Result;
use crv_math::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use super::{private, Curve};

/// A line segment from `start` to `end`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }
}

impl private::Sealed for Segment {}

impl Curve for Segment {
    fn name(&self) -> &'static str {
        "segment"
    }

    fn evaluate(&self, t: f64) -> Point2 {
        self.start + t * (self.end - self.start)
    }

    /// A straight line needs only its end point, whatever the tolerance.
    fn rectify_cumul(&self, acc: &mut Vec<Point2>, _err: f64) -> Result<()> {
        acc.push(self.end);
        Ok(())
    }

    fn grad(&self, _t: f64) -> Option<Vector2> {
        let d = self.end - self.start;
        (d != Vector2::ZERO).then_some(d)
    }
}
