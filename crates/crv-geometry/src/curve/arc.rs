//! Elliptic arc curve.

use std::f64::consts::TAU;

use crv_core::{CrvError, Result, Tolerance};
use crv_math::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use super::{private, Curve};
use crate::rectify;

/// An arc of a rotated ellipse.
///
/// Angles are measured in turns. The arc starts at angle `start` and sweeps
/// `extent` turns (negative extents run clockwise); `t` in `[0, 1]` maps
/// linearly onto that sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EllipticArc {
    pub center: Point2,
    pub r1: f64,
    pub r2: f64,
    /// Rotation of the first axis, in radians.
    pub alpha: f64,
    pub start: f64,
    pub extent: f64,
    #[serde(default)]
    pub tolerance: Tolerance,
}

impl EllipticArc {
    /// Arc from angle `e1` to angle `e2` (turns).
    pub fn new(center: Point2, r1: f64, r2: f64, alpha: f64, e1: f64, e2: f64) -> Self {
        Self {
            center,
            r1,
            r2,
            alpha,
            start: e1,
            extent: e2 - e1,
            tolerance: Tolerance::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Unit directions of the two ellipse axes.
    fn axes(&self) -> (Vector2, Vector2) {
        let (s, c) = self.alpha.sin_cos();
        (Vector2::new(c, s), Vector2::new(-s, c))
    }

    /// Point at `offset` turns past the start angle.
    fn at_offset(&self, offset: f64) -> Point2 {
        let (u, v) = self.axes();
        let (s, c) = (TAU * (self.start + offset)).sin_cos();
        self.center + self.r1 * c * u + self.r2 * s * v
    }

    fn radii(&self) -> (f64, f64) {
        (self.r1.abs().min(self.r2.abs()), self.r1.abs().max(self.r2.abs()))
    }

    /// Reject arcs whose center, radii or angles are NaN or infinite; stepping
    /// through an unbounded sweep would never terminate.
    fn check_finite(&self) -> Result<()> {
        let finite = self.center.is_finite()
            && self.r1.is_finite()
            && self.r2.is_finite()
            && self.alpha.is_finite()
            && self.start.is_finite()
            && self.extent.is_finite();
        if finite {
            Ok(())
        } else {
            Err(CrvError::Geometry(format!(
                "arc parameters are not finite: center={:?} r1={} r2={} alpha={} start={} extent={}",
                self.center, self.r1, self.r2, self.alpha, self.start, self.extent
            )))
        }
    }

    /// Fixed angular step, in turns, for tolerance `err`.
    ///
    /// The larger semi-axis bounds the local radius from above, so the step
    /// is conservative everywhere on the ellipse.
    pub fn step(&self, err: f64) -> f64 {
        let (_, hi) = self.radii();
        rectify::angular_step(hi, err)
    }
}

impl private::Sealed for EllipticArc {}

impl Curve for EllipticArc {
    fn name(&self) -> &'static str {
        "arc"
    }

    fn evaluate(&self, t: f64) -> Point2 {
        self.at_offset(t * self.extent)
    }

    fn rectify_cumul(&self, acc: &mut Vec<Point2>, err: f64) -> Result<()> {
        self.check_finite()?;
        let step = self.step(err);
        let total = self.extent.abs();
        let direction = self.extent.signum();

        let mut last = None;
        if step.is_finite() && step > 0.0 {
            let mut k = 1u64;
            loop {
                let s = k as f64 * step;
                if s > total {
                    break;
                }
                acc.push(self.at_offset(direction * s));
                last = Some(s);
                k += 1;
            }
        }
        if last != Some(total) {
            acc.push(self.evaluate(1.0));
        }
        Ok(())
    }

    fn grad(&self, t: f64) -> Option<Vector2> {
        let (u, v) = self.axes();
        let (s, c) = (TAU * (self.start + t * self.extent)).sin_cos();
        let d = TAU * self.extent * (-self.r1 * s * u + self.r2 * c * v);
        (d.length() > 0.0).then_some(d)
    }

    /// Smallest radius of curvature of the full ellipse, at the ends of its
    /// major axis.
    fn curvature(&self, _t1: f64, _t2: f64) -> f64 {
        let (lo, hi) = self.radii();
        if self.tolerance.is_degenerate_radius(lo) {
            f64::INFINITY
        } else {
            lo * lo / hi
        }
    }
}
