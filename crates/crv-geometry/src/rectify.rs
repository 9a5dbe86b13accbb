//! Shared rectification helpers: tolerance checks and the sagitta bound.
//!
//! A chord of length `l` on a circle of radius `R` deviates from the arc by
//! at most about `l^2 / (8R)`. Keeping that under `err` gives the chord
//! bound `l <= 2 * sqrt(2 * R * err)` used by adaptive subdivision, and the
//! angular step `sqrt(2 * err / R) / PI` (in turns) used by fixed stepping.

use std::f64::consts::PI;

use crv_core::{CrvError, Result};
use crv_math::{Point2, Vector2};

/// Reject tolerances that cannot bound a rectification.
pub fn check_tolerance(err: f64) -> Result<()> {
    if err.is_finite() && err > 0.0 {
        Ok(())
    } else {
        Err(CrvError::InvalidTolerance(err))
    }
}

/// Longest chord whose sagitta on a circle of `radius` stays within `err`.
pub fn max_chord(radius: f64, err: f64) -> f64 {
    2.0 * (2.0 * radius * err).sqrt()
}

/// Whether a chord of length `chord` is accurate enough on a curve whose
/// radius of curvature is at least `radius`.
///
/// An infinite radius accepts every chord.
pub fn sagitta_accepts(chord: f64, radius: f64, err: f64) -> bool {
    chord <= max_chord(radius, err)
}

/// Angular step, in turns, that keeps the sagitta on a circle of `radius`
/// within `err`.
pub fn angular_step(radius: f64, err: f64) -> f64 {
    (2.0 * err / radius).sqrt() / PI
}

/// Parameter step from a point with tangent `grad` that moves the curve by
/// about `err`. Infinite when the tangent is unavailable or zero.
pub fn step_bound(grad: Option<Vector2>, err: f64) -> f64 {
    match grad {
        Some(g) if g.length() > 0.0 => err / g.length(),
        _ => f64::INFINITY,
    }
}

/// Distance from `p` to the segment `a`-`b`.
pub fn chord_distance(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return (p - a).length();
    }
    let s = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * s)).length()
}
