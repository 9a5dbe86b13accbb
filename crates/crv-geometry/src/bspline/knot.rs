//! Knot vector utilities for the rectified splines.
//!
//! A spline over control points `a[0..=n]` uses a knot vector `U[0..=n+3]`.
//! Interval `i` is `[U[i], U[i+1])` and the spline is defined on intervals
//! `2..=n`, i.e. on the domain `[U[2], U[n+1]]`.

/// Knot vector for an open spline with near-clamped ends.
///
/// The first three and last three knots are `ghost` apart instead of being
/// repeated, which keeps every knot difference non-zero while pulling the
/// curve ends close to the end control points. Interior knots are unit-spaced.
pub fn open_knots(n: usize, ghost: f64) -> Vec<f64> {
    let mut knots = Vec::with_capacity(n + 4);
    let mut x = 0.0;

    for _ in 0..3 {
        knots.push(x);
        x += ghost;
    }
    x += 1.0 - ghost;
    for _ in 3..=n {
        knots.push(x);
        x += 1.0;
    }
    for _ in 0..3 {
        knots.push(x);
        x += ghost;
    }

    knots
}

/// Uniform knot vector `0, 1, ..., n+3` for a periodic spline.
pub fn closed_knots(n: usize) -> Vec<f64> {
    (0..n + 4).map(|i| i as f64).collect()
}

/// Find the spline interval containing `u`.
///
/// Returns `i` in `2..=n` such that `knots[i] <= u < knots[i+1]`. Values
/// before the domain map to the first interval, values at or past
/// `knots[n+1]` to the last one.
pub fn find_interval(knots: &[f64], n: usize, u: f64) -> usize {
    (2..n).find(|&i| u < knots[i + 1]).unwrap_or(n)
}

/// Midpoint of interval `i`.
pub fn midpoint(knots: &[f64], i: usize) -> f64 {
    0.5 * (knots[i] + knots[i + 1])
}
