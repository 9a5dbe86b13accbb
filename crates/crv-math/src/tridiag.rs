//! Tridiagonal linear solvers with scalar or point-valued unknowns.
//!
//! Row `i` of the system reads
//! `sub[i] * x[i-1] + diag[i] * x[i] + sup[i] * x[i+1] = rhs[i]`.
//! `sub[0]` and `sup[n-1]` are ignored by the open solver; the cyclic solver
//! takes the two wrap-around coefficients separately.

use std::ops::{Add, Mul, Sub};

use crv_core::{CrvError, Result};

/// An unknown type: anything closed under addition and scaling by `f64`.
pub trait Unknown: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self> {}

impl<T> Unknown for T where T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T> {}

fn check_lengths(n: usize, sub: &[f64], diag: &[f64], sup: &[f64]) -> Result<()> {
    if sub.len() != n || diag.len() != n || sup.len() != n {
        return Err(CrvError::InvalidInput(format!(
            "tridiagonal system with {} unknowns got {}/{}/{} coefficients",
            n,
            sub.len(),
            diag.len(),
            sup.len()
        )));
    }
    Ok(())
}

fn is_zero_pivot(p: f64) -> bool {
    !p.is_finite() || p.abs() < f64::MIN_POSITIVE
}

/// Solve an open tridiagonal system (Thomas algorithm, no pivoting).
///
/// The systems built by spline interpolation are diagonally dominant, so
/// elimination without pivoting is stable for them.
pub fn solve_tridiagonal<T: Unknown>(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[T],
) -> Result<Vec<T>> {
    let n = rhs.len();
    check_lengths(n, sub, diag, sup)?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c_prime = vec![0.0; n];
    let mut x: Vec<T> = Vec::with_capacity(n);

    let mut denom = diag[0];
    if is_zero_pivot(denom) {
        return Err(CrvError::SingularSystem { row: 0 });
    }
    c_prime[0] = sup[0] / denom;
    x.push(rhs[0] * (1.0 / denom));

    for i in 1..n {
        denom = diag[i] - sub[i] * c_prime[i - 1];
        if is_zero_pivot(denom) {
            return Err(CrvError::SingularSystem { row: i });
        }
        if i + 1 < n {
            c_prime[i] = sup[i] / denom;
        }
        let d = (rhs[i] - x[i - 1] * sub[i]) * (1.0 / denom);
        x.push(d);
    }

    // Back substitution
    for i in (0..n - 1).rev() {
        x[i] = x[i] - x[i + 1] * c_prime[i];
    }

    Ok(x)
}

/// Solve a cyclic tridiagonal system.
///
/// `top_right` is the row-0 coefficient on `x[n-1]`, `bottom_left` the
/// row-(n-1) coefficient on `x[0]`. Reduced to two open solves via the
/// Sherman-Morrison formula; needs at least three unknowns.
pub fn solve_cyclic_tridiagonal<T: Unknown>(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    top_right: f64,
    bottom_left: f64,
    rhs: &[T],
) -> Result<Vec<T>> {
    let n = rhs.len();
    check_lengths(n, sub, diag, sup)?;
    if n < 3 {
        return Err(CrvError::InvalidInput(format!(
            "cyclic tridiagonal system needs at least 3 unknowns, got {}",
            n
        )));
    }

    let gamma = -diag[0];
    if is_zero_pivot(gamma) {
        return Err(CrvError::SingularSystem { row: 0 });
    }

    let mut modified = diag.to_vec();
    modified[0] = diag[0] - gamma;
    modified[n - 1] = diag[n - 1] - bottom_left * top_right / gamma;

    let mut x = solve_tridiagonal(sub, &modified, sup, rhs)?;

    let mut u = vec![0.0; n];
    u[0] = gamma;
    u[n - 1] = bottom_left;
    let z = solve_tridiagonal(sub, &modified, sup, &u)?;

    let denom = 1.0 + z[0] + top_right * z[n - 1] / gamma;
    if is_zero_pivot(denom) {
        return Err(CrvError::SingularSystem { row: n - 1 });
    }
    let fact = (x[0] + x[n - 1] * (top_right / gamma)) * (1.0 / denom);

    for (xi, &zi) in x.iter_mut().zip(&z) {
        *xi = *xi - fact * zi;
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec2;

    fn residual_open(sub: &[f64], diag: &[f64], sup: &[f64], x: &[f64], i: usize) -> f64 {
        let mut r = diag[i] * x[i];
        if i > 0 {
            r += sub[i] * x[i - 1];
        }
        if i + 1 < x.len() {
            r += sup[i] * x[i + 1];
        }
        r
    }

    #[test]
    fn test_open_scalar() {
        let sub = [0.0, 1.0, 1.0, 1.0];
        let diag = [4.0, 4.0, 4.0, 4.0];
        let sup = [1.0, 1.0, 1.0, 0.0];
        let rhs = [5.0, 6.0, 6.0, 5.0];
        let x = solve_tridiagonal(&sub, &diag, &sup, &rhs).unwrap();
        for (i, &r) in rhs.iter().enumerate() {
            assert_relative_eq!(residual_open(&sub, &diag, &sup, &x, i), r, epsilon = 1e-12);
        }
        for xi in x {
            assert_relative_eq!(xi, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_open_points() {
        let sub = [0.0, 0.125, 0.125];
        let diag = [0.75, 0.75, 0.75];
        let sup = [0.125, 0.125, 0.0];
        let expected = [DVec2::new(1.0, 2.0), DVec2::new(-1.0, 0.5), DVec2::new(3.0, 3.0)];
        let rhs = [
            expected[0] * 0.75 + expected[1] * 0.125,
            expected[0] * 0.125 + expected[1] * 0.75 + expected[2] * 0.125,
            expected[1] * 0.125 + expected[2] * 0.75,
        ];
        let x = solve_tridiagonal(&sub, &diag, &sup, &rhs).unwrap();
        for (xi, ei) in x.iter().zip(&expected) {
            assert!((*xi - *ei).length() < 1e-12, "got {:?}, expected {:?}", xi, ei);
        }
    }

    #[test]
    fn test_cyclic_points() {
        // Periodic uniform quadratic B-spline midpoint weights.
        let n = 5;
        let sub = vec![0.125; n];
        let diag = vec![0.75; n];
        let sup = vec![0.125; n];
        let expected: Vec<DVec2> = (0..n)
            .map(|i| DVec2::new(i as f64, (i * i) as f64 * 0.5))
            .collect();
        let rhs: Vec<DVec2> = (0..n)
            .map(|i| {
                expected[(i + n - 1) % n] * 0.125
                    + expected[i] * 0.75
                    + expected[(i + 1) % n] * 0.125
            })
            .collect();

        let x = solve_cyclic_tridiagonal(&sub, &diag, &sup, 0.125, 0.125, &rhs).unwrap();
        for (xi, ei) in x.iter().zip(&expected) {
            assert!((*xi - *ei).length() < 1e-10, "got {:?}, expected {:?}", xi, ei);
        }
    }

    #[test]
    fn test_singular() {
        let result = solve_tridiagonal(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]);
        assert!(matches!(result, Err(CrvError::SingularSystem { row: 0 })));
    }

    #[test]
    fn test_length_mismatch() {
        let result = solve_tridiagonal(&[0.0], &[1.0, 1.0], &[0.0, 0.0], &[1.0, 1.0]);
        assert!(matches!(result, Err(CrvError::InvalidInput(_))));
    }

    #[test]
    fn test_cyclic_too_small() {
        let result =
            solve_cyclic_tridiagonal(&[1.0, 1.0], &[4.0, 4.0], &[1.0, 1.0], 1.0, 1.0, &[1.0, 1.0]);
        assert!(matches!(result, Err(CrvError::InvalidInput(_))));
    }
}
