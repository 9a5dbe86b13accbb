//! Piecewise-quadratic B-spline basis functions.
//!
//! Basis function `i` is supported on `[U[i], U[i+3])` and made of three
//! quadratic pieces: rising on `[U[i], U[i+1])`, middle on `[U[i+1], U[i+2])`
//! and falling on `[U[i+2], U[i+3])`. Pieces are expressed in the global knot
//! parameter, so they can be summed directly into per-interval polynomials.

use crv_math::Polynomial;

/// The rising, middle and falling pieces of every basis function of a knot vector.
#[derive(Debug, Clone)]
pub struct QuadraticBasis<'a> {
    knots: &'a [f64],
    pieces: Vec<[Polynomial<f64>; 3]>,
}

impl<'a> QuadraticBasis<'a> {
    /// Build basis functions `0..=n` over `knots` (length `n + 4`).
    ///
    /// Knots must be strictly increasing so every knot difference is non-zero.
    pub fn new(knots: &'a [f64], n: usize) -> Self {
        debug_assert!(
            knots.len() >= n + 4,
            "Knot vector too short: {} knots for {} basis functions",
            knots.len(),
            n + 1
        );
        let pieces = (0..=n).map(|i| basis_pieces(knots, i)).collect();
        Self { knots, pieces }
    }

    pub fn rising(&self, i: usize) -> &Polynomial<f64> {
        &self.pieces[i][0]
    }

    pub fn middle(&self, i: usize) -> &Polynomial<f64> {
        &self.pieces[i][1]
    }

    pub fn falling(&self, i: usize) -> &Polynomial<f64> {
        &self.pieces[i][2]
    }

    /// Value of basis function `i` at `u`.
    ///
    /// Zero outside `[U[i], U[i+3])` and for indices past the last function.
    /// Pieces are half-open, so a value exactly on an inner knot belongs to
    /// the piece starting there. A NaN parameter matches no piece and gives zero.
    pub fn value(&self, i: usize, u: f64) -> f64 {
        let Some(pieces) = self.pieces.get(i) else {
            return 0.0;
        };
        let k = self.knots;
        if u >= k[i] && u < k[i + 1] {
            pieces[0].eval(u)
        } else if u >= k[i + 1] && u < k[i + 2] {
            pieces[1].eval(u)
        } else if u >= k[i + 2] && u < k[i + 3] {
            pieces[2].eval(u)
        } else {
            0.0
        }
    }
}

fn basis_pieces(knots: &[f64], i: usize) -> [Polynomial<f64>; 3] {
    let d = |hi: usize, lo: usize| knots[hi] - knots[lo];
    let (u0, u1, u2, u3) = (knots[i], knots[i + 1], knots[i + 2], knots[i + 3]);

    let rising = square(u0, 1.0 / (d(i + 2, i) * d(i + 1, i)));
    let middle = &product(u0, u2, -1.0 / (d(i + 2, i) * d(i + 2, i + 1)))
        + &product(u1, u3, -1.0 / (d(i + 3, i + 1) * d(i + 2, i + 1)));
    let falling = square(u3, 1.0 / (d(i + 3, i + 1) * d(i + 3, i + 2)));

    [rising, middle, falling]
}

/// `scale * (u - root)^2`
fn square(root: f64, scale: f64) -> Polynomial<f64> {
    product(root, root, scale)
}

/// `scale * (u - r1) * (u - r2)`
fn product(r1: f64, r2: f64, scale: f64) -> Polynomial<f64> {
    Polynomial::new(vec![scale * r1 * r2, -scale * (r1 + r2), scale])
}
