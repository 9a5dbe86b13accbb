//! Low-degree polynomials with scalar or vector coefficients.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A coefficient type: `f64` for scalar polynomials, `DVec2` for planar ones.
pub trait Coefficient: Copy + Default + Add<Output = Self> + Mul<f64, Output = Self> {}

impl<T> Coefficient for T where T: Copy + Default + Add<Output = T> + Mul<f64, Output = T> {}

/// A polynomial stored by ascending degree: `coeffs[k]` multiplies `u^k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial<C> {
    coeffs: Vec<C>,
}

impl<C: Coefficient> Polynomial<C> {
    pub fn new(coeffs: Vec<C>) -> Self {
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn coeffs(&self) -> &[C] {
        &self.coeffs
    }

    /// Degree of the stored representation (trailing zeros are not stripped).
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Coefficient of `u^k`, zero past the stored degree.
    pub fn coeff(&self, k: usize) -> C {
        self.coeffs.get(k).copied().unwrap_or_default()
    }

    /// Evaluate at `u` (Horner scheme).
    pub fn eval(&self, u: f64) -> C {
        self.eval_derivative(u, 0)
    }

    /// Evaluate the `order`-th derivative at `u`.
    pub fn eval_derivative(&self, u: f64, order: usize) -> C {
        let mut acc = C::default();
        for k in (order..self.coeffs.len()).rev() {
            acc = acc * u + self.coeffs[k] * falling_factorial(k, order);
        }
        acc
    }
}

impl Polynomial<f64> {
    /// Scale a scalar polynomial by a vector weight, giving a vector polynomial.
    pub fn weighted<V: Coefficient>(&self, w: V) -> Polynomial<V> {
        Polynomial {
            coeffs: self.coeffs.iter().map(|&c| w * c).collect(),
        }
    }
}

impl<C: Coefficient> Default for Polynomial<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: Coefficient> Add for Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<C: Coefficient> Add for &Polynomial<C> {
    type Output = Polynomial<C>;

    fn add(self, rhs: Self) -> Self::Output {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len).map(|k| self.coeff(k) + rhs.coeff(k)).collect();
        Polynomial { coeffs }
    }
}

/// `k * (k-1) * ... * (k-order+1)`
fn falling_factorial(k: usize, order: usize) -> f64 {
    ((k + 1 - order)..=k).fold(1.0, |acc, j| acc * j as f64)
}
