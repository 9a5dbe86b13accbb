//! Quadratic B-spline building blocks: knot vectors and local basis polynomials.

pub mod basis;
pub mod knot;

pub use basis::QuadraticBasis;
pub use knot::{closed_knots, find_interval, midpoint, open_knots};
