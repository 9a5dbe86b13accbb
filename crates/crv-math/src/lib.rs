pub mod frame;
pub mod polynomial;
pub mod tridiag;

pub use glam::{dvec2, DAffine2, DMat2, DMat3, DVec2, DVec3};
pub use frame::{singular_values, Frame};
pub use polynomial::{Coefficient, Polynomial};
pub use tridiag::{solve_cyclic_tridiagonal, solve_tridiagonal};

pub type Point2 = DVec2;
pub type Vector2 = DVec2;
