use crate::{DAffine2, DMat2, DMat3, DVec3, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A planar coordinate frame: an affine map, or a projective one with a
/// perspective component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Frame {
    Affine(DAffine2),
    Projective(DMat3),
}

impl Frame {
    pub fn identity() -> Self {
        Self::Affine(DAffine2::IDENTITY)
    }

    pub fn translation(t: Vector2) -> Self {
        Self::Affine(DAffine2::from_translation(t))
    }

    /// Counter-clockwise rotation about the origin, angle in radians.
    pub fn rotation(angle: f64) -> Self {
        Self::Affine(DAffine2::from_angle(angle))
    }

    pub fn scaling(s: Vector2) -> Self {
        Self::Affine(DAffine2::from_scale(s))
    }

    pub fn from_affine(a: DAffine2) -> Self {
        Self::Affine(a)
    }

    /// Build a frame from a homogeneous 3x3 matrix.
    ///
    /// Matrices whose last row is `(0, 0, 1)` are affine and normalized to
    /// `Frame::Affine`.
    pub fn from_projective(m: DMat3) -> Self {
        if m.row(2) == DVec3::Z {
            Self::Affine(DAffine2::from_mat3(m))
        } else {
            Self::Projective(m)
        }
    }

    pub fn to_mat3(&self) -> DMat3 {
        match self {
            Self::Affine(a) => DMat3::from(*a),
            Self::Projective(m) => *m,
        }
    }

    /// Whether the frame is a pure affine map (no perspective component).
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Affine(_))
    }

    pub fn linear_part(&self) -> Option<DMat2> {
        match self {
            Self::Affine(a) => Some(a.matrix2),
            Self::Projective(_) => None,
        }
    }

    pub fn apply(&self, p: Point2) -> Point2 {
        match self {
            Self::Affine(a) => a.transform_point2(p),
            Self::Projective(m) => {
                let h = *m * DVec3::new(p.x, p.y, 1.0);
                Point2::new(h.x / h.z, h.y / h.z)
            }
        }
    }

    /// Jacobian of the map at `p`.
    pub fn jacobian(&self, p: Point2) -> DMat2 {
        match self {
            Self::Affine(a) => a.matrix2,
            Self::Projective(m) => {
                let (r0, r1, r2) = (m.row(0), m.row(1), m.row(2));
                let h = DVec3::new(p.x, p.y, 1.0);
                let w = r2.dot(h);
                let u = r0.dot(h) / w;
                let v = r1.dot(h) / w;
                DMat2::from_cols(
                    Vector2::new((r0.x - u * r2.x) / w, (r1.x - v * r2.x) / w),
                    Vector2::new((r0.y - u * r2.y) / w, (r1.y - v * r2.y) / w),
                )
            }
        }
    }

    /// Tolerance to use before the map so that deviations stay within `err`
    /// after it: `err` divided by the largest local stretch factor.
    pub fn direct_bound(&self, p: Point2, err: f64) -> f64 {
        let (_, stretch) = singular_values(self.jacobian(p));
        if stretch <= f64::EPSILON {
            err
        } else {
            err / stretch
        }
    }

    /// Compose: apply `self`, then `other`.
    pub fn then(&self, other: &Frame) -> Frame {
        match (self, other) {
            (Self::Affine(a), Self::Affine(b)) => Self::Affine(*b * *a),
            _ => Self::from_projective(other.to_mat3() * self.to_mat3()),
        }
    }

    pub fn inverse(&self) -> Option<Frame> {
        match self {
            Self::Affine(a) => {
                if a.matrix2.determinant().abs() < 1e-15 {
                    None
                } else {
                    Some(Self::Affine(a.inverse()))
                }
            }
            Self::Projective(m) => {
                if m.determinant().abs() < 1e-15 {
                    None
                } else {
                    Some(Self::from_projective(m.inverse()))
                }
            }
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

/// Singular values `(min, max)` of a 2x2 matrix.
pub fn singular_values(m: DMat2) -> (f64, f64) {
    let (c0, c1) = (m.x_axis, m.y_axis);
    // Entries of M^T M
    let p = c0.dot(c0);
    let q = c0.dot(c1);
    let r = c1.dot(c1);
    let mean = 0.5 * (p + r);
    let spread = (0.25 * (p - r) * (p - r) + q * q).sqrt();
    let hi = (mean + spread).max(0.0).sqrt();
    let lo = (mean - spread).max(0.0).sqrt();
    (lo, hi)
}
