//! Planar curves with adaptive rectification into polylines.

pub mod bspline;
pub mod curve;
pub mod rectify;

pub use curve::{
    arc, concat, invert, poly_segment, segment, spline, spline_with, transform,
    transform_inverse, CompoundCurve, Curve, CurveRef, EllipticArc, InvertedCurve, PolySegment,
    Segment, Spline, SplineOptions, TransformedCurve,
};
