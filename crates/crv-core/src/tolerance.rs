/// Numeric thresholds used while rectifying curves.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Chord lengths below this are treated as exactly zero during subdivision.
    pub chord_snap: f64,
    /// Radii below this are treated as degenerate (no usable curvature).
    pub degenerate_radius: f64,
}

impl Tolerance {
    pub const DEFAULT_CHORD_SNAP: f64 = 1e-6;
    pub const DEFAULT_DEGENERATE_RADIUS: f64 = 1e-6;

    pub fn new(chord_snap: f64, degenerate_radius: f64) -> Self {
        Self {
            chord_snap,
            degenerate_radius,
        }
    }

    pub fn default_precision() -> Self {
        Self {
            chord_snap: Self::DEFAULT_CHORD_SNAP,
            degenerate_radius: Self::DEFAULT_DEGENERATE_RADIUS,
        }
    }

    /// Snap a chord length to exactly zero when it is below `chord_snap`.
    ///
    /// Without this, floating noise can keep a chord just above zero forever
    /// and the subdivision never terminates.
    pub fn snap_chord(self, length: f64) -> f64 {
        if length != 0.0 && length.abs() < self.chord_snap {
            0.0
        } else {
            length
        }
    }

    /// Check if a radius is too small to carry curvature information
    pub fn is_degenerate_radius(self, r: f64) -> bool {
        r.abs() < self.degenerate_radius
    }

    /// Check that both thresholds are finite and non-negative
    pub fn is_well_formed(self) -> bool {
        [self.chord_snap, self.degenerate_radius]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
