use serde::{Deserialize, Serialize};

/// What to assume when the document declares no physical width or height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitFallback {
    /// Leave coordinates unscaled and the unit header unset.
    #[default]
    Unitless,
    /// One viewBox unit is one millimetre (requires a viewBox).
    ViewBoxAsMillimeters,
    /// `px`/bare declared sizes are CSS pixels at 96 per inch, scaled against the viewBox.
    CssPixels,
}

/// Tunables for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionOptions {
    /// Maximum chord error when flattening curves, as a fraction of the shape's
    /// bounding-box diagonal.
    pub chord_tolerance: f64,
    /// Maximum relative difference between the two principal scales of a
    /// transform for arcs to be kept as native arcs.
    pub arc_anisotropy_tolerance: f64,
    pub unit_fallback: UnitFallback,
    /// Upper bound on line segments produced for a single curve.
    pub max_flatten_segments: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            chord_tolerance: 0.001,
            arc_anisotropy_tolerance: 0.01,
            unit_fallback: UnitFallback::Unitless,
            max_flatten_segments: 1024,
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_chord_tolerance(mut self, tolerance: f64) -> Self {
        self.chord_tolerance = tolerance;
        self
    }

    pub fn set_arc_anisotropy_tolerance(mut self, tolerance: f64) -> Self {
        self.arc_anisotropy_tolerance = tolerance;
        self
    }

    pub fn set_unit_fallback(mut self, fallback: UnitFallback) -> Self {
        self.unit_fallback = fallback;
        self
    }

    pub fn set_max_flatten_segments(mut self, max: usize) -> Self {
        self.max_flatten_segments = max.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let options: ConversionOptions =
            serde_json::from_str(r#"{"unitFallback":"viewBoxAsMillimeters"}"#)
                .expect("valid options JSON");
        assert_eq!(options.unit_fallback, UnitFallback::ViewBoxAsMillimeters);
        assert_eq!(options.chord_tolerance, 0.001);
        assert_eq!(options.max_flatten_segments, 1024);
    }
}
