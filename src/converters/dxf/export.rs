//! Unit-normalizing exporter: resolves the physical unit and scale of a
//! composed model, scales it and flips it into the Y-up convention.

use serde::{Deserialize, Serialize};

use super::error::ConversionWarning;
use crate::models::units::{MM_PER_INCH, PX_PER_INCH};
use crate::models::{
    ConversionOptions, DocumentUnits, Extents, Length, SizeHints, UnitFallback, VectorModel,
};
use log::{debug, warn};

/// Final, axis-corrected model tagged with its unit. Serialized by the writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDocument {
    pub units: DocumentUnits,
    /// Source user units to target units.
    pub scale: f64,
    pub model: VectorModel,
}

/// How the unit and scale of a document were decided.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitResolution {
    pub units: DocumentUnits,
    pub scale: f64,
    pub warning: Option<ConversionWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exported {
    pub document: ExchangeDocument,
    pub warning: Option<ConversionWarning>,
}

#[derive(Clone, Copy)]
enum Axis {
    Height,
    Width,
}

impl Axis {
    fn declared<'a>(&self, hints: &'a SizeHints) -> Option<&'a str> {
        match self {
            Axis::Height => hints.height.as_deref(),
            Axis::Width => hints.width.as_deref(),
        }
    }

    /// Internal extent along this axis: the viewBox dimension, else the measured model.
    fn internal_extent(&self, hints: &SizeHints, measured: Option<Extents>) -> Option<f64> {
        let extent = match (self, hints.view_box) {
            (Axis::Height, Some(vb)) => vb.height,
            (Axis::Width, Some(vb)) => vb.width,
            (Axis::Height, None) => measured?.height(),
            (Axis::Width, None) => measured?.width(),
        };
        (extent > 0.0).then_some(extent)
    }
}

/// Decides the target unit and the uniform scale factor.
///
/// A declared height with a physical suffix wins, then the width. Without one
/// the configured [`UnitFallback`] applies.
pub fn resolve_units(
    hints: &SizeHints,
    measured: Option<Extents>,
    fallback: UnitFallback,
) -> UnitResolution {
    for axis in [Axis::Height, Axis::Width] {
        let Some(length) = axis.declared(hints).and_then(Length::parse) else {
            continue;
        };
        let Some(units) = length.physical_family() else {
            continue;
        };
        let (Some(physical), Some(internal)) = (
            length.in_units(units),
            axis.internal_extent(hints, measured),
        ) else {
            continue;
        };
        if physical <= 0.0 {
            continue;
        }
        debug!(
            "[resolve_units] {:?} from declared {:?} over internal extent {}",
            units, length, internal
        );
        return UnitResolution {
            units,
            scale: physical / internal,
            warning: None,
        };
    }

    match fallback {
        UnitFallback::Unitless => {
            let reason = "no declared width or height with a physical unit".to_string();
            warn!("[resolve_units] Exporting without units: {}", reason);
            UnitResolution {
                units: DocumentUnits::None,
                scale: 1.0,
                warning: Some(ConversionWarning::UnitUnresolved { reason }),
            }
        }
        UnitFallback::ViewBoxAsMillimeters => {
            debug!("[resolve_units] Treating user units as millimetres");
            UnitResolution {
                units: DocumentUnits::Millimeter,
                scale: 1.0,
                warning: None,
            }
        }
        UnitFallback::CssPixels => {
            let pixels_per_unit = [Axis::Height, Axis::Width].into_iter().find_map(|axis| {
                let px = axis.declared(hints).and_then(Length::parse)?.to_css_pixels()?;
                let internal = axis.internal_extent(hints, measured)?;
                (px > 0.0).then(|| px / internal)
            });
            let scale = pixels_per_unit.unwrap_or(1.0) / PX_PER_INCH * MM_PER_INCH;
            debug!("[resolve_units] CSS pixel fallback, {} mm per user unit", scale);
            UnitResolution {
                units: DocumentUnits::Millimeter,
                scale,
                warning: None,
            }
        }
    }
}

/// Scales `model` into its resolved unit and flips it to Y-up.
///
/// The flip always happens, even when the scale is 1.
///
/// # Arguments
///
/// * `model` - Imported geometry in SVG user units, Y down.
/// * `hints` - Declared width, height and viewBox of the root element.
/// * `options` - Chooses the fallback when no physical unit is declared.
///
/// # Returns
///
/// The document ready for writing, plus a warning when the unit stayed unresolved.
pub fn export(model: VectorModel, hints: &SizeHints, options: &ConversionOptions) -> Exported {
    let resolution = resolve_units(hints, model.extents(), options.unit_fallback);
    Exported {
        document: ExchangeDocument {
            units: resolution.units,
            scale: resolution.scale,
            model: model.scaled(resolution.scale).flipped_vertically(),
        },
        warning: resolution.warning,
    }
}
