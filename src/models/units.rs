use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::shape::SizeHints;

pub const MM_PER_INCH: f64 = 25.4;
pub const PT_PER_INCH: f64 = 72.0;
pub const PC_PER_INCH: f64 = 6.0;
/// CSS reference pixel density.
pub const PX_PER_INCH: f64 = 96.0;

/// Linear unit of the exported drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentUnits {
    /// No confident physical size; coordinates are raw user units.
    #[default]
    None,
    Millimeter,
    Inch,
}

impl DocumentUnits {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, DocumentUnits::None)
    }
}

/// Unit suffix of an SVG length attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Bare number (user units).
    User,
    Px,
    Pt,
    Pc,
    Mm,
    Cm,
    In,
    Percent,
}

/// A parsed SVG length such as `"50mm"` or `"4.5in"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Parses `<number><unit?>` with the SVG length grammar. Returns `None` for
    /// empty strings, font-relative units (`em`, `ex`), or non-finite numbers.
    pub fn parse(input: &str) -> Option<Length> {
        let parsed = svgtypes::Length::from_str(input.trim()).ok()?;
        if !parsed.number.is_finite() {
            return None;
        }
        let unit = match parsed.unit {
            svgtypes::LengthUnit::None => LengthUnit::User,
            svgtypes::LengthUnit::Px => LengthUnit::Px,
            svgtypes::LengthUnit::Pt => LengthUnit::Pt,
            svgtypes::LengthUnit::Pc => LengthUnit::Pc,
            svgtypes::LengthUnit::Mm => LengthUnit::Mm,
            svgtypes::LengthUnit::Cm => LengthUnit::Cm,
            svgtypes::LengthUnit::In => LengthUnit::In,
            svgtypes::LengthUnit::Percent => LengthUnit::Percent,
            _ => return None,
        };
        Some(Length {
            value: parsed.number,
            unit,
        })
    }

    /// The document unit family an explicit physical suffix belongs to.
    /// Pixel, user and percentage lengths carry no physical size.
    pub fn physical_family(&self) -> Option<DocumentUnits> {
        match self.unit {
            LengthUnit::Mm | LengthUnit::Cm => Some(DocumentUnits::Millimeter),
            LengthUnit::In | LengthUnit::Pt | LengthUnit::Pc => Some(DocumentUnits::Inch),
            LengthUnit::User | LengthUnit::Px | LengthUnit::Percent => None,
        }
    }

    pub fn to_millimeters(&self) -> Option<f64> {
        self.to_inches().map(|inches| inches * MM_PER_INCH)
    }

    pub fn to_inches(&self) -> Option<f64> {
        match self.unit {
            LengthUnit::In => Some(self.value),
            LengthUnit::Mm => Some(self.value / MM_PER_INCH),
            LengthUnit::Cm => Some(self.value * 10.0 / MM_PER_INCH),
            LengthUnit::Pt => Some(self.value / PT_PER_INCH),
            LengthUnit::Pc => Some(self.value / PC_PER_INCH),
            LengthUnit::User | LengthUnit::Px | LengthUnit::Percent => None,
        }
    }

    /// Length expressed in `units`; `None` for non-physical lengths or `DocumentUnits::None`.
    pub fn in_units(&self, units: DocumentUnits) -> Option<f64> {
        match units {
            DocumentUnits::None => None,
            DocumentUnits::Millimeter => match self.unit {
                // Keep metric values exact instead of round-tripping through inches.
                LengthUnit::Mm => Some(self.value),
                LengthUnit::Cm => Some(self.value * 10.0),
                _ => self.to_millimeters(),
            },
            DocumentUnits::Inch => match self.unit {
                LengthUnit::In => Some(self.value),
                _ => self.to_inches(),
            },
        }
    }

    /// Pixel count for `px` and bare lengths.
    pub fn to_css_pixels(&self) -> Option<f64> {
        match self.unit {
            LengthUnit::User | LengthUnit::Px => Some(self.value),
            _ => self.to_inches().map(|inches| inches * PX_PER_INCH),
        }
    }
}

/// Declared physical width of a document, in inches.
///
/// Uses the explicit `width` when it carries a physical unit; otherwise derives it
/// from an explicit `height` through the viewBox aspect ratio. Shared with the
/// mockup compositor for pixel-per-inch overlay sizing.
///
/// A document without any physical size yields `None`; user units are never
/// taken to be inches.
pub fn physical_width_of(hints: &SizeHints) -> Option<f64> {
    let width = hints.width.as_deref().and_then(Length::parse);
    if let Some(inches) = width.and_then(|w| w.to_inches()) {
        return (inches > 0.0).then_some(inches);
    }
    let view_box = hints.view_box?;
    let height = hints.height.as_deref().and_then(Length::parse)?;
    let inches = height.to_inches()? * view_box.width / view_box.height;
    (inches > 0.0).then_some(inches)
}
