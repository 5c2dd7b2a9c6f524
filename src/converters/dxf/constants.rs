use dxf::enums::AcadVersion;

// --- Header values ---
/// AutoCAD 2000, the oldest DXF flavour that carries `$INSUNITS`.
pub(crate) const DXF_VERSION: AcadVersion = AcadVersion::R2000;

// --- Geometry ---
/// Relative radius mismatch under which an SVG arc counts as circular.
pub(crate) const CIRCULAR_RADIUS_TOLERANCE: f64 = 1e-6;
/// Absolute fallback tolerance for shapes with a degenerate bounding box.
pub(crate) const MIN_ABSOLUTE_TOLERANCE: f64 = 1e-9;
