//! Format converters: the SVG reader side and the DXF producing side.

pub mod dxf;
pub mod svg;
