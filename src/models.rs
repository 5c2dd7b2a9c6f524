//! Plain data types shared by the conversion pipeline and its callers.

pub mod options;
pub mod request;
pub mod shape;
pub mod transform;
pub mod units;
pub mod vector;

pub use options::{ConversionOptions, UnitFallback};
pub use request::{ConversionReport, ConversionRequest};
pub use shape::{ShapeDescriptor, ShapeGeometry, ShapeKind, SizeHints, SvgDocument, ViewBox};
pub use transform::{AffineTransform, Decomposition};
pub use units::{physical_width_of, DocumentUnits, Length, LengthUnit};
pub use vector::{Contour, Extents, Point, Segment, VectorModel};
