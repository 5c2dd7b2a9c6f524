//! SVG input side of the pipeline.
//!
//! *   [`read_svg_document`] turns SVG text into a flat list of shape descriptors,
//!     each with its precomputed ancestor transform chain.
//! *   [`parse_transform`] parses `transform` attribute values.
//! *   [`parse_path_data`] parses `d` attributes into absolute commands.
//!
//! Only geometry is read. Styling, text, images and `<use>` references are out of scope.

mod document;
mod path_data;
mod transform;
pub(crate) mod utils;

pub use document::read_svg_document;
pub use path_data::{parse_path_data, PathCommand, PathDataError};
pub use transform::parse_transform;
