//! DXF output side of the pipeline.
//!
//! The conversion runs in four steps, each a pure function of its input:
//! 1. [`compose_chain`] folds every shape's ancestor and own transforms into one matrix.
//! 2. [`import_shape`] turns the shape into line/arc contours in target space.
//! 3. [`export`] resolves the drawing unit, scales and flips the model to Y-up.
//! 4. [`write_dxf`] serializes the result as DXF text through the `dxf` crate.
//!
//! Problems with individual shapes never abort a conversion; they are returned
//! as [`ConversionWarning`]s next to the output.

mod compose;
mod constants;
mod error;
mod export;
mod import;
mod writer;

pub use compose::{compose_chain, compose_chain_detailed, ComposedTransform};
pub use error::{ConversionWarning, ImportError};
pub use export::{export, resolve_units, ExchangeDocument, Exported, UnitResolution};
pub use import::import_shape;
pub use writer::{to_drawing, write_dxf};

use crate::converters::svg::read_svg_document;
use crate::errors::Result;
use crate::models::{ConversionOptions, DocumentUnits, SvgDocument, VectorModel};
use log::{info, warn};

/// Result of one in-memory conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutput {
    pub dxf: String,
    pub document: ExchangeDocument,
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn units(&self) -> DocumentUnits {
        self.document.units
    }

    pub fn scale(&self) -> f64 {
        self.document.scale
    }

    /// Number of shapes that made it into the drawing.
    pub fn shape_count(&self) -> usize {
        self.document.model.shapes.len()
    }
}

/// Runs the pipeline over an already extracted document.
///
/// Shapes are keyed `shape{index}` by their position in `document.shapes`, so
/// output order always follows document order.
pub fn convert_document(document: &SvgDocument, options: &ConversionOptions) -> Result<ConversionOutput> {
    let mut model = VectorModel::new();
    let mut warnings = Vec::new();

    for (index, shape) in document.shapes.iter().enumerate() {
        let id = format!("shape{index}");
        let label = shape.element_id.clone().unwrap_or_else(|| id.clone());

        let composed = compose_chain_detailed(
            shape.ancestor_transforms.as_slice(),
            shape.transform.as_deref(),
        );
        warnings.extend(
            composed
                .ignored
                .into_iter()
                .map(|transform| ConversionWarning::TransformIgnored {
                    shape_id: label.clone(),
                    transform,
                }),
        );

        match import_shape(shape, &composed.transform, options) {
            Ok(contours) => model.insert(id, contours),
            Err(e) => {
                warn!("[convert_document] Skipping shape '{}': {}", label, e);
                warnings.push(ConversionWarning::ShapeSkipped {
                    shape_id: label,
                    reason: e.to_string(),
                });
            }
        }
    }

    let imported = model.shapes.len();
    let exported = export(model, &document.size, options);
    warnings.extend(exported.warning);
    let dxf = write_dxf(&exported.document)?;

    info!(
        "Converted {} of {} shape(s) to DXF ({:?}, scale {}), {} warning(s)",
        imported,
        document.shapes.len(),
        exported.document.units,
        exported.document.scale,
        warnings.len()
    );

    Ok(ConversionOutput {
        dxf,
        document: exported.document,
        warnings,
    })
}

/// Reads SVG text and converts it in one go.
pub fn convert_svg_to_dxf(svg: &str, options: &ConversionOptions) -> Result<ConversionOutput> {
    let document = read_svg_document(svg)?;
    convert_document(&document, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Segment, ShapeDescriptor, SizeHints, ViewBox};
    use dxf::entities::EntityType;
    use dxf::enums::Units;
    use dxf::Drawing;

    fn reload(text: &str) -> Drawing {
        Drawing::load(&mut text.as_bytes()).expect("written DXF loads back")
    }

    fn document(shapes: Vec<ShapeDescriptor>, size: SizeHints) -> SvgDocument {
        SvgDocument { shapes, size }
    }

    #[test]
    fn millimetre_scenario_end_to_end() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="50mm" height="25mm" viewBox="0 0 100 50">
            <path d="M0 0 L100 50"/>
        </svg>"#;
        let output = convert_svg_to_dxf(svg, &ConversionOptions::default()).expect("conversion");
        assert_eq!(output.units(), DocumentUnits::Millimeter);
        assert!((output.scale() - 0.5).abs() < 1e-12);
        assert!(output.warnings.is_empty(), "{:?}", output.warnings);

        let extents = output.document.model.extents().expect("non-empty");
        assert!((extents.width() - 50.0).abs() < 1e-6);
        assert!((extents.height() - 25.0).abs() < 1e-6);
        let drawing = reload(&output.dxf);
        assert_eq!(drawing.header.default_drawing_units, Units::Millimeters);
        assert!(matches!(
            drawing.entities().map(|e| &e.specific).collect::<Vec<_>>()[..],
            [EntityType::Line(_)]
        ));
    }

    #[test]
    fn unsized_document_is_unitless_with_warning() {
        let svg = r#"<svg viewBox="0 0 10 10"><polygon points="0,0 10,0 10,10"/></svg>"#;
        let output = convert_svg_to_dxf(svg, &ConversionOptions::default()).expect("conversion");
        assert_eq!(output.units(), DocumentUnits::None);
        assert_eq!(output.scale(), 1.0);
        assert!(matches!(
            output.warnings.as_slice(),
            [ConversionWarning::UnitUnresolved { .. }]
        ));
        assert_eq!(reload(&output.dxf).header.default_drawing_units, Units::Unitless);
    }

    #[test]
    fn unparseable_transform_is_a_warning_not_a_failure() {
        let shape = ShapeDescriptor::path("M1 2 L3 4").with_transform("foo(1,2)");
        let size = SizeHints {
            width: Some("10mm".into()),
            height: Some("10mm".into()),
            view_box: Some(ViewBox::new(0.0, 0.0, 10.0, 10.0)),
        };
        let output = convert_document(&document(vec![shape], size), &ConversionOptions::default())
            .expect("conversion");

        assert_eq!(
            output.warnings,
            vec![ConversionWarning::TransformIgnored {
                shape_id: "shape0".into(),
                transform: "foo(1,2)".into()
            }]
        );
        // Identity import, then the Y flip.
        let segments: Vec<&Segment> = output.document.model.segments().collect();
        assert_eq!(
            segments,
            vec![&Segment::line(
                crate::models::Point::new(1.0, -2.0),
                crate::models::Point::new(3.0, -4.0)
            )]
        );
    }

    #[test]
    fn bad_shapes_are_skipped_and_order_is_kept() {
        let shapes = vec![
            ShapeDescriptor::path("M0 0 L1 1"),
            ShapeDescriptor::path("M0 0 L").with_element_id("broken"),
            ShapeDescriptor::polyline("0,0 5,5"),
        ];
        let output = convert_document(&document(shapes, SizeHints::default()), &ConversionOptions::default())
            .expect("conversion");

        let keys: Vec<&String> = output.document.model.shapes.keys().collect();
        assert_eq!(keys, vec!["shape0", "shape2"]);
        assert!(output.warnings.iter().any(|w| matches!(
            w,
            ConversionWarning::ShapeSkipped { shape_id, .. } if shape_id == "broken"
        )));
        assert_eq!(output.shape_count(), 2);
    }

    #[test]
    fn anisotropic_circle_never_becomes_a_dxf_circle() {
        let svg = r#"<svg width="20mm" height="10mm" viewBox="0 0 20 10">
            <g transform="scale(2,1)"><circle cx="5" cy="5" r="4"/></g>
        </svg>"#;
        let output = convert_svg_to_dxf(svg, &ConversionOptions::default()).expect("conversion");
        assert!(output.document.model.segments().all(|s| matches!(s, Segment::Line { .. })));
        assert!(reload(&output.dxf)
            .entities()
            .all(|e| matches!(e.specific, EntityType::Line(_))));
    }

    #[test]
    fn malformed_xml_is_a_hard_failure() {
        assert!(convert_svg_to_dxf("<svg", &ConversionOptions::default()).is_err());
    }
}
