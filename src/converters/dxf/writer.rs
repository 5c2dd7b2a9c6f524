//! DXF serialization of an [`ExchangeDocument`] through the `dxf` crate.

use dxf::entities::{Arc, Circle, Entity, EntityType, Line};
use dxf::enums::Units;
use dxf::{Drawing, DxfError};

use super::constants::DXF_VERSION;
use super::export::ExchangeDocument;
use crate::models::{DocumentUnits, Extents, Point, Segment};

/// Builds the drawing: header (version, units, extents) and one entity per segment.
///
/// `$INSUNITS` is set only when the unit was resolved; otherwise it stays at
/// the format default (unitless) rather than naming a wrong unit.
pub fn to_drawing(document: &ExchangeDocument) -> Drawing {
    let mut drawing = Drawing::new();
    drawing.header.version = DXF_VERSION;
    drawing.header.default_drawing_units = if document.units.is_resolved() {
        drawing_units(document.units)
    } else {
        Units::Unitless
    };

    if let Some(Extents { low, high }) = document.model.extents() {
        drawing.header.minimum_drawing_extents = dxf_point(low);
        drawing.header.maximum_drawing_extents = dxf_point(high);
    }

    for segment in document.model.segments() {
        drawing.add_entity(Entity::new(entity_type(segment)));
    }
    drawing
}

/// Renders the document as DXF text.
pub fn write_dxf(document: &ExchangeDocument) -> Result<String, DxfError> {
    let mut buffer = Vec::new();
    to_drawing(document).save(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn drawing_units(units: DocumentUnits) -> Units {
    match units {
        DocumentUnits::Millimeter => Units::Millimeters,
        DocumentUnits::Inch => Units::Inches,
        DocumentUnits::None => Units::Unitless,
    }
}

/// `+ 0.0` folds negative zero so a flipped origin is written as `0`.
fn dxf_point(p: Point) -> dxf::Point {
    dxf::Point::new(p.x + 0.0, p.y + 0.0, 0.0)
}

fn entity_type(segment: &Segment) -> EntityType {
    match *segment {
        Segment::Line { origin, end } => EntityType::Line(Line::new(dxf_point(origin), dxf_point(end))),
        Segment::Arc { origin, radius, .. } if segment.is_full_circle() => {
            EntityType::Circle(Circle::new(dxf_point(origin), radius))
        }
        Segment::Arc {
            origin,
            radius,
            start_angle,
            ..
        } => {
            // DXF arcs run counter-clockwise from start to end, angles in [0, 360).
            EntityType::Arc(Arc::new(
                dxf_point(origin),
                radius,
                start_angle.rem_euclid(360.0),
                (start_angle + segment.sweep()).rem_euclid(360.0),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contour, VectorModel};
    use dxf::enums::AcadVersion;

    fn document(units: DocumentUnits, segments: Vec<Segment>) -> ExchangeDocument {
        let mut model = VectorModel::new();
        model.insert(
            "shape0",
            vec![Contour {
                segments,
                closed: false,
            }],
        );
        ExchangeDocument {
            units,
            scale: 1.0,
            model,
        }
    }

    fn reload(text: &str) -> Drawing {
        Drawing::load(&mut text.as_bytes()).expect("written DXF loads back")
    }

    #[test]
    fn writes_a_loadable_r2000_document() {
        let text = write_dxf(&document(DocumentUnits::Millimeter, vec![])).expect("dxf");
        assert!(text.contains("AC1015"));
        assert!(text.trim_end().ends_with("EOF"));
        let drawing = reload(&text);
        assert_eq!(drawing.header.version, AcadVersion::R2000);
        assert_eq!(drawing.entities().count(), 0);
    }

    #[test]
    fn unit_header_only_when_resolved() {
        let mm = reload(&write_dxf(&document(DocumentUnits::Millimeter, vec![])).expect("dxf"));
        assert_eq!(mm.header.default_drawing_units, Units::Millimeters);
        let inch = reload(&write_dxf(&document(DocumentUnits::Inch, vec![])).expect("dxf"));
        assert_eq!(inch.header.default_drawing_units, Units::Inches);
        let none = reload(&write_dxf(&document(DocumentUnits::None, vec![])).expect("dxf"));
        assert_eq!(none.header.default_drawing_units, Units::Unitless);
    }

    #[test]
    fn writes_line_arc_and_circle_entities() {
        let drawing = to_drawing(&document(
            DocumentUnits::None,
            vec![
                Segment::line(Point::new(0.0, -0.0), Point::new(1.5, 2.0)),
                Segment::arc(Point::new(0.0, 0.0), 2.0, -90.0, 0.0),
                Segment::circle(Point::new(3.0, 4.0), 1.0),
            ],
        ));

        let entities: Vec<&Entity> = drawing.entities().collect();
        assert_eq!(entities.len(), 3);
        match &entities[0].specific {
            EntityType::Line(line) => {
                assert_eq!((line.p1.x, line.p1.y), (0.0, 0.0));
                assert!(line.p1.y.is_sign_positive());
                assert_eq!((line.p2.x, line.p2.y), (1.5, 2.0));
            }
            other => panic!("expected LINE, got {other:?}"),
        }
        match &entities[1].specific {
            EntityType::Arc(arc) => {
                assert_eq!(arc.radius, 2.0);
                assert_eq!((arc.start_angle, arc.end_angle), (270.0, 0.0));
            }
            other => panic!("expected ARC, got {other:?}"),
        }
        match &entities[2].specific {
            EntityType::Circle(circle) => {
                assert_eq!((circle.center.x, circle.center.y), (3.0, 4.0));
                assert_eq!(circle.radius, 1.0);
            }
            other => panic!("expected CIRCLE, got {other:?}"),
        }
        assert!(entities.iter().all(|e| e.common.layer == "0"));
    }

    #[test]
    fn extents_recorded_in_header() {
        let text = write_dxf(&document(
            DocumentUnits::Millimeter,
            vec![Segment::line(Point::new(-1.0, 2.0), Point::new(3.0, -4.0))],
        ))
        .expect("dxf");
        let drawing = reload(&text);
        let low = &drawing.header.minimum_drawing_extents;
        let high = &drawing.header.maximum_drawing_extents;
        assert_eq!((low.x, low.y), (-1.0, -4.0));
        assert_eq!((high.x, high.y), (3.0, 2.0));
    }
}
