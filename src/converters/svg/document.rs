//! Reads an SVG document into the flat shape list the pipeline consumes.

use super::utils::parse_view_box;
use crate::errors::Result;
use crate::models::{ShapeDescriptor, ShapeGeometry, ShapeKind, SizeHints, SvgDocument};
use log::debug;
use roxmltree::{Document, Node};

/// Containers whose content is never rendered directly.
const NON_RENDERED: &[&str] = &["defs", "clipPath", "mask", "symbol", "pattern", "marker"];

/// Parses SVG text and collects every drawable `path`, `polyline`, `polygon`
/// and `circle` in document order.
///
/// Each descriptor carries the `transform` attributes of its ancestors, outermost
/// first (the root `<svg>` included), so the composer never needs the tree.
pub fn read_svg_document(svg: &str) -> Result<SvgDocument> {
    let doc = Document::parse(svg)?;
    let root = doc.root_element();

    let size = SizeHints {
        width: root.attribute("width").map(str::to_string),
        height: root.attribute("height").map(str::to_string),
        view_box: parse_view_box(root.attribute("viewBox")),
    };

    let mut shapes = Vec::new();
    let mut chain = Vec::new();
    collect_shapes(root, &mut chain, &mut shapes);

    debug!(
        "[read_svg_document] Found {} shape(s); size hints {:?}",
        shapes.len(),
        size
    );
    Ok(SvgDocument { shapes, size })
}

fn collect_shapes(node: Node<'_, '_>, chain: &mut Vec<String>, out: &mut Vec<ShapeDescriptor>) {
    if !node.is_element() {
        return;
    }
    let tag = node.tag_name().name();
    if NON_RENDERED.contains(&tag) {
        return;
    }

    if let Some(kind) = shape_kind(tag) {
        let mut shape =
            ShapeDescriptor::new(kind, geometry_of(node, kind)).with_ancestors(chain.iter().cloned());
        shape.transform = node.attribute("transform").map(str::to_string);
        shape.element_id = node.attribute("id").map(str::to_string);
        out.push(shape);
        return;
    }

    let pushed = match node.attribute("transform") {
        Some(t) => {
            chain.push(t.to_string());
            true
        }
        None => false,
    };
    for child in node.children().filter(Node::is_element) {
        collect_shapes(child, chain, out);
    }
    if pushed {
        chain.pop();
    }
}

fn shape_kind(tag: &str) -> Option<ShapeKind> {
    match tag {
        "path" => Some(ShapeKind::Path),
        "polyline" => Some(ShapeKind::Polyline),
        "polygon" => Some(ShapeKind::Polygon),
        "circle" => Some(ShapeKind::Circle),
        _ => None,
    }
}

fn geometry_of(node: Node<'_, '_>, kind: ShapeKind) -> ShapeGeometry {
    let owned = |name: &str| node.attribute(name).map(str::to_string);
    match kind {
        ShapeKind::Path => owned("d")
            .map(|data| ShapeGeometry::PathData { data })
            .unwrap_or(ShapeGeometry::Missing),
        ShapeKind::Polyline | ShapeKind::Polygon => owned("points")
            .map(|points| ShapeGeometry::Points { points })
            .unwrap_or(ShapeGeometry::Missing),
        ShapeKind::Circle => match owned("r") {
            Some(r) => ShapeGeometry::Circle {
                cx: owned("cx"),
                cy: owned("cy"),
                r: Some(r),
            },
            None => ShapeGeometry::Missing,
        },
    }
}
