use serde::{Deserialize, Serialize};

use super::units::physical_width_of;

/// The SVG element a shape was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Path,
    Polyline,
    Polygon,
    Circle,
}

/// Raw, unparsed geometry of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShapeGeometry {
    /// The `d` attribute of a `<path>`.
    PathData { data: String },
    /// The `points` attribute of a `<polyline>` / `<polygon>`.
    Points { points: String },
    /// The `cx`, `cy`, `r` attributes of a `<circle>`, unparsed.
    Circle {
        cx: Option<String>,
        cy: Option<String>,
        r: Option<String>,
    },
    /// The element lacks its geometry attribute entirely.
    Missing,
}

/// One exportable shape with everything needed to place it: its geometry, its own
/// transform and the transforms of its ancestors (outermost first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub geometry: ShapeGeometry,
    /// The element's own `transform` attribute.
    pub transform: Option<String>,
    /// `transform` attributes of enclosing elements, outermost first.
    #[serde(default)]
    pub ancestor_transforms: Vec<String>,
    /// The element's `id` attribute, used in warnings.
    #[serde(default)]
    pub element_id: Option<String>,
}

impl ShapeDescriptor {
    pub fn path(data: impl Into<String>) -> Self {
        Self::new(ShapeKind::Path, ShapeGeometry::PathData { data: data.into() })
    }

    pub fn polyline(points: impl Into<String>) -> Self {
        Self::new(ShapeKind::Polyline, ShapeGeometry::Points { points: points.into() })
    }

    pub fn polygon(points: impl Into<String>) -> Self {
        Self::new(ShapeKind::Polygon, ShapeGeometry::Points { points: points.into() })
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::new(
            ShapeKind::Circle,
            ShapeGeometry::Circle {
                cx: Some(cx.to_string()),
                cy: Some(cy.to_string()),
                r: Some(r.to_string()),
            },
        )
    }

    pub fn new(kind: ShapeKind, geometry: ShapeGeometry) -> Self {
        Self {
            kind,
            geometry,
            transform: None,
            ancestor_transforms: Vec::new(),
            element_id: None,
        }
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn with_ancestors<I, S>(mut self, ancestors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ancestor_transforms = ancestors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }
}

/// The root `viewBox`: internal coordinate extent of the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }
}

/// Document-level size hints: declared `width`/`height` strings and the viewBox.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeHints {
    pub width: Option<String>,
    pub height: Option<String>,
    pub view_box: Option<ViewBox>,
}

/// Pipeline input: flat shape list in document order plus size hints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgDocument {
    pub shapes: Vec<ShapeDescriptor>,
    pub size: SizeHints,
}

impl SvgDocument {
    /// Declared physical width in inches, see [`physical_width_of`].
    pub fn physical_width(&self) -> Option<f64> {
        physical_width_of(&self.size)
    }
}
