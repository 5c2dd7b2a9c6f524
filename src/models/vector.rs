use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::transform::AffineTransform;

/// A 2D point (or direction vector) in the current model frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn sub(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn add(&self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn scaled(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Point on the circle of `radius` around `self` at `degrees`.
    pub fn polar(&self, radius: f64, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(self.x + radius * cos, self.y + radius * sin)
    }
}

/// One drawable primitive of a contour.
///
/// Arcs sweep counter-clockwise in the math sense (increasing angle, +x towards +y)
/// from `start_angle` to `end_angle`, both in degrees. A full circle is an arc whose
/// sweep is 360 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Segment {
    #[serde(rename_all = "camelCase")]
    Line { origin: Point, end: Point },
    #[serde(rename_all = "camelCase")]
    Arc {
        origin: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl Segment {
    pub fn line(origin: Point, end: Point) -> Self {
        Segment::Line { origin, end }
    }

    pub fn arc(origin: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Segment::Arc {
            origin,
            radius,
            start_angle,
            end_angle,
        }
    }

    pub fn circle(origin: Point, radius: f64) -> Self {
        Segment::arc(origin, radius, 0.0, 360.0)
    }

    /// Sweep of an arc in degrees, in `(0, 360]`. Lines report zero.
    pub fn sweep(&self) -> f64 {
        match *self {
            Segment::Line { .. } => 0.0,
            Segment::Arc {
                start_angle,
                end_angle,
                ..
            } => {
                let raw = end_angle - start_angle;
                if raw >= 360.0 - 1e-9 {
                    360.0
                } else {
                    let swept = raw.rem_euclid(360.0);
                    if swept == 0.0 {
                        360.0
                    } else {
                        swept
                    }
                }
            }
        }
    }

    pub fn is_full_circle(&self) -> bool {
        matches!(self, Segment::Arc { .. }) && (self.sweep() - 360.0).abs() < 1e-9
    }

    /// Maps the segment through a similarity transform (rotation, uniform scale,
    /// translation, optional mirror). `scale` is the transform's uniform factor.
    pub(crate) fn map_similar(&self, transform: &AffineTransform, scale: f64) -> Segment {
        match *self {
            Segment::Line { origin, end } => {
                Segment::line(transform.apply(origin), transform.apply(end))
            }
            Segment::Arc {
                origin, radius, start_angle, ..
            } => {
                let sweep = self.sweep();
                let center = transform.apply(origin);
                let start = if transform.determinant() < 0.0 {
                    transform.map_angle(start_angle + sweep)
                } else {
                    transform.map_angle(start_angle)
                };
                Segment::arc(center, radius * scale, start, start + sweep)
            }
        }
    }

    fn extend_extents(&self, extents: &mut Option<Extents>) {
        match *self {
            Segment::Line { origin, end } => {
                include_point(extents, origin);
                include_point(extents, end);
            }
            Segment::Arc {
                origin,
                radius,
                start_angle,
                ..
            } => {
                let sweep = self.sweep();
                include_point(extents, origin.polar(radius, start_angle));
                include_point(extents, origin.polar(radius, start_angle + sweep));
                // Axis crossings inside the sweep.
                let first = (start_angle / 90.0).ceil() as i64;
                let last = ((start_angle + sweep) / 90.0).floor() as i64;
                for k in first..=last {
                    include_point(extents, origin.polar(radius, k as f64 * 90.0));
                }
            }
        }
    }
}

/// Ordered sequence of segments; `closed` marks polygons and `Z`-terminated subpaths.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contour {
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Contour {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Axis-aligned bounds of a model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub low: Point,
    pub high: Point,
}

impl Extents {
    pub fn width(&self) -> f64 {
        self.high.x - self.low.x
    }

    pub fn height(&self) -> f64 {
        self.high.y - self.low.y
    }

    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }
}

fn include_point(extents: &mut Option<Extents>, p: Point) {
    match extents {
        Some(ext) => {
            ext.low.x = ext.low.x.min(p.x);
            ext.low.y = ext.low.y.min(p.y);
            ext.high.x = ext.high.x.max(p.x);
            ext.high.y = ext.high.y.max(p.y);
        }
        None => *extents = Some(Extents { low: p, high: p }),
    }
}

/// Bounds of a bare point set (e.g. control polygons before flattening).
pub(crate) fn point_extents(points: impl IntoIterator<Item = Point>) -> Option<Extents> {
    let mut extents = None;
    for p in points {
        include_point(&mut extents, p);
    }
    extents
}

/// The composed drawing: shape identifier -> contours, in document order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorModel {
    pub shapes: IndexMap<String, Vec<Contour>>,
}

impl VectorModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, contours: Vec<Contour>) {
        self.shapes.insert(id.into(), contours);
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.values().all(|contours| contours.iter().all(Contour::is_empty))
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.shapes
            .values()
            .flat_map(|contours| contours.iter())
            .flat_map(|contour| contour.segments.iter())
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Measured bounds, including arc bulges. `None` for an empty model.
    pub fn extents(&self) -> Option<Extents> {
        let mut extents = None;
        for segment in self.segments() {
            segment.extend_extents(&mut extents);
        }
        extents
    }

    fn map_segments(self, mut f: impl FnMut(&Segment) -> Segment) -> VectorModel {
        let shapes = self
            .shapes
            .into_iter()
            .map(|(id, contours)| {
                let contours = contours
                    .into_iter()
                    .map(|contour| Contour {
                        segments: contour.segments.iter().map(&mut f).collect(),
                        closed: contour.closed,
                    })
                    .collect();
                (id, contours)
            })
            .collect();
        VectorModel { shapes }
    }

    /// Multiplies every coordinate and radius by `factor` (> 0).
    pub fn scaled(self, factor: f64) -> VectorModel {
        if factor == 1.0 {
            return self;
        }
        self.map_segments(|segment| match *segment {
            Segment::Line { origin, end } => {
                Segment::line(origin.scaled(factor), end.scaled(factor))
            }
            Segment::Arc {
                origin,
                radius,
                start_angle,
                end_angle,
            } => Segment::arc(origin.scaled(factor), radius * factor, start_angle, end_angle),
        })
    }

    /// Negates every Y coordinate. Arc angles map `(s, e) -> (-e, -s)`,
    /// so applying the flip twice restores the model exactly.
    pub fn flipped_vertically(self) -> VectorModel {
        self.map_segments(|segment| match *segment {
            Segment::Line { origin, end } => Segment::line(
                Point::new(origin.x, -origin.y),
                Point::new(end.x, -end.y),
            ),
            Segment::Arc {
                origin,
                radius,
                start_angle,
                end_angle,
            } => Segment::arc(
                Point::new(origin.x, -origin.y),
                radius,
                -end_angle,
                -start_angle,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> VectorModel {
        let mut model = VectorModel::new();
        model.insert(
            "shape0",
            vec![Contour {
                segments: vec![
                    Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 5.0)),
                    Segment::arc(Point::new(20.0, 20.0), 5.0, 0.0, 90.0),
                ],
                closed: false,
            }],
        );
        model
    }

    #[test]
    fn extents_include_arc_bulge() {
        let mut model = VectorModel::new();
        model.insert(
            "circle",
            vec![Contour {
                segments: vec![Segment::circle(Point::new(0.0, 0.0), 2.0)],
                closed: true,
            }],
        );
        let ext = model.extents().expect("non-empty model");
        assert_eq!(ext.low, Point::new(-2.0, -2.0));
        assert_eq!(ext.high, Point::new(2.0, 2.0));
    }

    #[test]
    fn flip_is_its_own_inverse() {
        let model = sample_model();
        let twice = model.clone().flipped_vertically().flipped_vertically();
        assert_eq!(model, twice);
    }

    #[test]
    fn flip_keeps_arc_on_mirrored_circle() {
        let flipped = sample_model().flipped_vertically();
        let arc = flipped.segments().nth(1).copied().expect("arc segment");
        match arc {
            Segment::Arc {
                origin,
                start_angle,
                end_angle,
                ..
            } => {
                assert_eq!(origin, Point::new(20.0, -20.0));
                assert_eq!(start_angle, -90.0);
                assert_eq!(end_angle, 0.0);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn scaled_multiplies_coordinates_and_radius() {
        let scaled = sample_model().scaled(0.5);
        let segments: Vec<Segment> = scaled.segments().copied().collect();
        assert_eq!(
            segments[0],
            Segment::line(Point::new(0.0, 0.0), Point::new(5.0, 2.5))
        );
        match segments[1] {
            Segment::Arc { origin, radius, .. } => {
                assert_eq!(origin, Point::new(10.0, 10.0));
                assert_eq!(radius, 2.5);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn sweep_handles_wrapping_angles() {
        let arc = Segment::arc(Point::default(), 1.0, 350.0, 10.0);
        assert!((arc.sweep() - 20.0).abs() < 1e-12);
        assert!(Segment::circle(Point::default(), 1.0).is_full_circle());
    }
}
