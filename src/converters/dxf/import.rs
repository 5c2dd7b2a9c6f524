//! Geometry importer: turns one shape descriptor plus its effective transform
//! into line and circular-arc contours in target space.
//!
//! Curves are handled in two ways:
//! *   circular arcs (SVG `A` commands with equal radii, `<circle>` elements and
//!     cubic Béziers that trace a circle) stay native arcs as long as the
//!     transform maps circles to circles;
//! *   everything else is flattened into line segments whose chord error stays
//!     under `chord_tolerance` times the shape's bounding-box diagonal.

use std::f64::consts::TAU;

use super::constants::{CIRCULAR_RADIUS_TOLERANCE, MIN_ABSOLUTE_TOLERANCE};
use super::error::ImportError;
use crate::converters::svg::utils::parse_points;
use crate::converters::svg::{parse_path_data, PathCommand};
use crate::models::vector::point_extents;
use crate::models::{
    AffineTransform, ConversionOptions, Contour, Length, LengthUnit, Point, Segment,
    ShapeDescriptor, ShapeGeometry, ShapeKind,
};
use log::debug;

/// Elliptical arc in center parameterization (angles in radians).
#[derive(Debug, Clone, Copy, PartialEq)]
struct EllipseArc {
    center: Point,
    rx: f64,
    ry: f64,
    /// Rotation of the ellipse's x axis.
    phi: f64,
    theta1: f64,
    /// Signed sweep; positive runs towards increasing angle.
    dtheta: f64,
}

impl EllipseArc {
    fn full_circle(center: Point, r: f64) -> Self {
        Self {
            center,
            rx: r,
            ry: r,
            phi: 0.0,
            theta1: 0.0,
            dtheta: TAU,
        }
    }

    /// Endpoint-to-center conversion for an SVG `A` command.
    /// `None` when the arc degenerates to a straight line.
    fn from_endpoints(
        from: Point,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) -> Option<Self> {
        let mut rx = rx.abs();
        let mut ry = ry.abs();
        if rx == 0.0 || ry == 0.0 {
            return None;
        }

        let phi = x_axis_rotation.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        let dx2 = (from.x - to.x) / 2.0;
        let dy2 = (from.y - to.y) / 2.0;
        let x1p = cos_phi * dx2 + sin_phi * dy2;
        let y1p = -sin_phi * dx2 + cos_phi * dy2;

        // Radii too small to span the endpoints are scaled up uniformly.
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
        let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
        let coef = if den != 0.0 {
            let sign = if large_arc == sweep { -1.0 } else { 1.0 };
            sign * (num / den).max(0.0).sqrt()
        } else {
            0.0
        };
        let cxp = coef * (rx * y1p / ry);
        let cyp = coef * (-ry * x1p / rx);

        let center = Point::new(
            cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0,
            sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0,
        );

        let angle = |u: Point, v: Point| u.cross(v).atan2(u.dot(v));
        let u = Point::new((x1p - cxp) / rx, (y1p - cyp) / ry);
        let v = Point::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);

        let theta1 = angle(Point::new(1.0, 0.0), u);
        let mut dtheta = angle(u, v);
        if !sweep && dtheta > 0.0 {
            dtheta -= TAU;
        } else if sweep && dtheta < 0.0 {
            dtheta += TAU;
        }

        Some(Self {
            center,
            rx,
            ry,
            phi,
            theta1,
            dtheta,
        })
    }

    fn point_at(&self, theta: f64) -> Point {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_t, cos_t) = theta.sin_cos();
        let x = self.rx * cos_t;
        let y = self.ry * sin_t;
        Point::new(
            self.center.x + cos_phi * x - sin_phi * y,
            self.center.y + sin_phi * x + cos_phi * y,
        )
    }

    fn is_circular(&self) -> bool {
        (self.rx - self.ry).abs() <= CIRCULAR_RADIUS_TOLERANCE * self.rx.max(self.ry)
    }

    /// The arc as a counter-clockwise segment in source space. Only meaningful
    /// for circular arcs.
    fn to_segment(self) -> Segment {
        let radius = (self.rx + self.ry) / 2.0;
        if self.dtheta.abs() >= TAU - 1e-12 {
            return Segment::circle(self.center, radius);
        }
        let start = (self.theta1 + self.phi).to_degrees();
        let sweep = self.dtheta.to_degrees();
        if sweep >= 0.0 {
            Segment::arc(self.center, radius, start, start + sweep)
        } else {
            Segment::arc(self.center, radius, start + sweep, start)
        }
    }

    /// Axis-aligned square around the full ellipse; a cheap extent bound.
    fn bounding_corners(&self) -> [Point; 2] {
        let r = self.rx.max(self.ry);
        [
            Point::new(self.center.x - r, self.center.y - r),
            Point::new(self.center.x + r, self.center.y + r),
        ]
    }
}

/// Source-space drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece {
    Line(Point, Point),
    Cubic([Point; 4]),
    Ellipse(EllipseArc),
}

#[derive(Debug, Default)]
struct RawContour {
    pieces: Vec<Piece>,
    closed: bool,
}

/// Imports one shape.
///
/// `transform` is the shape's effective transform (see `compose_chain`). The
/// result holds one contour per subpath, in target space, never empty.
///
/// # Arguments
///
/// * `shape` - The geometry element and its attributes.
/// * `transform` - Maps shape coordinates to document coordinates.
/// * `options` - Supplies the curve flattening tolerance.
///
/// # Returns
///
/// The shape's contours, or why the shape could not be imported.
pub fn import_shape(
    shape: &ShapeDescriptor,
    transform: &AffineTransform,
    options: &ConversionOptions,
) -> Result<Vec<Contour>, ImportError> {
    let raw = raw_contours(shape)?;
    let tolerance = chord_tolerance(&raw, transform, options);
    debug!(
        "[import_shape] {:?} with {} subpath(s), chord tolerance {}",
        shape.kind,
        raw.len(),
        tolerance
    );

    let contours: Vec<Contour> = raw
        .iter()
        .map(|contour| Contour {
            segments: contour
                .pieces
                .iter()
                .flat_map(|piece| emit_piece(piece, transform, tolerance, options))
                .collect(),
            closed: contour.closed,
        })
        .filter(|contour| !contour.is_empty())
        .collect();

    if contours.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(contours)
}

fn raw_contours(shape: &ShapeDescriptor) -> Result<Vec<RawContour>, ImportError> {
    match (&shape.geometry, shape.kind) {
        (ShapeGeometry::PathData { data }, _) => path_contours(data),
        (ShapeGeometry::Points { points }, kind) => {
            let points = parse_points(points).map_err(|e| ImportError::Points(e.to_string()))?;
            Ok(vec![polyline_contour(&points, kind == ShapeKind::Polygon)])
        }
        (ShapeGeometry::Circle { cx, cy, r }, _) => {
            let cx = circle_coordinate("cx", cx.as_deref())?.unwrap_or(0.0);
            let cy = circle_coordinate("cy", cy.as_deref())?.unwrap_or(0.0);
            let r = circle_coordinate("r", r.as_deref())?.ok_or(ImportError::MissingAttribute("r"))?;
            if r < 0.0 {
                return Err(ImportError::InvalidAttribute {
                    attribute: "r",
                    value: r.to_string(),
                });
            }
            if r == 0.0 {
                return Err(ImportError::Empty);
            }
            Ok(vec![RawContour {
                pieces: vec![Piece::Ellipse(EllipseArc::full_circle(Point::new(cx, cy), r))],
                closed: true,
            }])
        }
        (ShapeGeometry::Missing, kind) => Err(ImportError::MissingAttribute(match kind {
            ShapeKind::Path => "d",
            ShapeKind::Polyline | ShapeKind::Polygon => "points",
            ShapeKind::Circle => "r",
        })),
    }
}

/// Circle attributes accept bare numbers and `px` only.
fn circle_coordinate(attribute: &'static str, value: Option<&str>) -> Result<Option<f64>, ImportError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match Length::parse(raw) {
        Some(Length {
            value,
            unit: LengthUnit::User | LengthUnit::Px,
        }) => Ok(Some(value)),
        _ => Err(ImportError::InvalidAttribute {
            attribute,
            value: raw.to_string(),
        }),
    }
}

fn polyline_contour(points: &[Point], closed: bool) -> RawContour {
    let mut pieces: Vec<Piece> = points.windows(2).map(|w| Piece::Line(w[0], w[1])).collect();
    if closed && points.len() > 2 {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            pieces.push(Piece::Line(last, first));
        }
    }
    RawContour { pieces, closed }
}

fn path_contours(data: &str) -> Result<Vec<RawContour>, ImportError> {
    let commands = parse_path_data(data)?;

    let mut contours = Vec::new();
    let mut current_contour = RawContour::default();
    let mut current = Point::default();
    let mut start = Point::default();

    for command in commands {
        match command {
            PathCommand::MoveTo(p) => {
                if !current_contour.pieces.is_empty() {
                    contours.push(std::mem::take(&mut current_contour));
                }
                current = p;
                start = p;
            }
            PathCommand::LineTo(p) => {
                current_contour.pieces.push(Piece::Line(current, p));
                current = p;
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                current_contour.pieces.push(Piece::Cubic([current, ctrl1, ctrl2, to]));
                current = to;
            }
            PathCommand::QuadTo { ctrl, to } => {
                let c1 = current.add(ctrl.sub(current).scaled(2.0 / 3.0));
                let c2 = to.add(ctrl.sub(to).scaled(2.0 / 3.0));
                current_contour.pieces.push(Piece::Cubic([current, c1, c2, to]));
                current = to;
            }
            PathCommand::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
            } => {
                // Coincident endpoints draw nothing.
                if current != to {
                    let arc = EllipseArc::from_endpoints(
                        current,
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                        to,
                    );
                    current_contour.pieces.push(match arc {
                        Some(arc) => Piece::Ellipse(arc),
                        None => Piece::Line(current, to),
                    });
                }
                current = to;
            }
            PathCommand::Close => {
                if current != start {
                    current_contour.pieces.push(Piece::Line(current, start));
                }
                current_contour.closed = true;
                contours.push(std::mem::take(&mut current_contour));
                current = start;
            }
        }
    }
    if !current_contour.pieces.is_empty() {
        contours.push(current_contour);
    }
    Ok(contours)
}

/// Absolute chord tolerance in target units for this shape.
fn chord_tolerance(raw: &[RawContour], transform: &AffineTransform, options: &ConversionOptions) -> f64 {
    let points = raw
        .iter()
        .flat_map(|contour| contour.pieces.iter())
        .flat_map(|piece| match *piece {
            Piece::Line(a, b) => vec![a, b],
            Piece::Cubic(p) => p.to_vec(),
            Piece::Ellipse(arc) => arc.bounding_corners().to_vec(),
        })
        .map(|p| transform.apply(p));
    let diagonal = point_extents(points).map(|e| e.diagonal()).unwrap_or(0.0);
    (options.chord_tolerance * diagonal).max(MIN_ABSOLUTE_TOLERANCE)
}

fn emit_piece(
    piece: &Piece,
    transform: &AffineTransform,
    tolerance: f64,
    options: &ConversionOptions,
) -> Vec<Segment> {
    match *piece {
        Piece::Line(a, b) => {
            let (a, b) = (transform.apply(a), transform.apply(b));
            if a == b {
                Vec::new()
            } else {
                vec![Segment::line(a, b)]
            }
        }
        Piece::Cubic(p) => {
            let p = p.map(|q| transform.apply(q));
            match circular_arc_of_cubic(&p, tolerance) {
                Some(arc) => vec![arc],
                None => flatten_cubic(&p, tolerance, options.max_flatten_segments),
            }
        }
        Piece::Ellipse(arc) => {
            if arc.is_circular() {
                if let Some(scale) = transform.uniform_scale(options.arc_anisotropy_tolerance) {
                    return vec![arc.to_segment().map_similar(transform, scale)];
                }
                debug!("[import_shape] Flattening circular arc under a non-uniform transform");
            }
            flatten_ellipse(&arc, transform, tolerance, options.max_flatten_segments)
        }
    }
}

fn cubic_point(p: &[Point; 4], t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p[0].x + b * p[1].x + c * p[2].x + d * p[3].x,
        a * p[0].y + b * p[1].y + c * p[2].y + d * p[3].y,
    )
}

fn polyline_segments(points: impl IntoIterator<Item = Point>) -> Vec<Segment> {
    let points: Vec<Point> = points.into_iter().collect();
    points
        .windows(2)
        .filter(|w| w[0] != w[1])
        .map(|w| Segment::line(w[0], w[1]))
        .collect()
}

/// Uniform subdivision with `n = ceil(sqrt(0.75 * M / tolerance))`, where `M` is
/// the largest second difference of the control polygon.
fn flatten_cubic(p: &[Point; 4], tolerance: f64, max_segments: usize) -> Vec<Segment> {
    let dd1 = p[0].sub(p[1].scaled(2.0)).add(p[2]).length();
    let dd2 = p[1].sub(p[2].scaled(2.0)).add(p[3]).length();
    let m = dd1.max(dd2);
    let n = ((0.75 * m / tolerance).sqrt().ceil() as usize).clamp(1, max_segments.max(1));

    let mut points = Vec::with_capacity(n + 1);
    points.push(p[0]);
    for i in 1..n {
        points.push(cubic_point(p, i as f64 / n as f64));
    }
    points.push(p[3]);
    polyline_segments(points)
}

fn flatten_ellipse(
    arc: &EllipseArc,
    transform: &AffineTransform,
    tolerance: f64,
    max_segments: usize,
) -> Vec<Segment> {
    let (sigma1, _) = transform.singular_values();
    let radius = arc.rx.max(arc.ry) * sigma1;
    let n = if radius > tolerance {
        let step = 2.0 * (1.0 - tolerance / radius).acos();
        (arc.dtheta.abs() / step).ceil() as usize
    } else {
        1
    };
    let n = n.clamp(1, max_segments.max(1));

    let points = (0..=n).map(|i| {
        let theta = arc.theta1 + arc.dtheta * i as f64 / n as f64;
        transform.apply(arc.point_at(theta))
    });
    polyline_segments(points)
}

/// Recognises a cubic Bézier that traces a circular arc (within `tolerance`)
/// and returns the equivalent arc segment.
fn circular_arc_of_cubic(p: &[Point; 4], tolerance: f64) -> Option<Segment> {
    let t0 = p[1].sub(p[0]);
    let t1 = p[3].sub(p[2]);
    if t0.length() <= tolerance || t1.length() <= tolerance || p[0].distance(p[3]) <= tolerance {
        return None;
    }

    // Center is where the end normals meet.
    let n0 = Point::new(-t0.y, t0.x);
    let n1 = Point::new(-t1.y, t1.x);
    let denom = n0.cross(n1);
    if denom.abs() <= 1e-12 * t0.length() * t1.length() {
        return None;
    }
    let s = p[3].sub(p[0]).cross(n1) / denom;
    let center = p[0].add(n0.scaled(s));

    let radius = center.distance(p[0]);
    if (center.distance(p[3]) - radius).abs() > tolerance {
        return None;
    }

    let a0 = p[0].sub(center);
    let a3 = p[3].sub(center);
    let start = a0.y.atan2(a0.x).to_degrees();
    let end = a3.y.atan2(a3.x).to_degrees();
    let segment = if a0.cross(t0) > 0.0 {
        Segment::arc(center, radius, start, end)
    } else {
        Segment::arc(center, radius, end, start)
    };
    if segment.sweep() > 180.0 + 1e-9 {
        return None;
    }

    let on_circle = (1..8).all(|i| {
        let q = cubic_point(p, i as f64 / 8.0);
        (q.distance(center) - radius).abs() <= tolerance
    });
    if !on_circle {
        return None;
    }

    // The curve must run through the arc, not around the rest of the circle.
    let Segment::Arc { start_angle, .. } = segment else {
        return None;
    };
    let midpoint = center.polar(radius, start_angle + segment.sweep() / 2.0);
    if midpoint.distance(cubic_point(p, 0.5)) > tolerance {
        return None;
    }
    Some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KAPPA: f64 = 0.552_284_749_830_793_4;

    fn options() -> ConversionOptions {
        ConversionOptions::default()
    }

    fn segments(contours: &[Contour]) -> Vec<Segment> {
        contours.iter().flat_map(|c| c.segments.iter().copied()).collect()
    }

    fn assert_close(actual: f64, expected: f64, eps: f64, what: &str) {
        assert!(
            (actual - expected).abs() <= eps,
            "{what}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identity_import_keeps_raw_coordinates() {
        let shape = ShapeDescriptor::path("M1.5 2 L3 4.25 L-7 0.125 Z");
        let contours = import_shape(&shape, &AffineTransform::identity(), &options()).expect("valid path");
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        assert_eq!(
            contours[0].segments,
            vec![
                Segment::line(Point::new(1.5, 2.0), Point::new(3.0, 4.25)),
                Segment::line(Point::new(3.0, 4.25), Point::new(-7.0, 0.125)),
                Segment::line(Point::new(-7.0, 0.125), Point::new(1.5, 2.0)),
            ]
        );
    }

    #[test]
    fn polygon_closes_and_polyline_does_not() {
        let polygon = ShapeDescriptor::polygon("0,0 10,0 10,10");
        let polyline = ShapeDescriptor::polyline("0,0 10,0 10,10");
        let identity = AffineTransform::identity();
        assert_eq!(segments(&import_shape(&polygon, &identity, &options()).expect("polygon")).len(), 3);
        let open = import_shape(&polyline, &identity, &options()).expect("polyline");
        assert_eq!(open[0].segments.len(), 2);
        assert!(!open[0].closed);
    }

    #[test]
    fn subpaths_become_separate_contours() {
        let shape = ShapeDescriptor::path("M0 0 L1 0 M5 5 L6 5 L6 6 Z");
        let contours = import_shape(&shape, &AffineTransform::identity(), &options()).expect("valid path");
        assert_eq!(contours.len(), 2);
        assert!(!contours[0].closed);
        assert!(contours[1].closed);
    }

    #[test]
    fn circular_arc_command_stays_an_arc() {
        let shape = ShapeDescriptor::path("M10 0 A10 10 0 0 1 0 10");
        let contours = import_shape(&shape, &AffineTransform::identity(), &options()).expect("valid arc");
        match segments(&contours)[..] {
            [Segment::Arc {
                origin,
                radius,
                start_angle,
                end_angle,
            }] => {
                assert_close(origin.x, 0.0, 1e-9, "center x");
                assert_close(origin.y, 0.0, 1e-9, "center y");
                assert_close(radius, 10.0, 1e-9, "radius");
                assert_close(start_angle, 0.0, 1e-9, "start");
                assert_close(end_angle, 90.0, 1e-9, "end");
            }
            ref other => panic!("expected a single arc, got {other:?}"),
        }
    }

    #[test]
    fn counter_sweep_arc_is_normalised_to_ccw() {
        let shape = ShapeDescriptor::path("M0 10 A10 10 0 0 0 10 0");
        let contours = import_shape(&shape, &AffineTransform::identity(), &options()).expect("valid arc");
        match segments(&contours)[..] {
            [Segment::Arc {
                start_angle,
                end_angle,
                ..
            }] => {
                assert_close(start_angle, 0.0, 1e-9, "start");
                assert_close(end_angle, 90.0, 1e-9, "end");
            }
            ref other => panic!("expected a single arc, got {other:?}"),
        }
    }

    #[test]
    fn circle_element_under_uniform_scale() {
        let shape = ShapeDescriptor::circle(5.0, 5.0, 2.0);
        let transform = AffineTransform::scale(3.0, 3.0);
        let contours = import_shape(&shape, &transform, &options()).expect("circle");
        let segs = segments(&contours);
        assert_eq!(segs.len(), 1);
        assert!(segs[0].is_full_circle());
        match segs[0] {
            Segment::Arc { origin, radius, .. } => {
                assert_eq!(origin, Point::new(15.0, 15.0));
                assert_close(radius, 6.0, 1e-12, "radius");
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn anisotropic_transform_flattens_circle_within_tolerance() {
        let shape = ShapeDescriptor::circle(0.0, 0.0, 10.0);
        let transform = AffineTransform::scale(2.0, 1.0);
        let opts = options();
        let contours = import_shape(&shape, &transform, &opts).expect("circle");
        let segs = segments(&contours);
        assert!(segs.len() > 8, "expected a flattened ellipse, got {}", segs.len());
        assert!(segs.iter().all(|s| matches!(s, Segment::Line { .. })));

        // Midpoint of every chord stays within tolerance of the true ellipse.
        let diagonal = (40.0f64.powi(2) + 20.0f64.powi(2)).sqrt();
        let tolerance = opts.chord_tolerance * diagonal;
        for segment in &segs {
            let Segment::Line { origin, end } = *segment else {
                unreachable!()
            };
            let mid = origin.add(end).scaled(0.5);
            let theta = (mid.y / 10.0).atan2(mid.x / 20.0);
            let on_curve = Point::new(20.0 * theta.cos(), 10.0 * theta.sin());
            assert!(
                mid.distance(on_curve) <= tolerance * 1.01,
                "chord error {} exceeds {}",
                mid.distance(on_curve),
                tolerance
            );
        }
    }

    #[test]
    fn quarter_circle_cubic_becomes_arc() {
        let d = format!("M10 0 C10 {k} {k} 10 0 10", k = 10.0 * KAPPA);
        let shape = ShapeDescriptor::path(d);
        let contours = import_shape(&shape, &AffineTransform::identity(), &options()).expect("cubic");
        match segments(&contours)[..] {
            [Segment::Arc {
                origin,
                radius,
                start_angle,
                end_angle,
            }] => {
                assert_close(origin.x, 0.0, 1e-6, "center x");
                assert_close(origin.y, 0.0, 1e-6, "center y");
                assert_close(radius, 10.0, 1e-6, "radius");
                assert_close(start_angle, 0.0, 1e-6, "start");
                assert_close(end_angle, 90.0, 1e-6, "end");
            }
            ref other => panic!("expected one arc, got {other:?}"),
        }
    }

    #[test]
    fn generic_cubic_is_flattened_and_keeps_endpoints() {
        let shape = ShapeDescriptor::path("M0 0 C0 50 100 -50 100 0");
        let contours = import_shape(&shape, &AffineTransform::identity(), &options()).expect("cubic");
        let segs = segments(&contours);
        assert!(segs.len() > 1);
        assert!(segs.iter().all(|s| matches!(s, Segment::Line { .. })));
        match segs.first() {
            Some(Segment::Line { origin, .. }) => assert_eq!(*origin, Point::new(0.0, 0.0)),
            other => panic!("expected a line, got {other:?}"),
        }
        match segs.last() {
            Some(Segment::Line { end, .. }) => assert_eq!(*end, Point::new(100.0, 0.0)),
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn flatten_segment_cap_is_honoured() {
        let shape = ShapeDescriptor::path("M0 0 C0 500 1000 -500 1000 0");
        let opts = options().set_chord_tolerance(1e-9).set_max_flatten_segments(16);
        let contours = import_shape(&shape, &AffineTransform::identity(), &opts).expect("cubic");
        assert_eq!(segments(&contours).len(), 16);
    }

    #[test]
    fn mirrored_arc_keeps_its_path() {
        let shape = ShapeDescriptor::path("M10 0 A10 10 0 0 1 0 10");
        let transform = AffineTransform::scale(-1.0, 1.0);
        let contours = import_shape(&shape, &transform, &options()).expect("arc");
        match segments(&contours)[..] {
            [Segment::Arc {
                start_angle,
                end_angle,
                ..
            }] => {
                // (10,0)->(0,10) mirrors to (-10,0)->(0,10): the 90..180 quadrant.
                assert_close(start_angle, 90.0, 1e-9, "start");
                assert_close(end_angle, 180.0, 1e-9, "end");
            }
            ref other => panic!("expected one arc, got {other:?}"),
        }
    }

    #[test]
    fn unusable_shapes_are_errors() {
        let identity = AffineTransform::identity();
        assert!(matches!(
            import_shape(&ShapeDescriptor::path("M0 0 L"), &identity, &options()),
            Err(ImportError::PathData(_))
        ));
        assert!(matches!(
            import_shape(&ShapeDescriptor::path("M5 5"), &identity, &options()),
            Err(ImportError::Empty)
        ));
        assert!(matches!(
            import_shape(&ShapeDescriptor::polyline("0,0 a,b"), &identity, &options()),
            Err(ImportError::Points(_))
        ));
        assert!(matches!(
            import_shape(&ShapeDescriptor::circle(0.0, 0.0, -1.0), &identity, &options()),
            Err(ImportError::InvalidAttribute { attribute: "r", .. })
        ));
        assert!(matches!(
            import_shape(&ShapeDescriptor::new(ShapeKind::Path, ShapeGeometry::Missing), &identity, &options()),
            Err(ImportError::MissingAttribute("d"))
        ));
    }

    #[test]
    fn degenerate_arc_radius_draws_a_line() {
        let shape = ShapeDescriptor::path("M0 0 A0 5 0 0 1 10 0");
        let contours = import_shape(&shape, &AffineTransform::identity(), &options()).expect("arc");
        assert_eq!(
            segments(&contours),
            vec![Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0))]
        );
    }
}
