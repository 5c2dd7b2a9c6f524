//! SVG path data (`d` attribute) to absolute drawing commands.
//!
//! Tokenizing is done by `svgtypes`; this module resolves relative forms,
//! turns `H`/`V` into lines and gives the smooth forms `S`/`T` their reflected
//! control point. Unlike renderers, which draw up to the first error, a syntax
//! error here rejects the whole path so the caller can skip the shape and report it.

use svgtypes::{PathParser, PathSegment};
use thiserror::Error;

use crate::models::Point;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathDataError {
    #[error("path data is empty")]
    Empty,

    #[error("path data must begin with a moveto")]
    MissingMoveTo,

    /// `parsed` counts the segments read before the error.
    #[error("invalid path data after {parsed} segment(s): {message}")]
    Syntax { parsed: usize, message: String },
}

/// One absolute drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    QuadTo {
        ctrl: Point,
        to: Point,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

#[derive(Default)]
struct Cursor {
    current: Point,
    subpath_start: Point,
    last_cubic_ctrl2: Option<Point>,
    last_quad_ctrl: Option<Point>,
}

impl Cursor {
    fn resolve(&self, abs: bool, x: f64, y: f64) -> Point {
        if abs {
            Point::new(x, y)
        } else {
            self.current.add(Point::new(x, y))
        }
    }

    fn reflect(&self, ctrl: Option<Point>) -> Point {
        match ctrl {
            Some(c) => self.current.scaled(2.0).sub(c),
            None => self.current,
        }
    }

    fn absolute(&mut self, segment: PathSegment) -> PathCommand {
        let (command, cubic_ctrl2, quad_ctrl) = match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let p = self.resolve(abs, x, y);
                self.subpath_start = p;
                (PathCommand::MoveTo(p), None, None)
            }
            PathSegment::LineTo { abs, x, y } => {
                (PathCommand::LineTo(self.resolve(abs, x, y)), None, None)
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { self.current.x + x };
                (PathCommand::LineTo(Point::new(x, self.current.y)), None, None)
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { self.current.y + y };
                (PathCommand::LineTo(Point::new(self.current.x, y)), None, None)
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let ctrl2 = self.resolve(abs, x2, y2);
                let command = PathCommand::CubicTo {
                    ctrl1: self.resolve(abs, x1, y1),
                    ctrl2,
                    to: self.resolve(abs, x, y),
                };
                (command, Some(ctrl2), None)
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let ctrl2 = self.resolve(abs, x2, y2);
                let command = PathCommand::CubicTo {
                    ctrl1: self.reflect(self.last_cubic_ctrl2),
                    ctrl2,
                    to: self.resolve(abs, x, y),
                };
                (command, Some(ctrl2), None)
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let ctrl = self.resolve(abs, x1, y1);
                let command = PathCommand::QuadTo {
                    ctrl,
                    to: self.resolve(abs, x, y),
                };
                (command, None, Some(ctrl))
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let ctrl = self.reflect(self.last_quad_ctrl);
                let command = PathCommand::QuadTo {
                    ctrl,
                    to: self.resolve(abs, x, y),
                };
                (command, None, Some(ctrl))
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let command = PathCommand::ArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to: self.resolve(abs, x, y),
                };
                (command, None, None)
            }
            PathSegment::ClosePath { .. } => (PathCommand::Close, None, None),
        };

        self.current = match command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::CubicTo { to, .. }
            | PathCommand::QuadTo { to, .. }
            | PathCommand::ArcTo { to, .. } => to,
            PathCommand::Close => self.subpath_start,
        };
        // Smooth continuations only follow their own curve family.
        self.last_cubic_ctrl2 = cubic_ctrl2;
        self.last_quad_ctrl = quad_ctrl;
        command
    }
}

/// Parses a complete `d` attribute into absolute commands.
///
/// # Arguments
///
/// * `d` - The path data string.
///
/// # Returns
///
/// Every command of the path, or the first syntax error found.
pub fn parse_path_data(d: &str) -> Result<Vec<PathCommand>, PathDataError> {
    let mut cursor = Cursor::default();
    let mut commands = Vec::new();

    for segment in PathParser::from(d) {
        let segment = segment.map_err(|e| PathDataError::Syntax {
            parsed: commands.len(),
            message: e.to_string(),
        })?;
        if commands.is_empty() && !matches!(segment, PathSegment::MoveTo { .. }) {
            return Err(PathDataError::MissingMoveTo);
        }
        commands.push(cursor.absolute(segment));
    }

    if commands.is_empty() {
        return Err(PathDataError::Empty);
    }
    Ok(commands)
}
