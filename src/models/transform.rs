use serde::{Deserialize, Serialize};

use super::vector::Point;

/// A 2D affine map with an implied last row of `[ 0 0 1 ]`.
///
/// Formula:
/// x' = a * x + c * y + e;
/// y' = b * x + d * y + f;
///
/// Skewed matrices are always applied as-is; `decompose` is only a reporting aid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

/// Translate / rotate / scale view of an `AffineTransform`.
/// Scale signs follow the diagonal terms so mirrored shapes stay mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decomposition {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation in degrees, `atan2(b, a)` after removing the sign of `scale_x`.
    pub rotation: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin, angle in degrees (positive turns +x towards +y).
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `translate(cx, cy) · rotate(angle) · translate(-cx, -cy)`.
    pub fn rotate_about(degrees: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy)
            .multiply(&Self::rotate(degrees))
            .multiply(&Self::translate(-cx, -cy))
    }

    /// Matrix product `self · other`: the result applies `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Applies `self` first and `next` afterwards.
    pub fn then(&self, next: &Self) -> Self {
        next.multiply(self)
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Applies only the linear part (no translation), for direction vectors.
    pub fn apply_vector(&self, v: Point) -> Point {
        Point::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn decompose(&self) -> Decomposition {
        let sign = if self.a < 0.0 { -1.0 } else { 1.0 };
        let scale_x = sign * self.a.hypot(self.b);
        let scale_y = if scale_x != 0.0 {
            self.determinant() / scale_x
        } else {
            // Degenerate first column; fall back to the second column's length.
            let sign_y = if self.d < 0.0 { -1.0 } else { 1.0 };
            sign_y * self.c.hypot(self.d)
        };
        let rotation = if scale_x != 0.0 {
            (self.b / scale_x).atan2(self.a / scale_x).to_degrees()
        } else {
            0.0
        };
        Decomposition {
            translate_x: self.e,
            translate_y: self.f,
            scale_x,
            scale_y,
            rotation,
        }
    }

    /// Singular values `(σ1, σ2)` of the linear part, `σ1 >= σ2 >= 0`.
    /// A circle maps to an ellipse with these semi-axis factors.
    pub fn singular_values(&self) -> (f64, f64) {
        let p = (self.a * self.a + self.b * self.b + self.c * self.c + self.d * self.d) / 2.0;
        let det = self.determinant().abs();
        let q = (p * p - det * det).max(0.0).sqrt();
        let s1 = (p + q).sqrt();
        let s2 = (p - q).max(0.0).sqrt();
        (s1, s2)
    }

    /// Returns the averaged uniform scale when the transform maps circles to
    /// circles within `tolerance` (relative difference of the principal scales).
    pub fn uniform_scale(&self, tolerance: f64) -> Option<f64> {
        let (s1, s2) = self.singular_values();
        if s1 <= f64::EPSILON {
            return None;
        }
        if (s1 - s2) / s1 <= tolerance {
            Some((s1 + s2) / 2.0)
        } else {
            None
        }
    }

    /// Maps a direction angle (degrees) through the linear part.
    pub fn map_angle(&self, degrees: f64) -> f64 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let v = self.apply_vector(Point::new(cos, sin));
        v.y.atan2(v.x).to_degrees()
    }
}
