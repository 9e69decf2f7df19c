//! Cubic Bezier segment.

use spline_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// One cubic Bezier arc between two anchors, parameterized over `[0, 1]`.
///
/// `start_handle` is the right control of the first anchor and `end_handle`
/// the left control of the second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub start: Point3,
    pub start_handle: Point3,
    pub end_handle: Point3,
    pub end: Point3,
}

impl CubicBezier {
    pub fn new(start: Point3, start_handle: Point3, end_handle: Point3, end: Point3) -> Self {
        Self {
            start,
            start_handle,
            end_handle,
            end,
        }
    }

    /// Position at `t` by De Casteljau reduction: two quadratic blends of
    /// the control polygon, then one linear blend between them.
    pub fn position(&self, t: f64) -> Point3 {
        let a = quadratic(self.start, self.start_handle, self.end_handle, t);
        let b = quadratic(self.start_handle, self.end_handle, self.end, t);
        a.lerp(b, t)
    }

    /// First derivative with respect to `t`.
    pub fn derivative(&self, t: f64) -> Vector3 {
        let s = 1.0 - t;
        3.0 * s * s * (self.start_handle - self.start)
            + 6.0 * s * t * (self.end_handle - self.start_handle)
            + 3.0 * t * t * (self.end - self.end_handle)
    }

    pub fn control_points(&self) -> [Point3; 4] {
        [self.start, self.start_handle, self.end_handle, self.end]
    }
}

fn quadratic(p0: Point3, p1: Point3, p2: Point3, t: f64) -> Point3 {
    p0.lerp(p1, t).lerp(p1.lerp(p2, t), t)
}

impl Curve for CubicBezier {
    fn point_at(&self, t: f64) -> Point3 {
        self.position(t)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        self.derivative(t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        self.start == self.end
    }
}
