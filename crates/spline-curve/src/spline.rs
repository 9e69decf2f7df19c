//! Editable cubic Bezier spline.
//!
//! Segment `i` runs from anchor `i` to anchor `(i + 1) % n`, shaped by the
//! right control of the first point and the left control of the second. All
//! positions are stored in the spline's local space; reference frames are
//! applied only on the way out (or, for world-space edits, on the way in).

use spline_core::error::{Result, SplineError};
use spline_core::traits::{BoundingBox, Validate};
use spline_core::Tolerance;
use spline_math::{Aabb3, Point3, Transform, Vector3};
use serde::{Deserialize, Serialize};

use crate::curve::CubicBezier;
use crate::point::{CurvePoint, PointKind};

/// Ordered sequence of [`CurvePoint`]s joined by cubic Bezier segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    points: Vec<CurvePoint>,
    #[serde(default)]
    is_looping: bool,
    #[serde(default = "default_handle_distance")]
    handle_distance: f64,
}

fn default_handle_distance() -> f64 {
    Spline::DEFAULT_HANDLE_DISTANCE
}

impl Spline {
    /// Distance of freshly created handles from their anchor.
    pub const DEFAULT_HANDLE_DISTANCE: f64 = 0.3;

    /// Create a two-point spline laid out along the X axis around `origin`.
    ///
    /// The first anchor sits at `origin + 2d·X` and the second at
    /// `origin - 2d·X`, where `d` is [`Self::DEFAULT_HANDLE_DISTANCE`].
    pub fn new(origin: Point3) -> Self {
        Self::with_handle_distance(origin, Self::DEFAULT_HANDLE_DISTANCE)
    }

    pub fn with_handle_distance(origin: Point3, handle_distance: f64) -> Self {
        let mut spline = Self {
            points: Vec::with_capacity(2),
            is_looping: false,
            handle_distance,
        };
        let offset = Vector3::X * handle_distance * 2.0;
        spline.add_point(origin + offset);
        spline.add_point(origin - offset);
        spline
    }

    /// Rebuild a spline from previously stored points and settings.
    pub fn from_points(
        points: Vec<CurvePoint>,
        is_looping: bool,
        handle_distance: f64,
    ) -> Self {
        Self {
            points,
            is_looping,
            handle_distance,
        }
    }

    pub fn total_points(&self) -> usize {
        self.points.len()
    }

    pub fn total_segments(&self) -> usize {
        match self.points.len() {
            0 => 0,
            n if self.is_looping => n,
            n => n - 1,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn set_looping(&mut self, is_looping: bool) {
        self.is_looping = is_looping;
    }

    pub fn handle_distance(&self) -> f64 {
        self.handle_distance
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Position of one point, mapped through `frame` when given.
    ///
    /// An empty spline answers with the zero vector for any index.
    pub fn point_at(
        &self,
        index: usize,
        kind: PointKind,
        frame: Option<&Transform>,
    ) -> Result<Point3> {
        if self.points.is_empty() {
            return Ok(Point3::ZERO);
        }
        let local = self.points_at(index)?.get(kind);
        Ok(match frame {
            Some(frame) => frame.transform_point(local),
            None => local,
        })
    }

    pub fn points_at(&self, index: usize) -> Result<&CurvePoint> {
        self.points
            .get(index)
            .ok_or_else(|| SplineError::out_of_range(index, self.points.len()))
    }

    /// Append a point at `anchor`.
    ///
    /// The new handles lie on the line from the previous point's right
    /// handle through `anchor`, so the curve carries on in the direction it
    /// was heading. The first point of an empty spline gets handles along X.
    pub fn add_point(&mut self, anchor: Point3) {
        let d = self.handle_distance;
        let point = match self.points.last() {
            None => CurvePoint::new(anchor, anchor + Vector3::X * d, anchor - Vector3::X * d),
            Some(last) => {
                let dir = (anchor - last.right_control()).normalize_or_zero();
                CurvePoint::new(anchor, anchor - dir * d, anchor + dir * d)
            }
        };
        self.points.push(point);
        log::debug!(
            "Spline: appended point {} at {:?}",
            self.points.len() - 1,
            anchor
        );
    }

    /// Append a point one unit beyond the last point's right handle, along
    /// the last point's outgoing tangent.
    pub fn add_point_to_end(&mut self) -> Result<()> {
        let last = self
            .points
            .last()
            .ok_or(SplineError::EmptySpline("add_point_to_end"))?;
        let outgoing = (last.right_control() - last.anchor()).normalize_or_zero();
        let target = last.right_control() + outgoing;
        self.add_point(target);
        Ok(())
    }

    /// Insert a point after `index`.
    ///
    /// The new anchor sits one unit past the right handle of `index`, heading
    /// toward the left handle of the following point, with its handles along
    /// that heading. Inserting after the last point appends instead.
    pub fn insert_point(&mut self, index: usize) -> Result<()> {
        let len = self.points.len();
        if index >= len {
            return Err(SplineError::out_of_range(index, len));
        }
        if index == len - 1 {
            return self.add_point_to_end();
        }

        let from = self.points[index].right_control();
        let to = self.points[index + 1].left_control();
        let dir = (to - from).normalize_or_zero();
        let anchor = from + dir;
        let d = self.handle_distance;

        let point = CurvePoint::new(anchor, anchor - dir * d, anchor + dir * d);
        self.points.insert(index + 1, point);
        log::debug!("Spline: inserted point {} at {:?}", index + 1, anchor);
        Ok(())
    }

    /// Remove the point at `index`. No minimum point count is enforced.
    pub fn remove_point(&mut self, index: usize) -> Result<CurvePoint> {
        if index >= self.points.len() {
            return Err(SplineError::out_of_range(index, self.points.len()));
        }
        let removed = self.points.remove(index);
        log::debug!(
            "Spline: removed point {}, {} remaining",
            index,
            self.points.len()
        );
        Ok(removed)
    }

    /// Move one position of a point while keeping the curve smooth there.
    ///
    /// Moving the anchor carries both handles along rigidly. Moving a handle
    /// swings the opposite handle onto the line through the anchor, keeping
    /// the opposite handle's distance from the anchor.
    pub fn set_point_position(
        &mut self,
        index: usize,
        kind: PointKind,
        position: Point3,
    ) -> Result<()> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or_else(|| SplineError::out_of_range(index, len))?;

        match kind.opposite() {
            None => {
                let delta = position - point.anchor();
                point.translate(delta);
            }
            Some(other) => {
                let anchor = point.anchor();
                let distance = (point.get(other) - anchor).length();
                let dir = (anchor - position).normalize_or_zero();
                if dir == Vector3::ZERO {
                    // Handle dropped onto its anchor: no tangent to mirror.
                    log::warn!(
                        "Spline: {:?} of point {} moved onto its anchor, {:?} left in place",
                        kind,
                        index,
                        other
                    );
                } else {
                    log::trace!("Spline: mirroring {:?} of point {}", other, index);
                    point.set(other, anchor + dir * distance);
                }
            }
        }
        point.set(kind, position);
        Ok(())
    }

    /// Same as [`Self::set_point_position`] with `position` given in the
    /// space of `frame`.
    pub fn set_point_position_world(
        &mut self,
        index: usize,
        kind: PointKind,
        position: Point3,
        frame: &Transform,
    ) -> Result<()> {
        let local = frame.inverse_transform_point(position).ok_or_else(|| {
            SplineError::InvalidOperation("reference frame is not invertible".into())
        })?;
        self.set_point_position(index, kind, local)
    }

    /// Index of the anchor closest to `position` (local space).
    pub fn nearest_point_index(&self, position: Point3) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.anchor().distance_squared(position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Control points of segment `index`, `0 <= index < total_segments()`.
    pub fn segment(&self, index: usize) -> Result<CubicBezier> {
        let count = self.total_segments();
        if index >= count {
            return Err(SplineError::out_of_range(index, count));
        }
        Ok(self.wrapped_segment(index))
    }

    /// All segments in traversal order, including the closing one when looping.
    pub fn segments(&self) -> impl Iterator<Item = CubicBezier> + '_ {
        (0..self.total_segments()).map(move |i| self.wrapped_segment(i))
    }

    /// Segment starting at point `index % n`. Callers ensure `n > 0`.
    fn wrapped_segment(&self, index: usize) -> CubicBezier {
        let n = self.points.len();
        let a = &self.points[index % n];
        let b = &self.points[(index + 1) % n];
        CubicBezier::new(a.anchor(), a.right_control(), b.left_control(), b.anchor())
    }

    /// Resolve normalized time `t` to a segment and the parameter within it.
    ///
    /// Looping splines wrap any `t`; open splines clamp it to `[0, 1]`. The
    /// upper end of an open spline resolves to the start of the wrapped
    /// segment after the last point.
    fn locate(&self, t: f64, op: &'static str) -> Result<(CubicBezier, f64)> {
        let n = self.points.len();
        if n == 0 {
            return Err(SplineError::EmptySpline(op));
        }

        let segments = self.total_segments();
        if segments == 0 {
            let a = self.points[0].anchor();
            return Ok((CubicBezier::new(a, a, a, a), 0.0));
        }

        let t = if self.is_looping { t } else { t.clamp(0.0, 1.0) };
        let scaled = t * segments as f64;
        let whole = scaled.floor();
        let index = (whole as i64).rem_euclid(n as i64) as usize;
        Ok((self.wrapped_segment(index), scaled - whole))
    }

    /// Position at normalized time `t`, in the space of `frame`.
    pub fn position_for_time(&self, t: f64, frame: &Transform) -> Result<Point3> {
        let (segment, u) = self.locate(t, "position_for_time")?;
        Ok(frame.transform_point(segment.position(u)))
    }

    /// Derivative with respect to the segment parameter at normalized time
    /// `t`, in the space of `frame`.
    pub fn velocity_for_time(&self, t: f64, frame: &Transform) -> Result<Vector3> {
        let (segment, u) = self.locate(t, "velocity_for_time")?;
        Ok(frame.transform_point(segment.derivative(u)) - frame.origin())
    }

    /// Unit direction of travel at `t`. Zero where the velocity vanishes.
    pub fn direction_for_time(&self, t: f64, frame: &Transform) -> Result<Vector3> {
        Ok(self.velocity_for_time(t, frame)?.normalize_or_zero())
    }

    /// Bounds of every anchor and handle; they contain the whole curve.
    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(self.points.iter().flat_map(|p| p.iter().map(|(_, v)| v)))
    }
}

impl Default for Spline {
    fn default() -> Self {
        Self::new(Point3::ZERO)
    }
}

impl BoundingBox for Spline {
    type Point = Point3;

    fn bounding_box(&self) -> Option<(Point3, Point3)> {
        self.bounds().map(|b| (b.min, b.max))
    }
}

impl Validate for Spline {
    fn validate(&self, tolerance: Tolerance) -> Result<()> {
        if !(self.handle_distance.is_finite() && self.handle_distance > 0.0) {
            return Err(SplineError::Geometry(format!(
                "handle distance must be positive, got {}",
                self.handle_distance
            )));
        }

        for (i, point) in self.points.iter().enumerate() {
            if let Some((kind, _)) = point.iter().find(|(_, p)| !p.is_finite()) {
                return Err(SplineError::Geometry(format!(
                    "point {} has a non-finite {:?}",
                    i, kind
                )));
            }

            let incoming = point.anchor() - point.left_control();
            let outgoing = point.right_control() - point.anchor();
            let (li, lo) = (incoming.length(), outgoing.length());
            if tolerance.is_zero(li) || tolerance.is_zero(lo) {
                continue;
            }

            let sin = incoming.cross(outgoing).length() / (li * lo);
            if incoming.dot(outgoing) <= 0.0 || sin > tolerance.angular {
                return Err(SplineError::Tolerance(format!(
                    "handles of point {} are not colinear with its anchor",
                    i
                )));
            }
        }
        Ok(())
    }
}
