//! Anchor points with their two control handles.

use std::ops::{Index, IndexMut};

use spline_math::{Point3, Transform, Vector3};
use serde::{Deserialize, Serialize};

/// Which of the three positions of a [`CurvePoint`] is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    Anchor,
    LeftControl,
    RightControl,
}

impl PointKind {
    pub const ALL: [PointKind; 3] = [
        PointKind::Anchor,
        PointKind::LeftControl,
        PointKind::RightControl,
    ];

    const fn slot(self) -> usize {
        match self {
            PointKind::Anchor => 0,
            PointKind::LeftControl => 1,
            PointKind::RightControl => 2,
        }
    }

    /// The handle on the other side of the anchor. `None` for the anchor itself.
    pub fn opposite(self) -> Option<PointKind> {
        match self {
            PointKind::Anchor => None,
            PointKind::LeftControl => Some(PointKind::RightControl),
            PointKind::RightControl => Some(PointKind::LeftControl),
        }
    }
}

/// An anchor with a left and a right control handle, in the local space of
/// the owning spline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    points: [Point3; 3],
}

impl CurvePoint {
    pub fn new(anchor: Point3, left_control: Point3, right_control: Point3) -> Self {
        Self {
            points: [anchor, left_control, right_control],
        }
    }

    pub fn get(&self, kind: PointKind) -> Point3 {
        self.points[kind.slot()]
    }

    /// Overwrite one position. The other two are left untouched.
    pub fn set(&mut self, kind: PointKind, value: Point3) {
        self.points[kind.slot()] = value;
    }

    pub fn anchor(&self) -> Point3 {
        self.get(PointKind::Anchor)
    }

    pub fn left_control(&self) -> Point3 {
        self.get(PointKind::LeftControl)
    }

    pub fn right_control(&self) -> Point3 {
        self.get(PointKind::RightControl)
    }

    /// Move all three positions by `delta`.
    pub fn translate(&mut self, delta: Vector3) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    /// Unit direction from the left control toward the point of `kind`,
    /// optionally measured after mapping both ends through `frame`.
    ///
    /// The direction is always taken relative to the left control, so
    /// `PointKind::LeftControl` yields the zero vector, as does any point
    /// coinciding with its left control.
    pub fn forward_direction(&self, kind: PointKind, frame: Option<&Transform>) -> Vector3 {
        let from = self.left_control();
        let to = self.get(kind);
        match frame {
            Some(frame) => {
                (frame.transform_point(to) - frame.transform_point(from)).normalize_or_zero()
            }
            None => (to - from).normalize_or_zero(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointKind, Point3)> + '_ {
        PointKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

impl Index<PointKind> for CurvePoint {
    type Output = Point3;

    fn index(&self, kind: PointKind) -> &Point3 {
        &self.points[kind.slot()]
    }
}

impl IndexMut<PointKind> for CurvePoint {
    fn index_mut(&mut self, kind: PointKind) -> &mut Point3 {
        &mut self.points[kind.slot()]
    }
}
