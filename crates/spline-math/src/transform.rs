use crate::{DMat4, DQuat, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Reference frame (scale, rotation, translation) mapping a spline's local
/// space into a consumer's space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    pub fn from_scale_rotation_translation(
        scale: Vector3,
        rotation: DQuat,
        translation: Vector3,
    ) -> Self {
        Self::from_mat4(DMat4::from_scale_rotation_translation(
            scale,
            rotation,
            translation,
        ))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    /// Position of the frame's origin.
    pub fn origin(&self) -> Point3 {
        self.to_mat4().w_axis.truncate()
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    /// Map a point from this frame's space back into local space.
    /// Returns `None` if the frame is singular.
    pub fn inverse_transform_point(&self, p: Point3) -> Option<Point3> {
        self.inverse().map(|inv| inv.transform_point(p))
    }

    pub fn inverse(&self) -> Option<Transform> {
        let m = self.to_mat4();
        if m.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(m.inverse()))
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
