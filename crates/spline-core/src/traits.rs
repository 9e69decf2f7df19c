use crate::error::Result;

/// Check the structural integrity of an entity against a tolerance.
pub trait Validate {
    fn validate(&self, tolerance: crate::Tolerance) -> Result<()>;
}

/// Compute an axis-aligned bounding box.
pub trait BoundingBox {
    type Point;
    fn bounding_box(&self) -> Option<(Self::Point, Self::Point)>;
}
