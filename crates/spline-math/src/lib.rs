pub mod aabb;
pub mod transform;

pub use glam::{dvec3, DMat4, DQuat, DVec3};
pub use aabb::Aabb3;
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
