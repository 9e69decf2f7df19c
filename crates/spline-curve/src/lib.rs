//! Editable cubic Bezier splines.
//!
//! A [`Spline`] is an ordered list of [`CurvePoint`]s, each an anchor with a
//! left and right handle. Edits keep every anchor colinear with its handles,
//! and sampling maps a normalized time to a position, velocity, or direction
//! in a caller-supplied reference frame.

pub mod curve;
pub mod point;
pub mod spline;
pub mod tessellate;

pub use curve::{CubicBezier, Curve};
pub use point::{CurvePoint, PointKind};
pub use spline::Spline;
