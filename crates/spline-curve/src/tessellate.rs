//! Polyline approximations of curves, for drawing splines in editors and
//! debug views.

use spline_math::{Point3, Transform};

use crate::curve::Curve;
use crate::spline::Spline;

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Subdivisions always performed, so S-shaped spans whose midpoint happens
/// to sit on the chord are still refined.
const MIN_DEPTH: u32 = 2;

/// Convert a curve to a polyline using adaptive subdivision.
///
/// The algorithm recursively subdivides spans where the midpoint deviation
/// from the chord exceeds the given `tolerance`.
///
/// # Arguments
/// * `curve` - The curve to tessellate
/// * `tolerance` - Maximum allowed deviation from the true curve
///
/// # Returns
/// A vector of points approximating the curve.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.point_at(t_min)];
    subdivide_curve(curve, t_min, t_max, tolerance, &mut points, 0);
    points
}

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    if depth >= MAX_DEPTH {
        points.push(curve.point_at(t1));
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p1 = curve.point_at(t1);
    let p_mid = curve.point_at(t_mid);

    // Chord midpoint
    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).length();

    if depth < MIN_DEPTH || deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}

/// Polyline through every segment of `spline`, mapped into `frame`.
///
/// Shared anchors between consecutive segments appear once. A looping spline
/// ends where it started. Splines without segments yield no points.
pub fn spline_to_polyline(spline: &Spline, frame: &Transform, tolerance: f64) -> Vec<Point3> {
    let mut points = Vec::new();
    for (i, segment) in spline.segments().enumerate() {
        let skip = usize::from(i > 0);
        points.extend(
            curve_to_polyline(&segment, tolerance)
                .into_iter()
                .skip(skip)
                .map(|p| frame.transform_point(p)),
        );
    }
    points
}
