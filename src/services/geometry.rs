/// Joint geometry primitives
///
/// Stateless helpers over normalized image coordinates:
/// - Joint angle from three landmarks (bearing difference)
/// - Horizontal separation between two landmarks
///
/// Coincident points are not an error: `atan2(0, 0)` is 0, so a ray of zero
/// length has bearing 0 and the angle is measured against that.

use crate::models::LandmarkPoint;

/// Unsigned angle at `mid`, in degrees, between the rays towards `first`
/// and `last`
///
/// # Returns
/// A value in [0, 180]; NaN if any coordinate is NaN or infinite
pub fn angle_at(first: &LandmarkPoint, mid: &LandmarkPoint, last: &LandmarkPoint) -> f64 {
    // atan2 maps infinite components to finite bearings
    if !(first.is_finite() && mid.is_finite() && last.is_finite()) {
        return f64::NAN;
    }

    let first_bearing = bearing(mid, first);
    let last_bearing = bearing(mid, last);

    let mut degrees = (last_bearing - first_bearing).to_degrees().abs();
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }

    // Keeps -0.0 bearings and to_degrees rounding inside the range; NaN passes through
    degrees.clamp(0.0, 180.0)
}

/// Absolute difference of x-coordinates
///
/// Camera-relative proxy for how far a knee sits from the hip line.
pub fn horizontal_distance(a: &LandmarkPoint, b: &LandmarkPoint) -> f64 {
    (f64::from(a.x) - f64::from(b.x)).abs()
}

/// Bearing in radians of the ray `from` -> `to`
fn bearing(from: &LandmarkPoint, to: &LandmarkPoint) -> f64 {
    let dy = f64::from(to.y) - f64::from(from.y);
    let dx = f64::from(to.x) - f64::from(from.x);
    dy.atan2(dx)
}
