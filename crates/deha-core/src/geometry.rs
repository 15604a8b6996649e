//! Joint-angle geometry.

use nalgebra::Vector2;

use crate::types::Point2D;

/// Unsigned angle between two vectors, in degrees within [0, 180].
///
/// A zero-length vector yields 0 rather than an error: a collapsed or
/// occluded joint reads as fully bent.
pub fn angle_between(v1: &Vector2<f64>, v2: &Vector2<f64>) -> f64 {
    let norms = v1.norm() * v2.norm();
    if norms == 0.0 {
        return 0.0;
    }
    (v1.dot(v2) / norms).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Interior angle ABC measured at vertex `b`, in degrees within [0, 180]
pub fn angle_at(a: &Point2D, b: &Point2D, c: &Point2D) -> f64 {
    angle_between(&a.offset_from(b), &c.offset_from(b))
}
