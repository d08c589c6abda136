//! Collision detection between the giraffe head and falling leaves
//!
//! The head is a circle, a leaf is an axis-aligned rectangle. The test clamps
//! the circle center to the rectangle to find the nearest point, then compares
//! squared distances. Grazing contact at exactly `distance == radius` counts
//! as a hit.

use glam::Vec2;

/// Check overlap between a circle and an axis-aligned rectangle given by its
/// min/max corners.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_min: Vec2, rect_max: Vec2) -> bool {
    let nearest = center.clamp(rect_min, rect_max);
    center.distance_squared(nearest) <= radius * radius
}
