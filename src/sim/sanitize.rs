//! Finite-value repair
//!
//! Degenerate geometry (zero-length vectors, NaN config) must never leak
//! past a frame. Every checkpoint in the sim funnels through these helpers.

use glam::Vec2;
use rand::Rng;

use super::state::Surface;

/// `value` if finite, otherwise `fallback`
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Angle repair; identical to [`finite_or`] but reads better at call sites
#[inline]
pub fn sanitize_angle(angle: f32, fallback: f32) -> f32 {
    finite_or(angle, fallback)
}

/// Component-wise point repair against a fixed fallback
#[inline]
pub fn sanitize_point(point: Vec2, fallback: Vec2) -> Vec2 {
    Vec2::new(finite_or(point.x, fallback.x), finite_or(point.y, fallback.y))
}

/// Replace a non-finite point with a random in-bounds one.
///
/// Returns the repaired point and whether it was replaced.
pub fn repair_position<R: Rng + ?Sized>(point: Vec2, surface: &Surface, rng: &mut R) -> (Vec2, bool) {
    if point.is_finite() {
        return (point, false);
    }
    (surface.random_point(rng), true)
}
