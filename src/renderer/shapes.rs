//! Sword silhouette geometry
//!
//! The blade outline is fixed; only the pivot transform and the stroke
//! colour change per sword. Outlines are stroked as triangle-list quads,
//! with a couple of wide translucent passes underneath for the glow.

use glam::{Affine2, Vec2};

use super::vertex::Vertex;
use crate::settings::Rgba;
use crate::sim::{Swarm, SwordPose};

/// Blade length from guard to shoulder of the tip
pub const BLADE_LENGTH: f32 = 60.0;
pub const BLADE_WIDTH: f32 = 10.0;
pub const TIP_LENGTH: f32 = 15.0;
pub const HANDLE_LENGTH: f32 = 15.0;
pub const GUARD_WIDTH: f32 = 20.0;

/// Core stroke width (px)
pub const STROKE_WIDTH: f32 = 2.0;
/// Glow passes drawn under the core stroke: (width, alpha)
pub const GLOW_PASSES: [(f32, f32); 2] = [(10.0, 0.12), (5.0, 0.3)];

const HALF_LEN: f32 = BLADE_LENGTH / 2.0;
const HALF_WIDTH: f32 = BLADE_WIDTH / 2.0;
const HALF_GUARD: f32 = GUARD_WIDTH / 2.0;
const GRIP: f32 = HALF_WIDTH - 2.0;
const GUARD_TOP: f32 = HALF_LEN + 2.0;
const GUARD_BOTTOM: f32 = HALF_LEN + 5.0;
const POMMEL: f32 = GUARD_BOTTOM + HANDLE_LENGTH;

/// Closed outline in pivot-local space, tip first, clockwise on screen
pub const SWORD_OUTLINE: [Vec2; 15] = [
    // tip
    Vec2::new(0.0, -HALF_LEN - TIP_LENGTH),
    // right edge
    Vec2::new(HALF_WIDTH, -HALF_LEN),
    Vec2::new(HALF_WIDTH, HALF_LEN),
    // right guard
    Vec2::new(HALF_GUARD, GUARD_TOP),
    Vec2::new(HALF_GUARD, GUARD_BOTTOM),
    Vec2::new(HALF_WIDTH, GUARD_BOTTOM),
    // right handle
    Vec2::new(GRIP, GUARD_BOTTOM),
    Vec2::new(GRIP, POMMEL),
    // tail
    Vec2::new(-GRIP, POMMEL),
    // left handle
    Vec2::new(-GRIP, GUARD_BOTTOM),
    Vec2::new(-HALF_WIDTH, GUARD_BOTTOM),
    // left guard
    Vec2::new(-HALF_GUARD, GUARD_BOTTOM),
    Vec2::new(-HALF_GUARD, GUARD_TOP),
    Vec2::new(-HALF_WIDTH, HALF_LEN),
    // left edge
    Vec2::new(-HALF_WIDTH, -HALF_LEN),
];

/// Translate to `position`, then rotate by `heading`
#[inline]
pub fn pivot(position: Vec2, heading: f32) -> Affine2 {
    Affine2::from_angle_translation(heading, position)
}

/// The outline placed in world space
pub fn sword_outline(transform: &Affine2) -> [Vec2; 15] {
    SWORD_OUTLINE.map(|p| transform.transform_point2(p))
}

/// Append a stroked closed polygon as triangle-list quads.
///
/// Each edge is extended by half the width at both ends so corners meet
/// without gaps.
pub fn stroke_closed_path(out: &mut Vec<Vertex>, points: &[Vec2], width: f32, color: [f32; 4]) {
    if points.len() < 2 {
        return;
    }
    let half = width / 2.0;
    out.reserve(points.len() * 6);

    for (i, &p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let perp = Vec2::new(-dir.y, dir.x) * half;
        let a = p1 - dir * half;
        let b = p2 + dir * half;

        let v1a = a + perp;
        let v1b = a - perp;
        let v2a = b + perp;
        let v2b = b - perp;

        // Two triangles
        out.extend([v1a, v1b, v2a, v2a, v1b, v2b].map(|p| Vertex::at(p, color)));
    }
}

/// Draw one glowing sword outline at `transform`
pub fn draw_sword(out: &mut Vec<Vertex>, transform: &Affine2, color: Rgba) {
    let outline = sword_outline(transform);
    for (width, alpha) in GLOW_PASSES {
        stroke_closed_path(out, &outline, width, color.with_alpha(alpha));
    }
    stroke_closed_path(out, &outline, STROKE_WIDTH, color.0);
}

/// Draw one sword from its pose
#[inline]
pub fn draw_pose(out: &mut Vec<Vertex>, pose: &SwordPose, color: Rgba) {
    draw_sword(out, &pivot(pose.position, pose.heading), color);
}

/// All swords for this frame, in index order, in pixel coordinates
pub fn frame_vertices(swarm: &Swarm) -> Vec<Vertex> {
    let color = swarm.config().stroke_color();
    let per_sword = SWORD_OUTLINE.len() * 6 * (GLOW_PASSES.len() + 1);
    let mut vertices = Vec::with_capacity(swarm.len() * per_sword);
    for pose in swarm.poses() {
        draw_pose(&mut vertices, &pose, color);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SwarmConfig;
    use crate::sim::Surface;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_outline_shape() {
        assert_eq!(SWORD_OUTLINE[0], Vec2::new(0.0, -45.0));
        assert_eq!(SWORD_OUTLINE[7], Vec2::new(3.0, 50.0));
        // Left half mirrors the right half
        for i in 1..SWORD_OUTLINE.len() {
            let mirror = SWORD_OUTLINE[SWORD_OUTLINE.len() - i];
            assert_eq!(SWORD_OUTLINE[i].x, -mirror.x);
            assert_eq!(SWORD_OUTLINE[i].y, mirror.y);
        }
    }

    #[test]
    fn test_pivot_points_tip_along_travel() {
        // Heading for travel along +x is a quarter turn
        let outline = sword_outline(&pivot(Vec2::new(100.0, 50.0), FRAC_PI_2));
        let tip = outline[0];
        assert!((tip - Vec2::new(145.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn test_stroke_vertex_count() {
        let mut out = Vec::new();
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        stroke_closed_path(&mut out, &square, 2.0, [1.0; 4]);
        assert_eq!(out.len(), 4 * 6);

        // Degenerate edges are skipped
        let mut out = Vec::new();
        stroke_closed_path(&mut out, &[Vec2::ZERO, Vec2::ZERO], 2.0, [1.0; 4]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_draw_sword_glow_then_core() {
        let mut out = Vec::new();
        draw_sword(&mut out, &Affine2::IDENTITY, Rgba::CYAN);
        let per_pass = SWORD_OUTLINE.len() * 6;
        assert_eq!(out.len(), per_pass * 3);
        assert_eq!(out[0].color[3], GLOW_PASSES[0].1);
        assert_eq!(out[out.len() - 1].color, Rgba::CYAN.0);
    }

    #[test]
    fn test_frame_vertices_per_sword() {
        let config = SwarmConfig {
            count: 3,
            color: "#ff0000".to_string(),
            ..Default::default()
        };
        let swarm = Swarm::new(9, Surface::new(800.0, 600.0), config);
        let vertices = frame_vertices(&swarm);
        assert_eq!(vertices.len(), 3 * SWORD_OUTLINE.len() * 6 * 3);
        assert!(vertices.iter().all(|v| v.color[0] == 1.0 && v.color[1] == 0.0));
    }
}
