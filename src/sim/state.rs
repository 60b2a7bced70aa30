//! Shared scene state
//!
//! The pointer, the drawing surface, the formation angle and the config.
//! Owned by the swarm and handed to every sword by reference each frame.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sanitize::{sanitize_angle, sanitize_point};
use crate::consts::*;
use crate::settings::SwarmConfig;
use crate::{heading_of, polar_to_cartesian};

/// Drawing surface bounds in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

impl Surface {
    /// Unusable dimensions fall back to the default size
    pub fn new(width: f32, height: f32) -> Self {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        Self {
            width: if usable(width) { width } else { DEFAULT_SURFACE_WIDTH },
            height: if usable(height) { height } else { DEFAULT_SURFACE_HEIGHT },
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Uniform random point inside the surface
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * self.width,
            rng.random::<f32>() * self.height,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Pointer position plus the direction of its last significant movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    /// Latest raw position
    pub position: Vec2,
    /// Position at the last movement that exceeded the jitter threshold
    pub anchor: Vec2,
    /// Direction of that movement (radians)
    pub heading: f32,
}

impl PointerState {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            anchor: position,
            heading: DEFAULT_POINTER_HEADING,
        }
    }

    /// Record a raw pointer sample.
    ///
    /// The heading only changes when the sample is more than
    /// [`POINTER_HEADING_THRESHOLD`] away from the anchor; the position is
    /// always updated. Returns true if the heading changed.
    pub fn record(&mut self, sample: Vec2, surface: &Surface) -> bool {
        if !sample.is_finite() {
            log::debug!("Non-finite pointer sample {:?}, using surface center", sample);
            self.position = sanitize_point(sample, surface.center());
            return false;
        }
        if !self.anchor.is_finite() {
            self.anchor = sample;
        }

        let delta = sample - self.anchor;
        let moved = delta.length() > POINTER_HEADING_THRESHOLD;
        if moved {
            self.heading = heading_of(delta);
            self.anchor = sample;
        }
        self.position = sample;
        moved
    }

    /// Heading with the default substituted if it went bad
    #[inline]
    pub fn heading_or_default(&self) -> f32 {
        sanitize_angle(self.heading, DEFAULT_POINTER_HEADING)
    }

    /// Repair non-finite fields against the surface center
    pub fn repair(&mut self, surface: &Surface) {
        let center = surface.center();
        self.position = sanitize_point(self.position, center);
        self.anchor = sanitize_point(self.anchor, self.position);
        self.heading = self.heading_or_default();
    }
}

/// Everything a sword reads while updating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub surface: Surface,
    pub pointer: PointerState,
    /// Shared angle that rotates every orbit slot (radians)
    pub formation_rotation: f32,
    pub config: SwarmConfig,
}

impl Scene {
    pub fn new(surface: Surface, config: SwarmConfig) -> Self {
        Self {
            pointer: PointerState::new(surface.center()),
            surface,
            formation_rotation: 0.0,
            config,
        }
    }

    /// Pointer position, surface center if it is not finite
    #[inline]
    pub fn pointer_or_center(&self) -> Vec2 {
        sanitize_point(self.pointer.position, self.surface.center())
    }

    /// Orbit radius, default if the configured one is unusable
    pub fn orbit_radius(&self) -> f32 {
        let r = self.config.orbit_radius;
        if r.is_finite() { r } else { DEFAULT_ORBIT_RADIUS }
    }

    /// Angle of the orbit slot for `index` in a swarm of `count`
    pub fn slot_angle(&self, index: usize, count: usize) -> f32 {
        let spacing = if count == 0 { 0.0 } else { TAU / count as f32 };
        self.formation_rotation + spacing * index as f32
    }

    /// Position of the orbit slot for `index` in a swarm of `count`
    pub fn slot_position(&self, index: usize, count: usize) -> Vec2 {
        let slot = self.pointer.position
            + polar_to_cartesian(self.orbit_radius(), self.slot_angle(index, count));
        // A slot that cannot be computed collapses onto the pointer
        sanitize_point(slot, self.pointer_or_center())
    }

    /// Advance the formation rotation by one frame
    pub fn advance_formation(&mut self) {
        // Kept in [0, TAU) so the f32 step never degrades
        self.formation_rotation = (self.formation_rotation + FORMATION_ROTATION_STEP).rem_euclid(TAU);
    }
}
