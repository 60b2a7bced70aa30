//! Attack trajectories
//!
//! A triggered sword carries exactly one [`AttackState`] until the strike
//! runs its course. Linear and scatter strikes share the straight-line
//! [`Flight`]; the circle strike is a [`Sweep`] around a fixed center.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sanitize::{finite_or, sanitize_angle};
use crate::consts::*;
use crate::error::AttackError;
use crate::settings::AttackMode;
use crate::{facing, heading_of, polar_to_cartesian};

/// Straight-line strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Launch position, restored if the flight goes non-finite
    pub origin: Vec2,
    /// Per-frame displacement
    pub velocity: Vec2,
    /// Distance covered so far
    pub traveled: f32,
}

impl Flight {
    fn launch(origin: Vec2, angle: f32) -> Result<Self, AttackError> {
        let velocity = polar_to_cartesian(LAUNCH_SPEED, angle);
        if !velocity.is_finite() {
            return Err(AttackError::NonFiniteLaunch { angle });
        }
        Ok(Self {
            origin,
            velocity,
            traveled: 0.0,
        })
    }

    fn step(&mut self, position: &mut Vec2, heading: &mut f32) -> AttackStep {
        let next = *position + self.velocity;
        if !next.is_finite() {
            *position = self.origin;
            return AttackStep::Aborted;
        }
        *position = next;
        self.traveled += self.velocity.length();
        *heading = facing(heading_of(self.velocity));

        if self.traveled >= LAUNCH_MAX_DISTANCE {
            AttackStep::Finished
        } else {
            AttackStep::Continue
        }
    }
}

/// Circular strike around a fixed center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub center: Vec2,
    pub radius: f32,
    /// Current angle of the sword around the center
    pub angle: f32,
    /// Total angle covered so far
    pub swept: f32,
}

impl Sweep {
    fn around(center: Vec2, from: Vec2) -> Result<Self, AttackError> {
        if !center.is_finite() {
            return Err(AttackError::NonFiniteCenter {
                x: center.x,
                y: center.y,
            });
        }
        Ok(Self {
            center,
            radius: CIRCLE_RADIUS,
            angle: finite_or(heading_of(from - center), 0.0),
            swept: 0.0,
        })
    }

    fn step(&mut self, position: &mut Vec2, heading: &mut f32) -> AttackStep {
        self.angle += CIRCLE_STEP;
        self.swept += CIRCLE_STEP;

        let next = self.center + polar_to_cartesian(self.radius, self.angle);
        if !next.is_finite() {
            return AttackStep::Aborted;
        }
        *position = next;
        // Tangent, blade leading
        *heading = facing(self.angle + PI);

        if self.swept >= CIRCLE_TOTAL_SWEEP {
            AttackStep::Finished
        } else {
            AttackStep::Continue
        }
    }
}

/// Outcome of advancing an attack by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStep {
    /// Still in flight
    Continue,
    /// Ran its full course this frame
    Finished,
    /// Hit bad numbers and was cut short
    Aborted,
}

/// In-flight attack, one variant per strike pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackState {
    Linear(Flight),
    Scatter(Flight),
    Circle(Sweep),
}

/// Inputs needed to plan a strike for one sword
#[derive(Debug, Clone, Copy)]
pub struct AttackPlan {
    pub mode: AttackMode,
    /// Sword position at trigger time
    pub origin: Vec2,
    /// Sword heading at trigger time
    pub heading: f32,
    pub index: usize,
    pub total: usize,
    pub pointer_heading: f32,
    /// Pointer position at trigger time
    pub pointer: Vec2,
    /// Used when the pointer position is unusable
    pub surface_center: Vec2,
}

impl AttackState {
    /// Build the attack for one sword
    pub fn plan(plan: &AttackPlan) -> Result<Self, AttackError> {
        if !plan.origin.is_finite() {
            return Err(AttackError::NonFiniteOrigin {
                x: plan.origin.x,
                y: plan.origin.y,
            });
        }

        let base = launch_angle(plan.pointer_heading, plan.heading);
        match plan.mode {
            AttackMode::Linear => Ok(AttackState::Linear(Flight::launch(plan.origin, base)?)),
            AttackMode::Scatter => {
                let angle = base + scatter_offset(plan.index, plan.total);
                Ok(AttackState::Scatter(Flight::launch(plan.origin, angle)?))
            }
            AttackMode::Circle => {
                let center = if plan.pointer.is_finite() {
                    plan.pointer
                } else {
                    plan.surface_center
                };
                Ok(AttackState::Circle(Sweep::around(center, plan.origin)?))
            }
        }
    }

    pub fn mode(&self) -> AttackMode {
        match self {
            AttackState::Linear(_) => AttackMode::Linear,
            AttackState::Scatter(_) => AttackMode::Scatter,
            AttackState::Circle(_) => AttackMode::Circle,
        }
    }

    /// Advance one frame, moving the sword
    pub fn step(&mut self, position: &mut Vec2, heading: &mut f32) -> AttackStep {
        match self {
            AttackState::Linear(flight) | AttackState::Scatter(flight) => {
                flight.step(position, heading)
            }
            AttackState::Circle(sweep) => sweep.step(position, heading),
        }
    }
}

/// Base launch direction.
///
/// Pointer heading first, then the sword's own travel direction
/// (heading minus the sprite quarter turn), then straight up.
pub fn launch_angle(pointer_heading: f32, sword_heading: f32) -> f32 {
    if pointer_heading.is_finite() {
        pointer_heading
    } else {
        sanitize_angle(sword_heading - PI / 2.0, DEFAULT_POINTER_HEADING)
    }
}

/// Fan offset for sword `index` of `total` in a scatter strike
pub fn scatter_offset(index: usize, total: usize) -> f32 {
    if total <= 1 {
        return 0.0;
    }
    -SCATTER_SPREAD / 2.0 + (SCATTER_SPREAD / (total - 1) as f32) * index as f32
}
