//! Sword Swarm - a flock of flying swords circling the pointer
//!
//! Core modules:
//! - `sim`: Per-frame motion and attack state machine (pure, no rendering)
//! - `renderer`: Sword silhouette geometry and the WebGPU pipeline
//! - `settings`: User-adjustable swarm configuration
//! - `error`: Attack setup and config change errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AttackError, ConfigError};
pub use settings::{AttackMode, ConfigField, Rgba, SwarmConfig, TrajectoryStyle};

use glam::Vec2;

/// Motion and attack tuning constants
pub mod consts {
    use std::f32::consts::PI;

    /// Lone sword stops chasing the pointer inside this distance (px)
    pub const FOLLOW_STOP_DISTANCE: f32 = 5.0;
    /// Orbiting sword snaps onto its slot inside this distance (px)
    pub const SLOT_SNAP_DISTANCE: f32 = 2.0;
    /// Orbiting sword counts as arrived (mirrors pointer heading) inside this distance (px)
    pub const SLOT_ARRIVED_DISTANCE: f32 = 5.0;
    /// Pointer movement below this is treated as jitter (px)
    pub const POINTER_HEADING_THRESHOLD: f32 = 2.0;
    /// Heading before the pointer has moved: straight up
    pub const DEFAULT_POINTER_HEADING: f32 = -PI / 2.0;

    /// Formation rotation per frame (radians)
    pub const FORMATION_ROTATION_STEP: f32 = 0.05;
    /// Orbit radius used when the configured one is unusable
    pub const DEFAULT_ORBIT_RADIUS: f32 = 50.0;

    /// Wobble oscillator clock increment per frame
    pub const WAVE_CLOCK_STEP: f32 = 0.1;
    pub const WAVE_AMPLITUDE: f32 = 5.0;
    pub const WAVE_FREQUENCY: f32 = 0.5;
    /// Wobble clock wraps at one full oscillation
    pub const WAVE_CLOCK_PERIOD: f32 = 2.0 * PI / WAVE_FREQUENCY;
    /// Scale applied to the wobble before it bends the heading
    pub const WAVE_STEER_SCALE: f32 = 0.2;

    /// Per-sword speed jitter range
    pub const SPEED_FACTOR_MIN: f32 = 0.9;
    pub const SPEED_FACTOR_MAX: f32 = 1.0;

    /// Velocity component magnitude for linear/scatter strikes (px/frame)
    pub const LAUNCH_SPEED: f32 = 20.0;
    /// Flight distance after which a linear/scatter strike ends (px)
    pub const LAUNCH_MAX_DISTANCE: f32 = 800.0;
    /// Total fan width of a scatter strike (60°)
    pub const SCATTER_SPREAD: f32 = PI / 3.0;

    /// Radius of the circle strike (px)
    pub const CIRCLE_RADIUS: f32 = 200.0;
    /// Angular advance of the circle strike per frame (4°)
    pub const CIRCLE_STEP: f32 = 4.0 * PI / 180.0;
    /// Circle strike ends after this much sweep (3 turns)
    pub const CIRCLE_TOTAL_SWEEP: f32 = 3.0 * 2.0 * PI;

    /// Surface size assumed before the host reports one
    pub const DEFAULT_SURFACE_WIDTH: f32 = 1280.0;
    pub const DEFAULT_SURFACE_HEIGHT: f32 = 720.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Direction of a vector in radians (`atan2(y, x)`)
#[inline]
pub fn heading_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Sprite rotation for travel along `direction`.
///
/// The silhouette's tip points along local -y, so the sprite is turned a
/// quarter turn past the travel direction.
#[inline]
pub fn facing(direction: f32) -> f32 {
    direction + std::f32::consts::FRAC_PI_2
}
