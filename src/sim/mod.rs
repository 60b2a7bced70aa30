//! Swarm simulation module
//!
//! All motion and attack logic lives here. This module must stay free of
//! rendering and platform code:
//! - One step per display frame
//! - Seeded RNG only
//! - Swords updated in index order
//! - Bad numbers repaired in place, never propagated

pub mod attack;
pub mod sanitize;
pub mod state;
pub mod swarm;
pub mod sword;

pub use attack::{AttackPlan, AttackState, AttackStep, Flight, Sweep, launch_angle, scatter_offset};
pub use sanitize::{finite_or, repair_position, sanitize_angle, sanitize_point};
pub use state::{PointerState, Scene, Surface};
pub use swarm::{Swarm, SwarmSnapshot, SwordPose};
pub use sword::Sword;
