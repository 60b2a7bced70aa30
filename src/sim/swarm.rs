//! Swarm coordinator
//!
//! Owns the swords and the shared scene, turns host events (pointer, controls,
//! resize, attack button) into state changes and advances everything once
//! per frame in index order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Scene, Surface};
use super::sword::Sword;
use crate::error::ConfigError;
use crate::settings::{AttackMode, ConfigField, SwarmConfig};

/// Resolved transform of one sword, what the renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwordPose {
    pub position: Vec2,
    pub heading: f32,
    /// Strike pattern if the sword is mid-attack
    pub attack: Option<AttackMode>,
}

/// Read-only view of the swarm for logging and tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmSnapshot {
    pub frame: u64,
    pub pointer: Vec2,
    pub pointer_heading: f32,
    pub formation_rotation: f32,
    pub swords: Vec<SwordPose>,
}

pub struct Swarm {
    scene: Scene,
    swords: Vec<Sword>,
    rng: Pcg32,
    /// Frames ticked so far
    frame: u64,
}

impl Swarm {
    /// Create a swarm with `config.count` swords scattered over the surface
    pub fn new(seed: u64, surface: Surface, config: SwarmConfig) -> Self {
        let mut swarm = Self {
            scene: Scene::new(surface, config.sanitized()),
            swords: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
        };
        swarm.sync_count();
        swarm
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.scene.config
    }

    pub fn swords(&self) -> &[Sword] {
        &self.swords
    }

    pub fn len(&self) -> usize {
        self.swords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swords.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Grow by appending fresh swords or shrink by dropping from the end
    fn sync_count(&mut self) {
        let target = self.scene.config.count;
        let current = self.swords.len();
        if target > current {
            let surface = self.scene.surface;
            let rng = &mut self.rng;
            self.swords
                .extend((current..target).map(|_| Sword::new(rng, &surface)));
        } else {
            self.swords.truncate(target);
        }
        if target != current {
            log::debug!("Swarm resized {} -> {}", current, target);
        }
    }

    /// Raw pointer movement from the host
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let surface = self.scene.surface;
        self.scene.pointer.record(Vec2::new(x, y), &surface);
    }

    /// Launch every sword using the configured attack mode.
    ///
    /// Swords already mid-strike ignore the trigger. Returns how many swords
    /// started a strike.
    pub fn trigger_attack(&mut self) -> usize {
        let mode = self.scene.config.attack_mode;
        let total = self.swords.len();
        let pointer_heading = self.scene.pointer.heading;

        let mut started = 0;
        for (index, sword) in self.swords.iter_mut().enumerate() {
            if sword.start_attack(mode, index, total, pointer_heading, &self.scene) {
                started += 1;
            }
        }
        log::info!("{} strike: {}/{} swords launched", mode.as_str(), started, total);
        started
    }

    /// Apply one control change by name. Count changes resize immediately.
    pub fn on_config_change(&mut self, field: &str, value: &str) -> Result<(), ConfigError> {
        let field = ConfigField::from_str(field)
            .ok_or_else(|| ConfigError::UnknownField(field.to_string()))?;
        self.apply_config(field, value)
    }

    /// Typed variant of [`Swarm::on_config_change`]
    pub fn apply_config(&mut self, field: ConfigField, value: &str) -> Result<(), ConfigError> {
        if let Err(e) = self.scene.config.apply(field, value) {
            log::warn!("Rejected config change: {}", e);
            return Err(e);
        }
        log::debug!("Config {} = {}", field.as_str(), value);
        if field == ConfigField::Count {
            self.sync_count();
        }
        Ok(())
    }

    /// Replace the whole config (sanitized) and resize to match
    pub fn set_config(&mut self, config: SwarmConfig) {
        self.scene.config = config.sanitized();
        self.sync_count();
    }

    /// Drawing surface changed size
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.scene.surface = Surface::new(width, height);
        let surface = self.scene.surface;
        self.scene.pointer.repair(&surface);
        log::info!("Surface resized to {}x{}", surface.width, surface.height);
    }

    /// Advance one frame: rotate the formation, then update every sword in
    /// index order
    pub fn tick(&mut self) {
        let total = self.swords.len();
        if total >= 2 {
            self.scene.advance_formation();
        }
        for (index, sword) in self.swords.iter_mut().enumerate() {
            sword.update(index, total, &self.scene, &mut self.rng);
        }
        self.frame += 1;
    }

    /// Poses in draw order
    pub fn poses(&self) -> impl Iterator<Item = SwordPose> + '_ {
        self.swords.iter().map(|sword| SwordPose {
            position: sword.position,
            heading: sword.heading,
            attack: sword.attack().map(|a| a.mode()),
        })
    }

    pub fn snapshot(&self) -> SwarmSnapshot {
        SwarmSnapshot {
            frame: self.frame,
            pointer: self.scene.pointer.position,
            pointer_heading: self.scene.pointer.heading,
            formation_rotation: self.scene.formation_rotation,
            swords: self.poses().collect(),
        }
    }
}
