//! A single flying sword
//!
//! Two modes: orbit/follow while idle, and a strike once an attack has been
//! started. The mode is simply whether `attack` holds a state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::attack::{AttackPlan, AttackState, AttackStep};
use super::sanitize::{repair_position, sanitize_angle};
use super::state::{Scene, Surface};
use crate::consts::*;
use crate::settings::{AttackMode, SwarmConfig, TrajectoryStyle};
use crate::{facing, heading_of, polar_to_cartesian};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sword {
    pub position: Vec2,
    /// Sprite rotation (radians); tip points along local -y
    pub heading: f32,
    /// Fixed per-sword speed jitter in [0.9, 1.0]
    pub speed_factor: f32,
    /// Wobble oscillator phase offset
    pub wave_phase: f32,
    /// Wobble oscillator clock
    pub wave_clock: f32,
    attack: Option<AttackState>,
}

impl Sword {
    /// Spawn at a random point with random jitter
    pub fn new<R: Rng + ?Sized>(rng: &mut R, surface: &Surface) -> Self {
        Self {
            position: surface.random_point(rng),
            heading: 0.0,
            speed_factor: rng.random_range(SPEED_FACTOR_MIN..SPEED_FACTOR_MAX),
            wave_phase: rng.random_range(0.0..std::f32::consts::TAU),
            wave_clock: 0.0,
            attack: None,
        }
    }

    /// Spawn at a fixed point with no jitter
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            heading: 0.0,
            speed_factor: 1.0,
            wave_phase: 0.0,
            wave_clock: 0.0,
            attack: None,
        }
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    pub fn attack(&self) -> Option<&AttackState> {
        self.attack.as_ref()
    }

    /// Travel speed this frame
    pub fn speed(&self, config: &SwarmConfig) -> f32 {
        config.speed * self.speed_factor
    }

    /// Current wobble offset of the curved approach
    pub fn wobble(&self) -> f32 {
        (self.wave_clock * WAVE_FREQUENCY + self.wave_phase).sin() * WAVE_AMPLITUDE
    }

    /// Start a strike. No-op while a strike is already running.
    ///
    /// A strike that cannot be planned is logged and the sword stays idle.
    /// Returns true if a strike was started.
    pub fn start_attack(
        &mut self,
        mode: AttackMode,
        index: usize,
        total: usize,
        pointer_heading: f32,
        scene: &Scene,
    ) -> bool {
        if self.attack.is_some() {
            return false;
        }

        let plan = AttackPlan {
            mode,
            origin: self.position,
            heading: self.heading,
            index,
            total,
            pointer_heading,
            pointer: scene.pointer.position,
            surface_center: scene.surface.center(),
        };
        match AttackState::plan(&plan) {
            Ok(state) => {
                self.attack = Some(state);
                true
            }
            Err(e) => {
                log::warn!("Sword {} could not start {} strike: {}", index, mode.as_str(), e);
                false
            }
        }
    }

    /// Advance one frame.
    ///
    /// A running strike takes the whole frame; otherwise the sword chases the
    /// pointer (lone sword) or its orbit slot. Position and heading are
    /// repaired before returning.
    pub fn update<R: Rng + ?Sized>(&mut self, index: usize, total: usize, scene: &Scene, rng: &mut R) {
        let speed = self.speed(&scene.config);
        self.wave_clock = (self.wave_clock + WAVE_CLOCK_STEP).rem_euclid(WAVE_CLOCK_PERIOD);

        if self.attack.is_some() {
            self.advance_attack(index);
        } else if total < 2 {
            self.follow_pointer(scene, speed);
        } else {
            self.seek_slot(index, total, scene, speed);
        }

        self.repair(index, scene, rng);
    }

    fn advance_attack(&mut self, index: usize) {
        let Some(attack) = self.attack.as_mut() else {
            return;
        };
        match attack.step(&mut self.position, &mut self.heading) {
            AttackStep::Continue => {}
            AttackStep::Finished => {
                log::debug!("Sword {} finished {} strike", index, attack.mode().as_str());
                self.attack = None;
            }
            AttackStep::Aborted => {
                log::warn!("Sword {} {} strike aborted mid-flight", index, attack.mode().as_str());
                self.attack = None;
            }
        }
    }

    fn follow_pointer(&mut self, scene: &Scene, speed: f32) {
        let to_target = scene.pointer_or_center() - self.position;
        if to_target.length() > FOLLOW_STOP_DISTANCE {
            let direction = heading_of(to_target);
            self.heading = facing(direction);
            self.position += polar_to_cartesian(speed, direction);
        }
    }

    fn seek_slot(&mut self, index: usize, total: usize, scene: &Scene, speed: f32) {
        let target = scene.slot_position(index, total);
        let to_target = target - self.position;
        let distance = to_target.length();
        let direction = heading_of(to_target);

        if distance > SLOT_SNAP_DISTANCE {
            let mut move_angle = direction;
            if scene.config.trajectory == TrajectoryStyle::Curve {
                move_angle += self.wobble() * WAVE_STEER_SCALE;
            }
            // Last step lands exactly on the slot instead of overshooting
            if distance < speed {
                self.position = target;
            } else {
                self.position += polar_to_cartesian(speed, move_angle);
            }
        } else {
            self.position = target;
        }

        self.heading = if distance > SLOT_ARRIVED_DISTANCE {
            facing(direction)
        } else {
            facing(scene.pointer.heading_or_default())
        };
    }

    fn repair<R: Rng + ?Sized>(&mut self, index: usize, scene: &Scene, rng: &mut R) {
        let (position, repaired) = repair_position(self.position, &scene.surface, rng);
        if repaired {
            log::debug!("Sword {} position {:?} repaired to {:?}", index, self.position, position);
            self.position = position;
        }
        self.heading = sanitize_angle(self.heading, facing(scene.pointer.heading_or_default()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn scene() -> Scene {
        Scene::new(Surface::new(800.0, 600.0), SwarmConfig::default())
    }

    #[test]
    fn test_new_sword_jitter_in_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        let surface = Surface::new(800.0, 600.0);
        for _ in 0..100 {
            let sword = Sword::new(&mut rng, &surface);
            assert!(sword.speed_factor >= 0.9 && sword.speed_factor <= 1.0);
            assert!(surface.contains(sword.position));
            assert!(!sword.is_attacking());
        }
    }

    #[test]
    fn test_lone_sword_chases_pointer() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sword = Sword::at(Vec2::new(400.0, 200.0));

        sword.update(0, 1, &scene, &mut rng);
        // Pointer is straight below at (400, 300)
        assert!((sword.position - Vec2::new(400.0, 205.0)).length() < 1e-4);
        assert!((sword.heading - (FRAC_PI_2 + FRAC_PI_2)).abs() < 1e-6);
    }

    #[test]
    fn test_lone_sword_rests_near_pointer() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sword = Sword::at(Vec2::new(403.0, 300.0));
        sword.heading = 1.25;

        sword.update(0, 1, &scene, &mut rng);
        assert_eq!(sword.position, Vec2::new(403.0, 300.0));
        assert_eq!(sword.heading, 1.25);
    }

    #[test]
    fn test_arrived_sword_mirrors_pointer_heading() {
        let mut scene = scene();
        scene.pointer.heading = 0.0;
        let mut rng = Pcg32::seed_from_u64(1);
        let slot = scene.slot_position(0, 3);
        let mut sword = Sword::at(slot);

        sword.update(0, 3, &scene, &mut rng);
        assert_eq!(sword.position, slot);
        assert!((sword.heading - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_snaps_when_closer_than_speed() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(1);
        let slot = scene.slot_position(1, 2);
        let mut sword = Sword::at(slot + Vec2::new(4.0, 0.0));

        sword.update(1, 2, &scene, &mut rng);
        assert_eq!(sword.position, slot);
    }

    #[test]
    fn test_orbit_moves_speed_toward_slot() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(1);
        let slot = scene.slot_position(0, 2);
        let start = slot + Vec2::new(0.0, 100.0);
        let mut sword = Sword::at(start);

        sword.update(0, 2, &scene, &mut rng);
        assert!((sword.position - (start - Vec2::new(0.0, 5.0))).length() < 1e-4);
        // Facing the slot (straight up)
        assert!(sword.heading.abs() < 1e-5);
    }

    #[test]
    fn test_curve_trajectory_bends_path() {
        let mut scene = scene();
        let mut rng = Pcg32::seed_from_u64(1);
        let start = scene.slot_position(0, 2) + Vec2::new(0.0, 100.0);

        let mut straight = Sword::at(start);
        straight.wave_phase = 1.0;
        straight.update(0, 2, &scene, &mut rng);

        scene.config.trajectory = TrajectoryStyle::Curve;
        let mut curved = Sword::at(start);
        curved.wave_phase = 1.0;
        curved.update(0, 2, &scene, &mut rng);

        assert!((curved.position - straight.position).length() > 0.1);
        // Same speed either way
        assert!(((curved.position - start).length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_wave_clock_advances_every_frame() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sword = Sword::at(Vec2::new(10.0, 10.0));
        sword.start_attack(AttackMode::Linear, 0, 1, 0.0, &scene);
        sword.update(0, 1, &scene, &mut rng);
        sword.update(0, 1, &scene, &mut rng);
        assert!((sword.wave_clock - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_start_attack_twice_is_noop() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sword = Sword::at(Vec2::new(100.0, 100.0));

        assert!(sword.start_attack(AttackMode::Linear, 0, 1, 0.0, &scene));
        sword.update(0, 1, &scene, &mut rng);
        let before = *sword.attack().unwrap();

        assert!(!sword.start_attack(AttackMode::Circle, 0, 1, PI, &scene));
        assert_eq!(*sword.attack().unwrap(), before);
    }

    #[test]
    fn test_attack_skips_orbit_then_resumes() {
        let mut scene = scene();
        scene.pointer.heading = 0.0;
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sword = Sword::at(scene.slot_position(0, 2));
        sword.start_attack(AttackMode::Linear, 0, 2, 0.0, &scene);

        let mut frames = 0;
        while sword.is_attacking() {
            sword.update(0, 2, &scene, &mut rng);
            frames += 1;
            assert!(frames <= 40, "strike ran too long");
        }
        assert_eq!(frames, 40);
        let stopped = sword.position;

        // Next frame steers back toward the slot from where it stopped
        sword.update(0, 2, &scene, &mut rng);
        let slot = scene.slot_position(0, 2);
        assert!((sword.position - slot).length() < (stopped - slot).length());
    }

    #[test]
    fn test_failed_attack_leaves_sword_idle() {
        let scene = scene();
        let mut sword = Sword::at(Vec2::new(f32::NAN, 10.0));
        assert!(!sword.start_attack(AttackMode::Scatter, 0, 3, 0.0, &scene));
        assert!(!sword.is_attacking());
    }

    #[test]
    fn test_non_finite_position_repaired_in_bounds() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut sword = Sword::at(Vec2::new(f32::NAN, f32::NAN));
        sword.heading = f32::NAN;

        sword.update(0, 1, &scene, &mut rng);
        assert!(sword.position.is_finite());
        assert!(scene.surface.contains(sword.position));
        assert!(sword.heading.is_finite());
    }

    #[test]
    fn test_non_finite_orbit_position_snaps_to_slot() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut sword = Sword::at(Vec2::new(f32::NAN, 0.0));

        sword.update(2, 4, &scene, &mut rng);
        assert_eq!(sword.position, scene.slot_position(2, 4));
    }

    #[test]
    fn test_wave_clock_wraps_instead_of_stalling() {
        let scene = scene();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sword = Sword::at(Vec2::new(10.0, 10.0));
        sword.wave_clock = 4_000_000.0;
        sword.update(0, 1, &scene, &mut rng);
        assert!((0.0..WAVE_CLOCK_PERIOD).contains(&sword.wave_clock));

        for _ in 0..200 {
            let before = sword.wave_clock;
            sword.update(0, 1, &scene, &mut rng);
            let delta = (sword.wave_clock - before).rem_euclid(WAVE_CLOCK_PERIOD);
            assert!((delta - WAVE_CLOCK_STEP).abs() < 1e-5);
        }
    }
}
