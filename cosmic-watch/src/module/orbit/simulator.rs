///! Frame-driven orbital simulator
///!
///! Phases advance by a fixed nominal step per frame rather than by wall
///! clock time, so the same number of ticks always produces the same scene.

use std::f64::consts::TAU;

use super::population::{generate_asteroids, generate_debris_field, planet_bodies};
use super::types::{BodyConfig, BodyDetails, BodyKind, Position, SUN_NAME};

/// Phase step multiplier applied on every frame
pub const NOMINAL_FRAME_DT: f64 = 1.0;

/// Advance a phase angle by one frame, wrapped into [0, 2π)
pub fn advance_phase(phase: f64, angular_speed: f64) -> f64 {
    (phase + angular_speed * NOMINAL_FRAME_DT).rem_euclid(TAU)
}

/// Position on the orbital plane (x, z) with a fixed vertical offset (y)
pub fn orbital_position(phase: f64, radius: f64, vertical_offset: f64) -> Position {
    Position {
        x: phase.cos() * radius,
        y: vertical_offset,
        z: phase.sin() * radius,
    }
}

#[derive(Debug, Clone)]
pub struct OrbitingBody {
    pub config: BodyConfig,
    phase: f64,
}

impl OrbitingBody {
    pub fn new(config: BodyConfig) -> Self {
        let phase = config.initial_phase.rem_euclid(TAU);
        Self { config, phase }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn position(&self) -> Position {
        orbital_position(self.phase, self.config.orbit_radius, self.config.vertical_offset)
    }

    fn advance(&mut self) {
        self.phase = advance_phase(self.phase, self.config.angular_speed);
    }
}

pub struct OrbitalSimulator {
    bodies: Vec<OrbitingBody>,
    seed: u64,
    ticks: u64,
}

impl OrbitalSimulator {
    /// Planets plus `asteroid_count` sampled asteroids
    pub fn new(seed: u64, asteroid_count: usize) -> Self {
        let mut bodies = planet_bodies(seed);
        bodies.extend(generate_asteroids(seed, asteroid_count));
        Self::from_bodies(seed, bodies)
    }

    /// Particle field used by the dashboard backdrop
    pub fn debris_field(seed: u64, count: usize) -> Self {
        Self::from_bodies(seed, generate_debris_field(seed, count))
    }

    pub fn from_bodies(seed: u64, configs: Vec<BodyConfig>) -> Self {
        Self {
            bodies: configs.into_iter().map(OrbitingBody::new).collect(),
            seed,
            ticks: 0,
        }
    }

    /// Advance every body by one frame. A paused scene is left untouched.
    pub fn tick(&mut self, animating: bool) -> bool {
        if !animating {
            return false;
        }
        for body in &mut self.bodies {
            body.advance();
        }
        self.ticks += 1;
        true
    }

    /// Replace the asteroid population. Planets keep their phases.
    pub fn regenerate_asteroids(&mut self, seed: u64) {
        let count = self.asteroid_count();
        self.bodies
            .retain(|b| !matches!(b.config.kind, BodyKind::Asteroid { .. }));
        self.bodies
            .extend(generate_asteroids(seed, count).into_iter().map(OrbitingBody::new));
        self.seed = seed;
        tracing::info!("Regenerated {} asteroids with seed {}", count, seed);
    }

    /// Case-insensitive lookup, the Sun included
    pub fn select(&self, name: &str) -> Option<BodyDetails> {
        let name = name.trim();
        if name.eq_ignore_ascii_case(SUN_NAME) {
            return Some(BodyDetails::sun());
        }
        self.bodies
            .iter()
            .find(|b| b.config.name.eq_ignore_ascii_case(name))
            .map(|b| BodyDetails::from_config(&b.config))
    }

    pub fn bodies(&self) -> &[OrbitingBody] {
        &self.bodies
    }

    pub fn positions(&self) -> Vec<(&str, Position)> {
        self.bodies
            .iter()
            .map(|b| (b.config.name.as_str(), b.position()))
            .collect()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn planet_count(&self) -> usize {
        self.count_where(|k| matches!(k, BodyKind::Planet { .. }))
    }

    pub fn asteroid_count(&self) -> usize {
        self.count_where(|k| matches!(k, BodyKind::Asteroid { .. }))
    }

    pub fn hazardous_asteroid_count(&self) -> usize {
        self.count_where(|k| matches!(k, BodyKind::Asteroid { hazardous: true, .. }))
    }

    fn count_where(&self, pred: impl Fn(&BodyKind) -> bool) -> usize {
        self.bodies.iter().filter(|b| pred(&b.config.kind)).count()
    }
}
