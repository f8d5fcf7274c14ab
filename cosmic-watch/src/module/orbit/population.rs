///! Seeded body populations
///!
///! Each population draws from its own ChaCha stream, so regenerating the
///! asteroids never disturbs the planets and the same seed always yields the
///! same scene.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use std::f64::consts::TAU;

use super::types::{
    BodyConfig, BodyKind, DEBRIS_COLOR, DEBRIS_HIGHLIGHT_COLOR, HAZARDOUS_COLOR, PLANETS, SAFE_COLOR,
};

const PLANET_STREAM: u64 = 0;
const ASTEROID_STREAM: u64 = 1;
const DEBRIS_STREAM: u64 = 2;

fn seeded_rng(seed: u64, stream: u64) -> ChaChaRng {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// The eight planets, with seeded starting phases
pub fn planet_bodies(seed: u64) -> Vec<BodyConfig> {
    let mut rng = seeded_rng(seed, PLANET_STREAM);

    PLANETS
        .iter()
        .map(|spec| BodyConfig {
            name: spec.name.to_string(),
            kind: BodyKind::Planet {
                axial_tilt_deg: spec.axial_tilt_deg,
                has_moon: spec.has_moon,
                has_rings: spec.has_rings,
            },
            orbit_radius: spec.orbit_radius,
            angular_speed: spec.angular_speed,
            size: spec.size,
            color: spec.color.to_string(),
            vertical_offset: 0.0,
            initial_phase: rng.gen_range(0.0..TAU),
        })
        .collect()
}

/// Sampled asteroids, evenly spread in phase around their belt
pub fn generate_asteroids(seed: u64, count: usize) -> Vec<BodyConfig> {
    let mut rng = seeded_rng(seed, ASTEROID_STREAM);

    (0..count)
        .map(|i| {
            let hazardous = rng.gen_bool(0.3);
            let distance_au = round_to(rng.gen_range(0.0..2.0), 4);
            let diameter_km = round_to(rng.gen_range(0.0..500.0), 2);
            let velocity_kmh = rng.gen_range(0.0..50_000.0f64).floor() as u64;

            BodyConfig {
                name: format!("Asteroid {}", i + 1),
                kind: BodyKind::Asteroid {
                    hazardous,
                    distance_au,
                    diameter_km,
                    velocity_kmh,
                },
                orbit_radius: 35.0 + rng.gen_range(0.0..30.0),
                angular_speed: 0.005 + rng.gen_range(0.0..0.01),
                size: 0.5,
                color: if hazardous { HAZARDOUS_COLOR } else { SAFE_COLOR }.to_string(),
                vertical_offset: (rng.gen_range(0.0..1.0) - 0.5) * 10.0,
                initial_phase: (i as f64 / count as f64) * TAU,
            }
        })
        .collect()
}

/// Background debris particles; half of them orbit the other way
pub fn generate_debris_field(seed: u64, count: usize) -> Vec<BodyConfig> {
    let mut rng = seeded_rng(seed, DEBRIS_STREAM);

    (0..count)
        .map(|i| {
            let orbit_radius = 50.0 + rng.gen_range(0.0..100.0);
            let speed = 0.002 + rng.gen_range(0.0..0.005);
            let angular_speed = if rng.gen_bool(0.5) { speed } else { -speed };

            BodyConfig {
                name: format!("Debris {}", i + 1),
                kind: BodyKind::Debris,
                orbit_radius,
                angular_speed,
                size: 1.0 + rng.gen_range(0.0..2.0),
                color: if rng.gen_bool(0.2) {
                    DEBRIS_HIGHLIGHT_COLOR
                } else {
                    DEBRIS_COLOR
                }
                .to_string(),
                vertical_offset: 0.0,
                initial_phase: rng.gen_range(0.0..TAU),
            }
        })
        .collect()
}
