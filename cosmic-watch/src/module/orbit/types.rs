///! Scene body configuration
///!
///! Everything here is fixed for a session; the simulator only ever
///! mutates phase angles.

use serde::Serialize;

pub const HAZARDOUS_COLOR: &str = "#ff4444";
pub const SAFE_COLOR: &str = "#44ff44";
pub const DEBRIS_HIGHLIGHT_COLOR: &str = "#22d3ee";
pub const DEBRIS_COLOR: &str = "#ffffff";

pub const SUN_NAME: &str = "Sun";
pub const SUN_SURFACE_TEMPERATURE_C: u32 = 5_500;

/// One row of the planet table
#[derive(Debug, Clone, Copy)]
pub struct PlanetSpec {
    pub name: &'static str,
    pub orbit_radius: f64,
    pub size: f64,
    pub color: &'static str,
    pub angular_speed: f64,
    pub axial_tilt_deg: f64,
    pub has_moon: bool,
    pub has_rings: bool,
}

const fn planet(
    name: &'static str,
    orbit_radius: f64,
    size: f64,
    color: &'static str,
    angular_speed: f64,
    axial_tilt_deg: f64,
) -> PlanetSpec {
    PlanetSpec {
        name,
        orbit_radius,
        size,
        color,
        angular_speed,
        axial_tilt_deg,
        has_moon: false,
        has_rings: false,
    }
}

pub const PLANETS: [PlanetSpec; 8] = [
    planet("Mercury", 15.0, 1.5, "#8C7853", 0.04, 0.034),
    planet("Venus", 22.0, 2.3, "#FFC649", 0.015, 2.64),
    PlanetSpec {
        has_moon: true,
        ..planet("Earth", 30.0, 2.5, "#4a9eff", 0.01, 23.5)
    },
    planet("Mars", 40.0, 2.0, "#ff6b4a", 0.008, 25.2),
    planet("Jupiter", 60.0, 8.0, "#DAA520", 0.002, 3.13),
    PlanetSpec {
        has_rings: true,
        ..planet("Saturn", 80.0, 7.0, "#F4C542", 0.0009, 26.73)
    },
    planet("Uranus", 100.0, 5.0, "#4FD0E7", 0.0004, 97.77),
    planet("Neptune", 120.0, 5.0, "#4166F5", 0.0001, 28.32),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BodyKind {
    Planet {
        axial_tilt_deg: f64,
        has_moon: bool,
        has_rings: bool,
    },
    /// Sampled asteroid; the physical values are display-only
    Asteroid {
        hazardous: bool,
        distance_au: f64,
        diameter_km: f64,
        velocity_kmh: u64,
    },
    Debris,
}

/// Fixed configuration of an orbiting body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyConfig {
    pub name: String,
    pub kind: BodyKind,
    pub orbit_radius: f64,
    /// Radians per nominal frame, signed
    pub angular_speed: f64,
    pub size: f64,
    pub color: String,
    pub vertical_offset: f64,
    pub initial_phase: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Read-only description of a selected body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BodyDetails {
    Star {
        name: String,
        temperature_c: u32,
    },
    Planet {
        name: String,
        orbit_radius: f64,
        angular_speed: f64,
        axial_tilt_deg: f64,
    },
    Asteroid {
        name: String,
        hazardous: bool,
        distance_au: f64,
        diameter_km: f64,
        velocity_kmh: u64,
    },
    Debris {
        name: String,
        orbit_radius: f64,
    },
}

impl BodyDetails {
    pub fn from_config(config: &BodyConfig) -> Self {
        match &config.kind {
            BodyKind::Planet { axial_tilt_deg, .. } => BodyDetails::Planet {
                name: config.name.clone(),
                orbit_radius: config.orbit_radius,
                angular_speed: config.angular_speed,
                axial_tilt_deg: *axial_tilt_deg,
            },
            BodyKind::Asteroid {
                hazardous,
                distance_au,
                diameter_km,
                velocity_kmh,
            } => BodyDetails::Asteroid {
                name: config.name.clone(),
                hazardous: *hazardous,
                distance_au: *distance_au,
                diameter_km: *diameter_km,
                velocity_kmh: *velocity_kmh,
            },
            BodyKind::Debris => BodyDetails::Debris {
                name: config.name.clone(),
                orbit_radius: config.orbit_radius,
            },
        }
    }

    pub fn sun() -> Self {
        BodyDetails::Star {
            name: SUN_NAME.to_string(),
            temperature_c: SUN_SURFACE_TEMPERATURE_C,
        }
    }
}

impl std::fmt::Display for BodyDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyDetails::Star { name, temperature_c } => {
                write!(f, "{}\nType: Star\nTemperature: {} °C", name, temperature_c)
            }
            BodyDetails::Planet {
                name,
                orbit_radius,
                angular_speed,
                axial_tilt_deg,
            } => write!(
                f,
                "{}\nType: Planet\nOrbit: {} AU (scaled)\nSpeed: {:.4}\nTilt: {}°",
                name, orbit_radius, angular_speed, axial_tilt_deg
            ),
            BodyDetails::Asteroid {
                name,
                hazardous,
                distance_au,
                diameter_km,
                velocity_kmh,
            } => write!(
                f,
                "{}\nType: Asteroid\nStatus: {}\nDistance: {} AU\nDiameter: {} km\nVelocity: {} km/h",
                name,
                if *hazardous { "HAZARDOUS" } else { "Safe" },
                distance_au,
                diameter_km,
                velocity_kmh
            ),
            BodyDetails::Debris { name, orbit_radius } => {
                write!(f, "{}\nType: Debris\nOrbit: {:.1}", name, orbit_radius)
            }
        }
    }
}
