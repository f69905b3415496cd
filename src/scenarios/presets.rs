//! Preset scenario definitions.

use bevy::math::DVec3;

use crate::types::CentralBody;

use super::Scenario;

/// All available preset scenarios.
pub static SCENARIOS: &[Scenario] = &[EARTH_LEO, EARTH_POLAR, MOON_LOW_ORBIT, MARS_ORBIT];

/// Scenario 1: Earth Low Orbit (default)
///
/// 500 kg satellite on a circular orbit 600 km up, spawned on +Z. Thin
/// residual drag slowly lowers it.
pub static EARTH_LEO: Scenario = Scenario {
    id: "earth_leo",
    name: "Earth Low Orbit",
    description: "Circular orbit at 600 km. Try a Hohmann transfer with T.",
    body: CentralBody::earth(),
    altitude: 600_000.0,
    spawn_direction: DVec3::Z,
    inclination_deg: None,
    satellite_mass: 500.0,
    time_scale: 1.0,
    start_paused: false,
};

/// Scenario 2: Earth Polar Orbit
pub static EARTH_POLAR: Scenario = Scenario {
    id: "earth_polar",
    name: "Earth Polar Orbit",
    description: "Circular polar orbit at 700 km.",
    body: CentralBody::earth(),
    altitude: 700_000.0,
    spawn_direction: DVec3::X,
    inclination_deg: Some(90.0),
    satellite_mass: 500.0,
    time_scale: 1.0,
    start_paused: false,
};

/// Scenario 3: Low Lunar Orbit
///
/// Weak gravity: orbital speed is only ~1.6 km/s, so small burns go a long way.
pub static MOON_LOW_ORBIT: Scenario = Scenario {
    id: "moon_low_orbit",
    name: "Low Lunar Orbit",
    description: "Circular orbit 100 km above the Moon.",
    body: CentralBody::moon(),
    altitude: 100_000.0,
    spawn_direction: DVec3::Z,
    inclination_deg: None,
    satellite_mass: 500.0,
    time_scale: 2.0,
    start_paused: false,
};

/// Scenario 4: Mars Orbit
pub static MARS_ORBIT: Scenario = Scenario {
    id: "mars_orbit",
    name: "Mars Orbit",
    description: "Circular orbit 400 km above Mars.",
    body: CentralBody::mars(),
    altitude: 400_000.0,
    spawn_direction: DVec3::Z,
    inclination_deg: None,
    satellite_mass: 500.0,
    time_scale: 1.0,
    start_paused: false,
};
