//! Core physics types and constants for the satellite simulation.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::physics::{circular_velocity, PhysicsError};

/// Per-frame ordering of the simulation systems.
///
/// Operator input lands in `Commands`, the tick runs in `Step`, and queued
/// engine events go out in `Publish`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Commands,
    Step,
    Publish,
}

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67430e-11;

/// Earth mass in kilograms
pub const EARTH_MASS: f64 = 5.972e24;

/// Earth mean radius in meters
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Moon mass in kilograms
pub const MOON_MASS: f64 = 7.342e22;

/// Moon mean radius in meters
pub const MOON_RADIUS: f64 = 1_737_400.0;

/// Mars mass in kilograms
pub const MARS_MASS: f64 = 6.4171e23;

/// Mars mean radius in meters
pub const MARS_RADIUS: f64 = 3_389_500.0;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Default simulated seconds advanced per frame before the speed multiplier.
pub const DEFAULT_STEP_SECONDS: f64 = 10.0;

/// Rejected physical parameters.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// The body the satellite orbits. Sits at the origin of the simulation frame.
///
/// Mass and G are only ever replaced together, through a fresh value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentralBody {
    mass: f64,
    gravitational_constant: f64,
    radius: f64,
}

impl CentralBody {
    /// Create a validated central body.
    pub fn new(mass: f64, gravitational_constant: f64, radius: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            mass: positive("mass", mass)?,
            gravitational_constant: positive("gravitational constant", gravitational_constant)?,
            radius: positive("radius", radius)?,
        })
    }

    /// Earth with the constants used throughout the simulator.
    pub const fn earth() -> Self {
        Self {
            mass: EARTH_MASS,
            gravitational_constant: G,
            radius: EARTH_RADIUS,
        }
    }

    pub const fn moon() -> Self {
        Self {
            mass: MOON_MASS,
            gravitational_constant: G,
            radius: MOON_RADIUS,
        }
    }

    pub const fn mars() -> Self {
        Self {
            mass: MARS_MASS,
            gravitational_constant: G,
            radius: MARS_RADIUS,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Standard gravitational parameter μ = G·M (m³/s²).
    pub fn mu(&self) -> f64 {
        self.gravitational_constant * self.mass
    }

    /// Height above the surface for a body-centered position.
    pub fn altitude_of(&self, pos: DVec3) -> f64 {
        pos.length() - self.radius
    }
}

impl Default for CentralBody {
    fn default() -> Self {
        Self::earth()
    }
}

/// Kinematic state of the satellite.
///
/// While `active`, `mass > 0` and `pos` is never the zero vector. Once
/// `active` is false the state is frozen for good.
#[derive(Clone, Debug, PartialEq)]
pub struct SatelliteState {
    /// Position in meters, body-centered frame
    pub pos: DVec3,
    /// Velocity in meters per second
    pub vel: DVec3,
    /// Mass in kilograms
    pub mass: f64,
    /// False once the satellite has crashed
    pub active: bool,
}

impl SatelliteState {
    /// Create a state with an explicit velocity.
    pub fn new(pos: DVec3, vel: DVec3, mass: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            pos,
            vel,
            mass: positive("satellite mass", mass)?,
            active: true,
        })
    }

    /// Spawn at `pos` moving at local circular speed.
    ///
    /// The tangent is `normalize(pos × up_axis)`, so the orbit lies in the
    /// plane perpendicular to `up_axis`.
    pub fn spawn(
        pos: DVec3,
        mass: f64,
        body: &CentralBody,
        up_axis: DVec3,
    ) -> Result<Self, SpawnError> {
        let vel = circular_velocity(pos, body.mu(), up_axis)?;
        Ok(Self::new(pos, vel, mass)?)
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    pub fn radius(&self) -> f64 {
        self.pos.length()
    }
}

/// Failure to author a new satellite.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpawnError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Simulation clock driven by the render loop.
///
/// Each frame advances `step_seconds * scale` simulated seconds unless paused.
#[derive(Resource, Clone, Debug)]
pub struct SimulationTime {
    /// Simulated seconds elapsed since the scenario started
    pub elapsed: f64,
    /// Simulated seconds per frame at scale 1.0
    pub step_seconds: f64,
    /// Speed multiplier
    pub scale: f64,
    /// Whether simulation is paused
    pub paused: bool,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            step_seconds: DEFAULT_STEP_SECONDS,
            scale: 1.0,
            paused: false,
        }
    }
}

impl SimulationTime {
    /// Timestep for the next frame, or `None` while paused.
    pub fn frame_dt(&self) -> Option<f64> {
        if self.paused {
            return None;
        }
        let dt = self.step_seconds * self.scale;
        (dt > 0.0).then_some(dt)
    }

    /// Reset the clock for a new scenario.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Elapsed simulated time in minutes
    pub fn minutes(&self) -> f64 {
        self.elapsed / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_earth_mu() {
        let earth = CentralBody::earth();
        assert_relative_eq!(earth.mu(), 3.986e14, max_relative = 1e-3);
    }

    #[test]
    fn test_central_body_rejects_non_positive() {
        assert_eq!(
            CentralBody::new(0.0, G, EARTH_RADIUS),
            Err(ConfigError::NonPositive { field: "mass", value: 0.0 })
        );
        assert!(CentralBody::new(EARTH_MASS, -1.0, EARTH_RADIUS).is_err());
        assert!(CentralBody::new(EARTH_MASS, G, f64::NAN).is_err());
    }

    #[test]
    fn test_spawn_reference_leo() {
        let earth = CentralBody::earth();
        let pos = DVec3::new(0.0, 0.0, EARTH_RADIUS + 600_000.0);
        let sat = SatelliteState::spawn(pos, 500.0, &earth, DVec3::Y).unwrap();

        assert!(sat.active);
        assert_relative_eq!(sat.speed(), 7558.0, max_relative = 1e-3);
        // Tangential: no radial component
        assert!(sat.pos.dot(sat.vel).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_rejects_bad_mass() {
        let earth = CentralBody::earth();
        let pos = DVec3::new(EARTH_RADIUS + 600_000.0, 0.0, 0.0);
        assert!(matches!(
            SatelliteState::spawn(pos, 0.0, &earth, DVec3::Y),
            Err(SpawnError::Config(_))
        ));
    }

    #[test]
    fn test_spawn_rejects_origin() {
        let earth = CentralBody::earth();
        assert_eq!(
            SatelliteState::spawn(DVec3::ZERO, 500.0, &earth, DVec3::Y),
            Err(SpawnError::Physics(PhysicsError::ZeroRadius))
        );
    }

    #[test]
    fn test_frame_dt() {
        let mut time = SimulationTime::default();
        assert_eq!(time.frame_dt(), Some(DEFAULT_STEP_SECONDS));

        time.scale = 5.0;
        assert_eq!(time.frame_dt(), Some(50.0));

        time.paused = true;
        assert_eq!(time.frame_dt(), None);
    }
}
