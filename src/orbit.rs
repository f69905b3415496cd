//! Orbit classification and orbital elements.
//!
//! The classifier is a coarse energy check, not a geometric one: anything
//! within `PARABOLIC_ENERGY_THRESHOLD` of zero specific energy is reported
//! as parabolic.

use std::f64::consts::TAU;
use std::fmt;

use bevy::math::DVec3;

use crate::physics::PhysicsError;

/// Half-width (m²/s²) of the energy band treated as parabolic.
pub const PARABOLIC_ENERGY_THRESHOLD: f64 = 1e3;

/// Energy class of the current trajectory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrbitClass {
    #[default]
    Elliptical,
    Parabolic,
    Hyperbolic,
}

impl OrbitClass {
    /// Whether the satellite is gravitationally bound.
    pub fn is_bound(self) -> bool {
        self == OrbitClass::Elliptical
    }

    pub fn label(self) -> &'static str {
        match self {
            OrbitClass::Elliptical => "Elliptical",
            OrbitClass::Parabolic => "Parabolic",
            OrbitClass::Hyperbolic => "Hyperbolic",
        }
    }
}

impl fmt::Display for OrbitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Specific orbital energy ε = v²/2 − μ/r.
pub fn specific_energy(pos: DVec3, vel: DVec3, mu: f64) -> Result<f64, PhysicsError> {
    let r = pos.length();
    if r == 0.0 {
        return Err(PhysicsError::ZeroRadius);
    }
    Ok(0.5 * vel.length_squared() - mu / r)
}

/// Classify a specific energy value.
pub fn classify_energy(energy: f64) -> OrbitClass {
    if energy.abs() < PARABOLIC_ENERGY_THRESHOLD {
        OrbitClass::Parabolic
    } else if energy > PARABOLIC_ENERGY_THRESHOLD {
        OrbitClass::Hyperbolic
    } else {
        OrbitClass::Elliptical
    }
}

/// Classify the trajectory through `pos` with velocity `vel`.
pub fn classify(pos: DVec3, vel: DVec3, mu: f64) -> Result<OrbitClass, PhysicsError> {
    specific_energy(pos, vel, mu).map(classify_energy)
}

/// Orbital elements computed from state vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis (meters). Negative for hyperbolic orbits.
    pub semi_major_axis: f64,
    /// Eccentricity (0 = circular, <1 = elliptical, >1 = hyperbolic).
    pub eccentricity: f64,
    /// Specific orbital energy (m²/s²).
    pub energy: f64,
    /// Specific angular momentum magnitude (m²/s).
    pub angular_momentum: f64,
    /// Tilt of the orbital plane from the plane perpendicular to the up-axis
    /// (radians, 0 to π/2). Direction of travel is not considered.
    pub inclination: f64,
    /// Orbital period (seconds). Only for bound orbits.
    pub period: Option<f64>,
}

impl OrbitalElements {
    pub fn is_bound(&self) -> bool {
        self.energy < 0.0
    }

    /// Periapsis radius (meters from the body center).
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Apoapsis radius. Only meaningful for bound orbits.
    pub fn apoapsis(&self) -> Option<f64> {
        self.is_bound()
            .then(|| self.semi_major_axis * (1.0 + self.eccentricity))
    }
}

/// Compute orbital elements from position and velocity.
///
/// Eccentricity comes from the eccentricity vector
/// e = ((v² − μ/r)·r − (r·v)·v) / μ, which stays well defined for
/// circular orbits.
pub fn compute_orbital_elements(
    pos: DVec3,
    vel: DVec3,
    mu: f64,
    up_axis: DVec3,
) -> Result<OrbitalElements, PhysicsError> {
    let energy = specific_energy(pos, vel, mu)?;
    let r = pos.length();
    let h = pos.cross(vel);

    let e_vec = (pos * (vel.length_squared() - mu / r) - vel * pos.dot(vel)) / mu;
    let eccentricity = e_vec.length();

    let semi_major_axis = if energy.abs() > f64::EPSILON {
        -mu / (2.0 * energy)
    } else {
        f64::INFINITY
    };

    let inclination = match (h.try_normalize(), up_axis.try_normalize()) {
        (Some(h_hat), Some(up)) => h_hat.cross(up).length().atan2(h_hat.dot(up).abs()),
        _ => 0.0,
    };

    let period = (energy < 0.0).then(|| TAU * (semi_major_axis.powi(3) / mu).sqrt());

    Ok(OrbitalElements {
        semi_major_axis,
        eccentricity,
        energy,
        angular_momentum: h.length(),
        inclination,
        period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{circular_velocity, escape_speed};
    use crate::types::{CentralBody, EARTH_RADIUS, RAD_TO_DEG};
    use approx::assert_relative_eq;

    fn leo_radius() -> f64 {
        EARTH_RADIUS + 600_000.0
    }

    #[test]
    fn test_circular_orbit_is_elliptical_class() {
        let mu = CentralBody::earth().mu();
        let pos = DVec3::new(0.0, 0.0, leo_radius());
        let vel = circular_velocity(pos, mu, DVec3::Y).unwrap();

        assert_eq!(classify(pos, vel, mu), Ok(OrbitClass::Elliptical));

        let elements = compute_orbital_elements(pos, vel, mu, DVec3::Y).unwrap();
        assert!(elements.eccentricity < 1e-9, "e = {}", elements.eccentricity);
        assert_relative_eq!(elements.semi_major_axis, leo_radius(), max_relative = 1e-9);
        // Spawned orbits circle clockwise about the up-axis; still equatorial
        assert!(elements.inclination.abs() < 1e-9);
        assert!(elements.period.is_some());
    }

    #[test]
    fn test_small_tilt_resolved() {
        let mu = CentralBody::earth().mu();
        let pos = DVec3::new(leo_radius(), 0.0, 0.0);
        let speed = (mu / leo_radius()).sqrt();
        let tilt: f64 = 1e-7;
        let vel = DVec3::new(0.0, speed * tilt.sin(), speed * tilt.cos());

        let elements = compute_orbital_elements(pos, vel, mu, DVec3::Y).unwrap();
        assert_relative_eq!(elements.inclination, tilt, max_relative = 1e-6);
    }

    #[test]
    fn test_escape_speed_is_parabolic() {
        let mu = CentralBody::earth().mu();
        let pos = DVec3::new(leo_radius(), 0.0, 0.0);
        let vel = DVec3::new(0.0, 0.0, escape_speed(mu, leo_radius()));
        assert_eq!(classify(pos, vel, mu), Ok(OrbitClass::Parabolic));
    }

    #[test]
    fn test_fast_is_hyperbolic() {
        let mu = CentralBody::earth().mu();
        let pos = DVec3::new(leo_radius(), 0.0, 0.0);
        let vel = DVec3::new(0.0, 0.0, 1.05 * escape_speed(mu, leo_radius()));
        assert_eq!(classify(pos, vel, mu), Ok(OrbitClass::Hyperbolic));

        let elements = compute_orbital_elements(pos, vel, mu, DVec3::Y).unwrap();
        assert!(elements.eccentricity > 1.0);
        assert!(elements.semi_major_axis < 0.0);
        assert_eq!(elements.period, None);
        assert_eq!(elements.apoapsis(), None);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(classify_energy(999.0), OrbitClass::Parabolic);
        assert_eq!(classify_energy(-999.0), OrbitClass::Parabolic);
        assert_eq!(classify_energy(1000.5), OrbitClass::Hyperbolic);
        // Exactly at the threshold falls through to elliptical
        assert_eq!(classify_energy(1e3), OrbitClass::Elliptical);
        assert_eq!(classify_energy(-1e3), OrbitClass::Elliptical);
        assert_eq!(classify_energy(-3e7), OrbitClass::Elliptical);
    }

    #[test]
    fn test_energy_at_origin_fails() {
        assert_eq!(
            specific_energy(DVec3::ZERO, DVec3::X, 1.0),
            Err(PhysicsError::ZeroRadius)
        );
    }

    #[test]
    fn test_polar_inclination() {
        let mu = CentralBody::earth().mu();
        let r = leo_radius();
        let pos = DVec3::new(r, 0.0, 0.0);
        let vel = DVec3::new(0.0, (mu / r).sqrt(), 0.0);

        let elements = compute_orbital_elements(pos, vel, mu, DVec3::Y).unwrap();
        assert_relative_eq!(elements.inclination * RAD_TO_DEG, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_periapsis_apoapsis() {
        let mu = CentralBody::earth().mu();
        let r_p = leo_radius();
        let r_a = EARTH_RADIUS + 1_500_000.0;
        let a = 0.5 * (r_p + r_a);
        let v = (mu * (2.0 / r_p - 1.0 / a)).sqrt();

        let elements =
            compute_orbital_elements(DVec3::new(r_p, 0.0, 0.0), DVec3::new(0.0, 0.0, v), mu, DVec3::Y)
                .unwrap();
        assert_relative_eq!(elements.periapsis(), r_p, max_relative = 1e-9);
        assert_relative_eq!(elements.apoapsis().unwrap(), r_a, max_relative = 1e-9);
    }
}
