//! Test utilities for satellite orbit tests.
//!
//! Provides fixtures for creating test orbits around Earth and assertions
//! for verifying physical invariants like energy and angular momentum
//! conservation.

use bevy::math::DVec3;

use crate::types::{CentralBody, SatelliteState, EARTH_RADIUS};

/// Earth's gravitational parameter used by every fixture.
pub fn earth_mu() -> f64 {
    CentralBody::earth().mu()
}

/// Fixtures for creating test orbital states.
pub mod fixtures {
    use super::*;

    fn state(pos: DVec3, vel: DVec3) -> SatelliteState {
        SatelliteState {
            pos,
            vel,
            mass: 500.0,
            active: true,
        }
    }

    /// Satellite on a circular orbit at `altitude` meters.
    ///
    /// Placed on +X moving along +Z, so the orbit lies in the XZ plane.
    pub fn circular_orbit(altitude: f64) -> SatelliteState {
        let r = EARTH_RADIUS + altitude;
        let v = (earth_mu() / r).sqrt();
        state(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v))
    }

    /// Satellite at periapsis of an ellipse with the given eccentricity.
    pub fn elliptical_orbit(periapsis_altitude: f64, eccentricity: f64) -> SatelliteState {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity must be in [0, 1) for elliptical orbit"
        );

        let r_p = EARTH_RADIUS + periapsis_altitude;
        let a = r_p / (1.0 - eccentricity);
        let v = (earth_mu() * (2.0 / r_p - 1.0 / a)).sqrt();
        state(DVec3::new(r_p, 0.0, 0.0), DVec3::new(0.0, 0.0, v))
    }

    /// Satellite at 1.1× escape speed.
    pub fn escape_trajectory(altitude: f64) -> SatelliteState {
        let r = EARTH_RADIUS + altitude;
        let v = 1.1 * (2.0 * earth_mu() / r).sqrt();
        state(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v))
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Specific orbital energy E = v²/2 - μ/r.
    pub fn orbital_energy(pos: DVec3, vel: DVec3) -> f64 {
        0.5 * vel.length_squared() - earth_mu() / pos.length()
    }

    /// Magnitude of the specific angular momentum r × v.
    pub fn angular_momentum(pos: DVec3, vel: DVec3) -> f64 {
        pos.cross(vel).length()
    }

    /// # Panics
    /// Panics if relative energy drift exceeds tolerance.
    pub fn assert_energy_conserved(initial_energy: f64, final_energy: f64, tolerance: f64) {
        let drift = ((final_energy - initial_energy) / initial_energy).abs();
        assert!(
            drift <= tolerance,
            "Energy not conserved: initial={initial_energy:.6e}, final={final_energy:.6e}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }

    /// Kepler's third law: T = 2π √(a³/μ)
    pub fn orbital_period(semi_major_axis: f64) -> f64 {
        std::f64::consts::TAU * (semi_major_axis.powi(3) / earth_mu()).sqrt()
    }

    pub fn is_bound(pos: DVec3, vel: DVec3) -> bool {
        orbital_energy(pos, vel) < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_orbit_is_bound() {
        let sat = fixtures::circular_orbit(600_000.0);
        assert!(assertions::is_bound(sat.pos, sat.vel));
        assert_eq!(sat.pos.dot(sat.vel), 0.0);
    }

    #[test]
    fn test_escape_trajectory_is_unbound() {
        let sat = fixtures::escape_trajectory(600_000.0);
        assert!(!assertions::is_bound(sat.pos, sat.vel));
    }

    #[test]
    fn test_leo_period() {
        // About 96.5 minutes at 600 km
        let period = assertions::orbital_period(EARTH_RADIUS + 600_000.0);
        assert_relative_eq!(period / 60.0, 96.5, epsilon = 0.5);
    }
}
