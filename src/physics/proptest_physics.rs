//! Property-based tests for the satellite physics using proptest.
//!
//! These tests verify physical invariants across a wide range of orbits
//! around Earth.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::*;
use crate::maneuver::ManeuverPlanner;
use crate::orbit::{classify, classify_energy, OrbitClass, PARABOLIC_ENERGY_THRESHOLD};
use crate::test_utils::{assertions, earth_mu, fixtures};
use crate::trajectory::TrajectoryHistory;
use crate::types::{CentralBody, EARTH_RADIUS};

/// Run `steps` semi-implicit Euler ticks under gravity only.
fn propagate(pos: DVec3, vel: DVec3, dt: f64, steps: usize) -> (DVec3, DVec3) {
    let earth = CentralBody::earth();
    let vacuum = DragModel::none();
    let (mut pos, mut vel) = (pos, vel);
    for _ in 0..steps {
        let forces = net_force(pos, vel, 500.0, &earth, &vacuum).unwrap();
        let step = semi_implicit_euler(pos, vel, 500.0, &forces, dt);
        pos = step.pos;
        vel = step.vel;
    }
    (pos, vel)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Energy stays bounded over one circular orbit.
    ///
    /// Semi-implicit Euler is symplectic, so the energy error oscillates
    /// instead of drifting.
    #[test]
    fn prop_energy_bounded_one_orbit(altitude in 200_000.0f64..36_000_000.0) {
        let sat = fixtures::circular_orbit(altitude);
        let initial_energy = assertions::orbital_energy(sat.pos, sat.vel);

        let period = assertions::orbital_period(sat.radius());
        let (pos, vel) = propagate(sat.pos, sat.vel, period / 2000.0, 2000);

        let final_energy = assertions::orbital_energy(pos, vel);
        let drift = ((final_energy - initial_energy) / initial_energy).abs();
        prop_assert!(
            drift < 0.01,
            "Energy drift {:.4}% exceeds 1% at altitude {} km",
            drift * 100.0, altitude / 1000.0
        );
    }

    /// Gravity is central, so r × v is conserved by the kick-then-drift update.
    #[test]
    fn prop_angular_momentum_conservation(
        periapsis_altitude in 300_000.0f64..5_000_000.0,
        eccentricity in 0.0f64..0.5,
    ) {
        let sat = fixtures::elliptical_orbit(periapsis_altitude, eccentricity);
        let initial_l = assertions::angular_momentum(sat.pos, sat.vel);

        let (pos, vel) = propagate(sat.pos, sat.vel, 5.0, 1000);

        let final_l = assertions::angular_momentum(pos, vel);
        let drift = ((final_l - initial_l) / initial_l).abs();
        prop_assert!(drift < 1e-9, "Angular momentum drift {:.3e}", drift);
    }

    /// Well below escape speed is elliptical, well above is hyperbolic.
    #[test]
    fn prop_escape_velocity_threshold(
        altitude in 100_000.0f64..36_000_000.0,
        velocity_factor in 0.5f64..1.5,
    ) {
        let r = EARTH_RADIUS + altitude;
        let v = escape_speed(earth_mu(), r) * velocity_factor;
        let class = classify(DVec3::new(r, 0.0, 0.0), DVec3::new(0.0, 0.0, v), earth_mu()).unwrap();

        if velocity_factor < 0.99 {
            prop_assert_eq!(class, OrbitClass::Elliptical);
        } else if velocity_factor > 1.01 {
            prop_assert_eq!(class, OrbitClass::Hyperbolic);
        }
        // Near 1.0 the parabolic band decides
    }

    /// Spawned velocity is tangential with circular magnitude.
    #[test]
    fn prop_circular_velocity_tangential(
        altitude in 100_000.0f64..36_000_000.0,
        polar in 0.1f64..3.0,
        azimuth in 0.0f64..std::f64::consts::TAU,
    ) {
        let r = EARTH_RADIUS + altitude;
        // Polar angle measured from +Y, kept away from the up-axis
        let pos = DVec3::new(
            polar.sin() * azimuth.cos(),
            polar.cos(),
            polar.sin() * azimuth.sin(),
        ) * r;

        let vel = circular_velocity(pos, earth_mu(), DVec3::Y).unwrap();

        let cos_theta = pos.dot(vel) / (pos.length() * vel.length());
        prop_assert!(cos_theta.abs() < 1e-10, "cos(theta) = {}", cos_theta);
        let expected = circular_speed(earth_mu(), r);
        prop_assert!(((vel.length() - expected) / expected).abs() < 1e-12);
        prop_assert!(vel.dot(DVec3::Y).abs() < 1e-6);
    }

    /// Drag always opposes motion and scales with v².
    #[test]
    fn prop_drag_opposes_velocity(
        x in -8000.0f64..8000.0,
        y in -8000.0f64..8000.0,
        z in -8000.0f64..8000.0,
    ) {
        let vel = DVec3::new(x, y, z);
        let model = DragModel::default();
        let force = drag(vel, &model);

        prop_assert!(force.dot(vel) <= 0.0);
        let expected = model.magnitude(vel.length());
        prop_assert!((force.length() - expected).abs() <= 1e-12 * expected.max(1e-30));
    }

    /// Vis-viva with a = r reduces to circular speed.
    #[test]
    fn prop_vis_viva_circular(altitude in 0.0f64..50_000_000.0) {
        let r = EARTH_RADIUS + altitude;
        let mu = earth_mu();
        let diff = (vis_viva_speed(mu, r, r) - circular_speed(mu, r)).abs();
        prop_assert!(diff < 1e-9 * circular_speed(mu, r));
    }

    /// A burn changes speed by exactly Δv and keeps the direction.
    #[test]
    fn prop_thrust_magnitude(
        altitude in 200_000.0f64..2_000_000.0,
        delta_v in -5000.0f64..2000.0,
    ) {
        let earth = CentralBody::earth();
        let mut sat = fixtures::circular_orbit(altitude);
        let before = sat.vel;

        ManeuverPlanner::default().apply_thrust(&mut sat, &earth, delta_v).unwrap();

        prop_assert!((sat.speed() - (before.length() + delta_v)).abs() < 1e-6);
        prop_assert!(sat.vel.normalize().dot(before.normalize()) > 1.0 - 1e-12);
    }

    /// Circularize lands on √(μ/r) whatever the prior speed.
    #[test]
    fn prop_circularize_speed(
        periapsis_altitude in 200_000.0f64..5_000_000.0,
        eccentricity in 0.0f64..0.9,
    ) {
        let earth = CentralBody::earth();
        let mut sat = fixtures::elliptical_orbit(periapsis_altitude, eccentricity);

        ManeuverPlanner::default().circularize(&mut sat, &earth).unwrap();

        let expected = circular_speed(earth.mu(), sat.radius());
        prop_assert!(((sat.speed() - expected) / expected).abs() < 1e-12);
    }

    /// The trail never exceeds its capacity and keeps the newest samples.
    #[test]
    fn prop_trajectory_capacity(capacity in 1usize..64, pushes in 0usize..200) {
        let mut history = TrajectoryHistory::with_capacity(capacity);
        for i in 0..pushes {
            history.push(DVec3::splat(i as f64));
        }

        prop_assert_eq!(history.len(), pushes.min(capacity));
        if pushes > 0 {
            prop_assert_eq!(history.latest(), Some(DVec3::splat((pushes - 1) as f64)));
        }
    }

    /// The parabolic band is symmetric around zero energy.
    #[test]
    fn prop_classification_thresholds(energy in -1e8f64..1e8) {
        let class = classify_energy(energy);
        if energy.abs() < PARABOLIC_ENERGY_THRESHOLD {
            prop_assert_eq!(class, OrbitClass::Parabolic);
        } else if energy > PARABOLIC_ENERGY_THRESHOLD {
            prop_assert_eq!(class, OrbitClass::Hyperbolic);
        } else {
            prop_assert_eq!(class, OrbitClass::Elliptical);
        }
    }
}
