//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::math::DVec3;
use orbiter::physics::DragModel;
use orbiter::simulation::{SimEvent, Simulation, SimulationConfig, TickOutcome};
use orbiter::types::{CentralBody, EARTH_RADIUS};

/// Reference spawn: 600 km above Earth on +Z.
pub fn leo_position() -> DVec3 {
    DVec3::new(0.0, 0.0, EARTH_RADIUS + 600_000.0)
}

/// Default configuration without drag.
pub fn vacuum_config() -> SimulationConfig {
    SimulationConfig {
        drag: DragModel::none(),
        ..Default::default()
    }
}

/// Reference 500 kg satellite on a circular orbit at 600 km.
pub fn leo_simulation(config: SimulationConfig) -> Simulation {
    Simulation::spawn(CentralBody::earth(), leo_position(), 500.0, config)
        .expect("reference orbit spawns")
}

/// Specific orbital energy around Earth.
pub fn orbital_energy(pos: DVec3, vel: DVec3) -> f64 {
    0.5 * vel.length_squared() - CentralBody::earth().mu() / pos.length()
}

/// Orbital period for a semi-major axis around Earth.
pub fn orbital_period(semi_major_axis: f64) -> f64 {
    use std::f64::consts::TAU;
    TAU * (semi_major_axis.powi(3) / CentralBody::earth().mu()).sqrt()
}

/// Step until `done` holds or `max_ticks` pass. Returns the tick count on success.
pub fn run_until(
    sim: &mut Simulation,
    dt: f64,
    max_ticks: usize,
    mut done: impl FnMut(&Simulation, TickOutcome) -> bool,
) -> Option<usize> {
    for tick in 1..=max_ticks {
        let outcome = sim.step(dt).expect("valid timestep");
        if done(sim, outcome) {
            return Some(tick);
        }
    }
    None
}

/// Step a fixed number of ticks.
pub fn run_ticks(sim: &mut Simulation, dt: f64, ticks: usize) {
    for _ in 0..ticks {
        sim.step(dt).expect("valid timestep");
    }
}

/// Count drained events matching `pred`.
pub fn count_events(events: &[SimEvent], pred: impl Fn(&SimEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}
