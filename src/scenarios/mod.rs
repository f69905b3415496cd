//! Scenario system for preset starting orbits.
//!
//! A scenario picks the central body and where the satellite starts:
//! - Earth low orbit (the default)
//! - Earth polar orbit
//! - Low lunar orbit
//! - Mars orbit
//!
//! Loading one rebuilds the [`Simulation`] from scratch.

pub mod presets;

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::maneuver::{ManeuverError, OrbitShape};
use crate::simulation::{Simulation, SimulationConfig};
use crate::types::{CentralBody, SimulationSet, SimulationTime, SpawnError};

pub use presets::SCENARIOS;

/// A predefined scenario configuration.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Unique identifier for the scenario.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description of the scenario.
    pub description: &'static str,
    pub body: CentralBody,
    /// Starting altitude above the surface (m).
    pub altitude: f64,
    /// Unit vector from the body center to the spawn point.
    pub spawn_direction: DVec3,
    /// Tilt the orbit out of the equatorial plane (degrees). `None` keeps the
    /// spawned circular orbit.
    pub inclination_deg: Option<f64>,
    /// Satellite mass (kg).
    pub satellite_mass: f64,
    /// Initial time scale.
    pub time_scale: f64,
    /// Whether to start paused.
    pub start_paused: bool,
}

/// Failure to build a scenario.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("unknown scenario '{0}'")]
    Unknown(String),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error(transparent)]
    Maneuver(#[from] ManeuverError),
}

impl Scenario {
    pub fn spawn_position(&self) -> DVec3 {
        self.spawn_direction * (self.body.radius() + self.altitude)
    }

    /// Build a fresh simulation for this scenario.
    pub fn build(&self, config: SimulationConfig) -> Result<Simulation, ScenarioError> {
        let mut sim = Simulation::spawn(
            self.body,
            self.spawn_position(),
            self.satellite_mass,
            config,
        )?;
        if let Some(inclination) = self.inclination_deg {
            sim.create_inclined_orbit(inclination, self.altitude, OrbitShape::Circular)?;
        }
        // Setup maneuvers are not part of the run
        sim.drain_events();
        Ok(sim)
    }
}

/// Resource tracking the current active scenario.
#[derive(Resource)]
pub struct CurrentScenario {
    /// ID of the current scenario.
    pub id: &'static str,
}

impl Default for CurrentScenario {
    fn default() -> Self {
        Self {
            id: presets::EARTH_LEO.id,
        }
    }
}

/// Message to trigger loading a scenario.
#[derive(Message, Clone, Debug)]
pub struct LoadScenarioEvent {
    /// ID of the scenario to load.
    pub scenario_id: &'static str,
}

/// Plugin providing scenario management.
pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentScenario>()
            .add_message::<LoadScenarioEvent>()
            .add_systems(
                Update,
                handle_load_scenario_event.before(SimulationSet::Commands),
            );
    }
}

/// Replace the simulation when a scenario is requested.
fn handle_load_scenario_event(
    mut events: MessageReader<LoadScenarioEvent>,
    mut sim: ResMut<Simulation>,
    mut sim_time: ResMut<SimulationTime>,
    mut current_scenario: ResMut<CurrentScenario>,
    config: Res<SimulationConfig>,
) {
    for event in events.read() {
        match load_scenario(event.scenario_id, config.clone()) {
            Ok((scenario, fresh)) => {
                info!("Loading scenario: {} ({})", scenario.name, scenario.id);
                *sim = fresh;
                sim_time.reset();
                sim_time.scale = scenario.time_scale;
                sim_time.paused = scenario.start_paused;
                current_scenario.id = scenario.id;
            }
            Err(err) => warn!("Scenario not loaded: {}", err),
        }
    }
}

/// Look up `id` and build its simulation.
pub fn load_scenario(
    id: &str,
    config: SimulationConfig,
) -> Result<(&'static Scenario, Simulation), ScenarioError> {
    let scenario = get_scenario(id).ok_or_else(|| ScenarioError::Unknown(id.to_string()))?;
    let sim = scenario.build(config)?;
    Ok((scenario, sim))
}

/// Get a scenario by ID.
pub fn get_scenario(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.id == id)
}
