//! Physics for a single satellite around a point-mass central body.
//!
//! Forces and the integrator are pure functions over [`DVec3`] state. The
//! [`PhysicsPlugin`] wires the [`Simulation`] engine into Bevy's `Update`
//! schedule: operator commands first, then one tick per frame, then the
//! engine's queued events are published as messages.
//!
//! [`DVec3`]: bevy::math::DVec3

mod forces;
mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::prelude::*;

pub use forces::{drag, gravity, net_force, DragModel, ForceBreakdown};
pub use integrator::{
    circular_speed, circular_velocity, escape_speed, semi_implicit_euler, validate_dt,
    vis_viva_speed, EulerStep,
};

use crate::maneuver::ManeuverCommand;
use crate::simulation::{SimEvent, Simulation, SimulationConfig};
use crate::types::{SimulationSet, SimulationTime};

/// Degenerate geometry or input the physics cannot handle.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    /// Position coincides with the body center; gravity is undefined.
    #[error("position is at the center of the central body")]
    ZeroRadius,

    /// No direction of motion to burn along.
    #[error("velocity is zero; direction of motion is undefined")]
    ZeroVelocity,

    /// Position is parallel to the up-axis, so no tangent exists.
    #[error("position is parallel to the up-axis; orbital tangent is undefined")]
    TangentUndefined,

    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),
}

/// Plugin running the satellite simulation.
///
/// Uses the `Simulation` and `SimulationConfig` resources if they were
/// inserted before the plugin, otherwise the reference Earth orbit.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .init_resource::<SimulationTime>()
            .init_resource::<Simulation>()
            .add_message::<ManeuverCommand>()
            .add_message::<SimEvent>()
            .configure_sets(
                Update,
                (
                    SimulationSet::Commands,
                    SimulationSet::Step,
                    SimulationSet::Publish,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    apply_maneuver_commands.in_set(SimulationSet::Commands),
                    physics_step.in_set(SimulationSet::Step),
                    publish_events.in_set(SimulationSet::Publish),
                ),
            );
    }
}

/// Apply operator maneuvers queued since the last frame.
///
/// Rejections are already logged and queued as events by the engine.
fn apply_maneuver_commands(
    mut commands: MessageReader<ManeuverCommand>,
    mut sim: ResMut<Simulation>,
) {
    for command in commands.read() {
        if let Err(err) = sim.apply_command(command) {
            debug!("{:?} not applied: {}", command, err);
        }
    }
}

/// Advance the engine by one frame's worth of simulated time.
fn physics_step(mut sim: ResMut<Simulation>, sim_time: Res<SimulationTime>) {
    let Some(dt) = sim_time.frame_dt() else {
        return;
    };

    match sim.step(dt) {
        Ok(_) => {
            let telemetry = sim.telemetry();
            debug!(
                "alt {:.1} km, speed {:.1} m/s, {}",
                telemetry.altitude / 1000.0,
                telemetry.speed,
                telemetry.orbit_class
            );
        }
        Err(err) => warn!("Simulation step skipped: {}", err),
    }
}

/// Forward queued engine events to message readers.
fn publish_events(mut sim: ResMut<Simulation>, mut events: MessageWriter<SimEvent>) {
    for event in sim.drain_events() {
        events.write(event);
    }
}
