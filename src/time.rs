//! Time advancement system for the satellite simulator.
//!
//! Handles progression of the simulation clock based on scale and pause state.

use bevy::prelude::*;

use crate::types::{SimulationSet, SimulationTime};

/// Plugin providing time advancement functionality.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationTime>()
            .add_systems(Update, advance_time.after(SimulationSet::Step));
    }
}

/// Advance the clock by the same amount the physics tick just covered.
///
/// One frame is `step_seconds * scale` simulated seconds regardless of
/// real frame time.
fn advance_time(mut sim_time: ResMut<SimulationTime>) {
    if let Some(dt) = sim_time.frame_dt() {
        sim_time.elapsed += dt;
    }
}
