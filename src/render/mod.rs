//! Rendering systems for the satellite simulator.
//!
//! Everything is drawn with gizmos from the [`Simulation`] telemetry each
//! frame; nothing here writes back to the engine.
//!
//! [`Simulation`]: crate::simulation::Simulation

mod bodies;
mod orbits;

use bevy::prelude::*;

use self::bodies::{draw_central_body, draw_satellite};
use self::orbits::{draw_trajectory, draw_vectors};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.03)))
            .add_systems(
                Update,
                (draw_central_body, draw_trajectory, draw_satellite, draw_vectors),
            );
    }
}

/// Colors shared by the render systems.
pub mod palette {
    use bevy::prelude::Color;

    pub const BODY: Color = Color::srgb(0.2, 0.45, 0.85);
    pub const SATELLITE: Color = Color::srgb(0.95, 0.95, 0.95);
    pub const CRASHED: Color = Color::srgb(0.9, 0.15, 0.1);
    pub const TRAJECTORY: Color = Color::srgba(0.3, 0.9, 0.5, 0.8);
    pub const VELOCITY: Color = Color::srgb(0.2, 0.9, 0.9);
    pub const GRAVITY: Color = Color::srgb(0.95, 0.75, 0.2);
}
