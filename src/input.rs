//! Keyboard controls for maneuvers and simulation time.
//!
//! Maneuver keys are turned into [`ManeuverCommand`] messages; the engine
//! applies them before the next tick. Camera keys live in `camera`.

use bevy::prelude::*;

use crate::maneuver::{ManeuverCommand, OrbitShape};
use crate::types::{SimulationSet, SimulationTime};

/// Δv (m/s) of a single B/R burn.
pub const THRUST_STEP: f64 = 100.0;

/// Target altitude (m) for the T transfer key.
pub const TRANSFER_ALTITUDE: f64 = 1_500_000.0;

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_maneuvers, keyboard_shortcuts).before(SimulationSet::Commands),
        );
    }
}

/// Maneuver bound to `key`, if any.
pub fn maneuver_for_key(key: KeyCode) -> Option<ManeuverCommand> {
    let command = match key {
        KeyCode::KeyB => ManeuverCommand::Thrust {
            delta_v: THRUST_STEP,
        },
        KeyCode::KeyR => ManeuverCommand::Thrust {
            delta_v: -THRUST_STEP,
        },
        KeyCode::KeyT => ManeuverCommand::Transfer {
            target_altitude: TRANSFER_ALTITUDE,
        },
        KeyCode::KeyC => ManeuverCommand::Circularize,
        KeyCode::KeyX => ManeuverCommand::ChangeOrbitType {
            kind: "escape".to_string(),
            value: 0.0,
        },
        // Equatorial
        KeyCode::KeyA => ManeuverCommand::InclinedOrbit {
            inclination_deg: 0.0,
            altitude: 600_000.0,
            shape: OrbitShape::Circular,
        },
        // Polar
        KeyCode::KeyZ => ManeuverCommand::InclinedOrbit {
            inclination_deg: 90.0,
            altitude: 700_000.0,
            shape: OrbitShape::Circular,
        },
        KeyCode::KeyS => ManeuverCommand::InclinedOrbit {
            inclination_deg: 45.0,
            altitude: 800_000.0,
            shape: OrbitShape::Elliptical,
        },
        _ => return None,
    };
    Some(command)
}

/// Speed multiplier bound to `key`, if any.
pub fn time_scale_for_key(key: KeyCode) -> Option<f64> {
    match key {
        KeyCode::Digit1 => Some(1.0),
        KeyCode::Digit2 => Some(2.0),
        KeyCode::Digit3 => Some(5.0),
        KeyCode::Digit4 => Some(10.0),
        _ => None,
    }
}

fn keyboard_maneuvers(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: MessageWriter<ManeuverCommand>,
) {
    for key in keys.get_just_pressed() {
        if let Some(command) = maneuver_for_key(*key) {
            debug!("{:?} -> {:?}", key, command);
            commands.write(command);
        }
    }
}

/// Pause and speed controls.
fn keyboard_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut sim_time: ResMut<SimulationTime>) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        sim_time.paused = !sim_time.paused;
        info!("Simulation {}", if sim_time.paused { "paused" } else { "running" });
    }

    for key in keys.get_just_pressed() {
        if let Some(scale) = time_scale_for_key(*key) {
            sim_time.scale = scale;
            info!("Time scale: {}x", scale);
        }
    }
}
