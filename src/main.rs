//! Orbiter - Satellite Orbit Simulator
//!
//! A desktop application for flying a satellite around Earth, the Moon or
//! Mars with impulsive maneuvers.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orbiter::camera::CameraPlugin;
use orbiter::input::InputPlugin;
use orbiter::physics::PhysicsPlugin;
use orbiter::render::RenderPlugin;
use orbiter::scenarios::ScenarioPlugin;
use orbiter::time::TimePlugin;
use orbiter::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orbiter".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Add simulation plugins
        .add_plugins((
            PhysicsPlugin,
            TimePlugin,
            ScenarioPlugin,
            InputPlugin,
            CameraPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();
}
