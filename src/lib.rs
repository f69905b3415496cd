//! Orbiter - Satellite Orbit Simulator
//!
//! A library crate providing the satellite simulation engine and its Bevy
//! plugins, for the binary and for integration tests.

pub mod camera;
pub mod input;
pub mod maneuver;
pub mod monitor;
pub mod orbit;
pub mod physics;
pub mod render;
pub mod scenarios;
pub mod simulation;
pub mod time;
pub mod trajectory;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
