//! Camera system for the satellite simulator.
//!
//! Three modes, switched with F1–F3:
//! - Free: orbit the central body with the right mouse button, zoom with the wheel
//! - Follow: chase the satellite from just outside its radial position
//! - Top: look straight down the up-axis onto the equatorial plane

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    math::DVec3,
    prelude::*,
};

use crate::simulation::Simulation;

/// Render scale: 1 render unit = 100 km.
/// Earth is ~64 render units across in radius; GEO sits at ~420.
pub const RENDER_SCALE: f64 = 1e-5;

/// Closest free-camera distance from the body center (render units).
pub const MIN_DISTANCE: f32 = 20.0;

/// Furthest free-camera distance (render units).
pub const MAX_DISTANCE: f32 = 5000.0;

pub const DEFAULT_DISTANCE: f32 = 250.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Radians of rotation per pixel of mouse drag.
pub const ORBIT_SPEED: f32 = 0.005;

/// Distance behind the satellite in follow mode (render units).
pub const FOLLOW_DISTANCE: f32 = 30.0;

/// Fraction of the remaining distance covered per frame in follow mode.
pub const FOLLOW_SMOOTHING: f32 = 0.1;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    Free,
    Follow,
    Top,
}

/// Free-camera orbit parameters around the body center.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub distance: f32,
    /// Rotation about the up-axis (radians).
    pub yaw: f32,
    /// Elevation above the equatorial plane (radians).
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            yaw: 0.0,
            pitch: 0.3,
        }
    }
}

/// Where the camera should be and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraGoal {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraMode>()
            .init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (camera_mode_keys, camera_zoom, camera_orbit, update_camera).chain(),
            );
    }
}

/// Simulation meters to render units.
pub fn to_render(pos: DVec3) -> Vec3 {
    (pos * RENDER_SCALE).as_vec3()
}

/// Camera placement for `mode` given the satellite's render position.
pub fn camera_goal(mode: CameraMode, state: &CameraState, satellite: Vec3) -> CameraGoal {
    match mode {
        CameraMode::Free => {
            let (sin_yaw, cos_yaw) = state.yaw.sin_cos();
            let (sin_pitch, cos_pitch) = state.pitch.sin_cos();
            let eye = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * state.distance;
            CameraGoal {
                eye,
                target: Vec3::ZERO,
                up: Vec3::Y,
            }
        }
        CameraMode::Follow => {
            let outward = satellite.normalize_or(Vec3::Z);
            CameraGoal {
                eye: satellite + outward * FOLLOW_DISTANCE + Vec3::Y * (FOLLOW_DISTANCE * 0.3),
                target: satellite,
                up: Vec3::Y,
            }
        }
        CameraMode::Top => CameraGoal {
            eye: Vec3::Y * state.distance,
            target: Vec3::ZERO,
            // Looking along -Y, so Y cannot be the up vector
            up: Vec3::NEG_Z,
        },
    }
}

fn setup_camera(mut commands: Commands) {
    let goal = camera_goal(CameraMode::default(), &CameraState::default(), Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            far: 100_000.0,
            ..default()
        }),
        Transform::from_translation(goal.eye).looking_at(goal.target, goal.up),
        MainCamera,
    ));
}

/// F1–F3 select the camera mode.
fn camera_mode_keys(keys: Res<ButtonInput<KeyCode>>, mut mode: ResMut<CameraMode>) {
    let selected = if keys.just_pressed(KeyCode::F1) {
        CameraMode::Free
    } else if keys.just_pressed(KeyCode::F2) {
        CameraMode::Follow
    } else if keys.just_pressed(KeyCode::F3) {
        CameraMode::Top
    } else {
        return;
    };
    if *mode != selected {
        *mode = selected;
        info!("Camera mode: {:?}", selected);
    }
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(mouse_scroll: Res<AccumulatedMouseScroll>, mut state: ResMut<CameraState>) {
    if mouse_scroll.delta.y == 0.0 {
        return;
    }
    // Logarithmic zoom
    let zoom_factor = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;
    state.distance = (state.distance * zoom_factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
}

/// Right mouse drag rotates the free camera.
fn camera_orbit(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mode: Res<CameraMode>,
    mut state: ResMut<CameraState>,
) {
    if *mode != CameraMode::Free || !mouse_buttons.pressed(MouseButton::Right) {
        return;
    }
    let delta = mouse_motion.delta * ORBIT_SPEED;
    state.yaw -= delta.x;
    // Stay clear of the poles so Y remains a valid up vector
    state.pitch = (state.pitch + delta.y).clamp(-1.5, 1.5);
}

fn update_camera(
    mode: Res<CameraMode>,
    state: Res<CameraState>,
    sim: Res<Simulation>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let goal = camera_goal(*mode, &state, to_render(sim.satellite().pos));
    let eye = match *mode {
        CameraMode::Follow => transform.translation.lerp(goal.eye, FOLLOW_SMOOTHING),
        _ => goal.eye,
    };
    *transform = Transform::from_translation(eye).looking_at(goal.target, goal.up);
}
