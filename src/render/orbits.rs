//! Trajectory trail and force/velocity vectors using Bevy Gizmos.

use bevy::math::DVec3;
use bevy::prelude::*;

use super::palette;
use crate::camera::to_render;
use crate::simulation::Simulation;

/// Render units of arrow per m/s of speed.
pub const VELOCITY_ARROW_SCALE: f64 = 2e-3;

/// Render units of arrow per m/s² of acceleration.
pub const ACCELERATION_ARROW_SCALE: f64 = 2.0;

/// Opacity of trail sample `i` of `total`; the oldest fades out.
pub fn trail_alpha(i: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let t = (i + 1) as f32 / total as f32;
    0.1 + 0.9 * t
}

/// Arrow tip for a vector drawn from `base`, or `None` if it would be invisible.
pub fn arrow_tip(base: Vec3, vector: DVec3, scale: f64) -> Option<Vec3> {
    let scaled = (vector * scale).as_vec3();
    (scaled.length_squared() > 1e-6).then_some(base + scaled)
}

/// Draw the recorded trail, oldest segments dimmest.
pub(super) fn draw_trajectory(sim: Res<Simulation>, mut gizmos: Gizmos) {
    let trail = sim.trajectory();
    // Need at least 2 points to draw lines
    if trail.len() < 2 {
        return;
    }

    let total = trail.len();
    let mut prev: Option<Vec3> = None;
    for (i, pos) in trail.iter().enumerate() {
        let render_pos = to_render(*pos);
        if let Some(prev) = prev {
            let color = palette::TRAJECTORY.with_alpha(trail_alpha(i, total));
            gizmos.line(prev, render_pos, color);
        }
        prev = Some(render_pos);
    }
}

/// Velocity and gravity-acceleration arrows at the satellite.
pub(super) fn draw_vectors(sim: Res<Simulation>, mut gizmos: Gizmos) {
    let telemetry = sim.telemetry();
    if !telemetry.active {
        return;
    }

    let base = to_render(telemetry.position);
    if let Some(tip) = arrow_tip(base, telemetry.velocity, VELOCITY_ARROW_SCALE) {
        gizmos.arrow(base, tip, palette::VELOCITY);
    }
    let gravity_acc = telemetry.gravity / telemetry.mass;
    if let Some(tip) = arrow_tip(base, gravity_acc, ACCELERATION_ARROW_SCALE) {
        gizmos.arrow(base, tip, palette::GRAVITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_alpha_fades_oldest() {
        assert!(trail_alpha(0, 100) < trail_alpha(99, 100));
        assert!(trail_alpha(99, 100) > 0.99);
        assert_eq!(trail_alpha(0, 0), 0.0);
    }

    #[test]
    fn test_arrow_tip() {
        let tip = arrow_tip(Vec3::ZERO, DVec3::new(7500.0, 0.0, 0.0), VELOCITY_ARROW_SCALE);
        assert_eq!(tip, Some(Vec3::new(15.0, 0.0, 0.0)));
        assert_eq!(arrow_tip(Vec3::ONE, DVec3::ZERO, VELOCITY_ARROW_SCALE), None);
    }
}
