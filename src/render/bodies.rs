//! Central body and satellite markers.

use bevy::prelude::*;

use super::palette;
use crate::camera::{to_render, RENDER_SCALE};
use crate::simulation::Simulation;

/// Satellite marker radius (render units).
const SATELLITE_MARKER_RADIUS: f32 = 0.8;

pub(super) fn draw_central_body(sim: Res<Simulation>, mut gizmos: Gizmos) {
    let radius = (sim.central_body().radius() * RENDER_SCALE) as f32;
    gizmos
        .sphere(Isometry3d::IDENTITY, radius, palette::BODY)
        .resolution(48);
}

/// Satellite marker; a crashed satellite is drawn as a red cross at the impact point.
pub(super) fn draw_satellite(sim: Res<Simulation>, mut gizmos: Gizmos) {
    let pos = to_render(sim.satellite().pos);

    if sim.is_active() {
        gizmos.sphere(
            Isometry3d::from_translation(pos),
            SATELLITE_MARKER_RADIUS,
            palette::SATELLITE,
        );
        return;
    }

    let size = SATELLITE_MARKER_RADIUS * 2.0;
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        gizmos.line(pos - axis * size, pos + axis * size, palette::CRASHED);
    }
}
