//! Gravity and drag force computation.
//!
//! Gravity treats the central body as a point mass at the origin. Drag uses
//! a constant atmospheric density at every altitude.

use bevy::math::DVec3;

use super::PhysicsError;
use crate::types::CentralBody;

/// Constant-density drag parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragModel {
    /// Atmospheric density (kg/m³)
    pub density: f64,
    /// Dimensionless drag coefficient
    pub coefficient: f64,
    /// Cross-sectional area (m²)
    pub area: f64,
}

impl Default for DragModel {
    fn default() -> Self {
        Self {
            density: 1e-12,
            coefficient: 0.47,
            area: std::f64::consts::PI * 2.0 * 2.0, // 2 m radius disc
        }
    }
}

impl DragModel {
    /// A vacuum: drag is always zero.
    pub const fn none() -> Self {
        Self {
            density: 0.0,
            coefficient: 0.0,
            area: 0.0,
        }
    }

    /// Drag force magnitude at the given speed: ½·ρ·v²·Cd·A.
    #[inline]
    pub fn magnitude(&self, speed: f64) -> f64 {
        0.5 * self.density * speed * speed * self.coefficient * self.area
    }
}

/// Forces acting on the satellite for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForceBreakdown {
    pub gravity: DVec3,
    pub drag: DVec3,
}

impl ForceBreakdown {
    pub fn net(&self) -> DVec3 {
        self.gravity + self.drag
    }
}

/// Gravitational force on a satellite of `mass` at `pos`.
///
/// Magnitude G·M·m/r², directed toward the body center.
#[inline]
pub fn gravity(pos: DVec3, mass: f64, body: &CentralBody) -> Result<DVec3, PhysicsError> {
    let r_squared = pos.length_squared();
    let toward_center = (-pos).try_normalize().ok_or(PhysicsError::ZeroRadius)?;
    Ok(toward_center * (body.mu() * mass / r_squared))
}

/// Drag force opposing `vel`. Zero when the satellite is at rest.
#[inline]
pub fn drag(vel: DVec3, model: &DragModel) -> DVec3 {
    let Some(direction) = vel.try_normalize() else {
        return DVec3::ZERO;
    };
    -direction * model.magnitude(vel.length())
}

/// Gravity and drag for the current state.
pub fn net_force(
    pos: DVec3,
    vel: DVec3,
    mass: f64,
    body: &CentralBody,
    model: &DragModel,
) -> Result<ForceBreakdown, PhysicsError> {
    Ok(ForceBreakdown {
        gravity: gravity(pos, mass, body)?,
        drag: drag(vel, model),
    })
}
