//! Numerical integration for the satellite.
//!
//! Semi-implicit (symplectic) Euler: the velocity is kicked first, then the
//! position drifts with the updated velocity. It is first order and keeps
//! angular momentum exact under a central force, but orbital energy wanders
//! at large `dt`. Good enough for an interactive view, not for long-horizon
//! propagation.

use bevy::math::DVec3;

use super::PhysicsError;
use super::forces::ForceBreakdown;

/// Result of one integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EulerStep {
    pub pos: DVec3,
    pub vel: DVec3,
    /// Acceleration used for the kick (m/s²)
    pub acc: DVec3,
}

/// Advance `pos`/`vel` by `dt` seconds under `forces`.
pub fn semi_implicit_euler(
    pos: DVec3,
    vel: DVec3,
    mass: f64,
    forces: &ForceBreakdown,
    dt: f64,
) -> EulerStep {
    let acc = forces.net() / mass;
    let vel = vel + acc * dt;
    let pos = pos + vel * dt;
    EulerStep { pos, vel, acc }
}

/// Check a caller-supplied timestep.
pub fn validate_dt(dt: f64) -> Result<f64, PhysicsError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(PhysicsError::InvalidTimestep(dt))
    }
}

/// Local circular speed sqrt(μ/r).
#[inline]
pub fn circular_speed(mu: f64, r: f64) -> f64 {
    (mu / r).sqrt()
}

/// Local escape speed sqrt(2μ/r).
#[inline]
pub fn escape_speed(mu: f64, r: f64) -> f64 {
    (2.0 * mu / r).sqrt()
}

/// Vis-viva speed at radius `r` on an orbit with semi-major axis `a`.
#[inline]
pub fn vis_viva_speed(mu: f64, r: f64, a: f64) -> f64 {
    (mu * (2.0 / r - 1.0 / a)).sqrt()
}

/// Circular-orbit velocity at `pos`, tangent `normalize(pos × up_axis)`.
pub fn circular_velocity(pos: DVec3, mu: f64, up_axis: DVec3) -> Result<DVec3, PhysicsError> {
    let r = pos.length();
    if r == 0.0 {
        return Err(PhysicsError::ZeroRadius);
    }
    let tangent = pos
        .cross(up_axis)
        .try_normalize()
        .ok_or(PhysicsError::TangentUndefined)?;
    Ok(tangent * circular_speed(mu, r))
}
