//! Impulsive maneuvers and the deferred transfer burn.
//!
//! Every maneuver is an instantaneous change to the velocity (and, for the
//! orbit-rewriting commands, the position) applied between ticks. The only
//! in-flight state is the [`PendingManeuver`] left by a transfer, resolved by
//! watching the radius each tick.

use std::fmt;
use std::str::FromStr;

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::physics::{circular_speed, escape_speed, vis_viva_speed, PhysicsError};
use crate::types::{CentralBody, SatelliteState, DEG_TO_RAD};

/// Default radius tolerance (m) for completing a pending transfer.
pub const DEFAULT_TRANSFER_TOLERANCE: f64 = 1000.0;

/// Escape burns target this multiple of local escape speed.
pub const ESCAPE_SPEED_FACTOR: f64 = 1.05;

/// Apoapsis of an authored elliptical orbit, as a multiple of its periapsis.
pub const ELLIPTICAL_APOAPSIS_FACTOR: f64 = 1.5;

/// Authored orbits start on this axis.
pub const REFERENCE_AXIS: DVec3 = DVec3::X;

/// Why a maneuver was rejected. State is untouched whenever one of these is
/// returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ManeuverError {
    #[error("satellite has crashed; maneuvers no longer apply")]
    Inactive,

    #[error("target radius {target_radius:.0} m is not above the surface ({surface_radius:.0} m)")]
    BelowSurface { target_radius: f64, surface_radius: f64 },

    #[error("unknown orbit type '{0}' (expected circular, elliptical or escape)")]
    UnknownOrbitType(String),

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Advisory attached to a maneuver that still went through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ManeuverWarning {
    /// Speed after the burn is at or above local escape speed.
    EscapeVelocity { speed: f64, escape_speed: f64 },
}

/// Outcome of an accepted maneuver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ManeuverOutcome {
    Applied {
        /// Change in speed (m/s)
        delta_v: f64,
    },
    AppliedWithWarning {
        delta_v: f64,
        warning: ManeuverWarning,
    },
}

impl ManeuverOutcome {
    pub fn delta_v(&self) -> f64 {
        match self {
            ManeuverOutcome::Applied { delta_v }
            | ManeuverOutcome::AppliedWithWarning { delta_v, .. } => *delta_v,
        }
    }

    pub fn warning(&self) -> Option<ManeuverWarning> {
        match self {
            ManeuverOutcome::Applied { .. } => None,
            ManeuverOutcome::AppliedWithWarning { warning, .. } => Some(*warning),
        }
    }
}

/// Shape of an authored orbit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrbitShape {
    #[default]
    Circular,
    Elliptical,
}

impl FromStr for OrbitShape {
    type Err = ManeuverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circular" => Ok(OrbitShape::Circular),
            "elliptical" => Ok(OrbitShape::Elliptical),
            _ => Err(ManeuverError::UnknownOrbitType(s.to_string())),
        }
    }
}

/// Instantaneous, non-physical orbit rewrite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitChange {
    /// Teleport along the current radial to `altitude` and move at circular speed.
    Circular { altitude: f64 },
    /// Stay put, take the transfer-ellipse speed toward `apoapsis_altitude`.
    Elliptical { apoapsis_altitude: f64 },
    /// 5% above local escape speed.
    Escape,
}

impl OrbitChange {
    /// Build from an operator-supplied kind string.
    ///
    /// `value` is an altitude in meters; it is ignored for `escape`.
    pub fn parse(kind: &str, value: f64) -> Result<Self, ManeuverError> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "circular" => Ok(OrbitChange::Circular { altitude: value }),
            "elliptical" => Ok(OrbitChange::Elliptical {
                apoapsis_altitude: value,
            }),
            "escape" => Ok(OrbitChange::Escape),
            _ => Err(ManeuverError::UnknownOrbitType(kind.to_string())),
        }
    }
}

impl fmt::Display for OrbitChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrbitChange::Circular { altitude } => write!(f, "circular at {:.0} km", altitude / 1000.0),
            OrbitChange::Elliptical { apoapsis_altitude } => {
                write!(f, "elliptical to {:.0} km", apoapsis_altitude / 1000.0)
            }
            OrbitChange::Escape => f.write_str("escape"),
        }
    }
}

/// Operator command, issued between ticks.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum ManeuverCommand {
    /// Signed prograde burn (m/s).
    Thrust { delta_v: f64 },
    /// Hohmann-style transfer to a target altitude (m).
    Transfer { target_altitude: f64 },
    Circularize,
    InclinedOrbit {
        inclination_deg: f64,
        altitude: f64,
        shape: OrbitShape,
    },
    /// `kind` is one of circular, elliptical, escape.
    ChangeOrbitType { kind: String, value: f64 },
}

/// Second burn of a transfer, waiting for the target radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingManeuver {
    /// Always above the central body's surface.
    pub target_radius: f64,
}

/// Owns the deferred-maneuver state and computes every burn.
#[derive(Clone, Debug)]
pub struct ManeuverPlanner {
    pending: Option<PendingManeuver>,
    tolerance: f64,
}

impl Default for ManeuverPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSFER_TOLERANCE)
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, ManeuverError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ManeuverError::NonFinite { name, value })
    }
}

fn ensure_active(sat: &SatelliteState) -> Result<(), ManeuverError> {
    if sat.active {
        Ok(())
    } else {
        Err(ManeuverError::Inactive)
    }
}

/// Radius `altitude` above the surface, rejecting anything at or below it.
fn radius_above_surface(body: &CentralBody, altitude: f64) -> Result<f64, ManeuverError> {
    let target_radius = body.radius() + altitude;
    if target_radius <= body.radius() {
        return Err(ManeuverError::BelowSurface {
            target_radius,
            surface_radius: body.radius(),
        });
    }
    Ok(target_radius)
}

fn direction_of_motion(sat: &SatelliteState) -> Result<DVec3, PhysicsError> {
    sat.vel.try_normalize().ok_or(PhysicsError::ZeroVelocity)
}

fn nonzero_radius(sat: &SatelliteState) -> Result<f64, PhysicsError> {
    let r = sat.radius();
    if r == 0.0 {
        Err(PhysicsError::ZeroRadius)
    } else {
        Ok(r)
    }
}

impl ManeuverPlanner {
    pub fn new(tolerance: f64) -> Self {
        Self {
            pending: None,
            tolerance,
        }
    }

    pub fn pending(&self) -> Option<PendingManeuver> {
        self.pending
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget any pending transfer.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Burn `delta_v` along the current direction of motion.
    ///
    /// Positive is prograde, negative retrograde. Crossing local escape
    /// speed attaches a warning but the burn still happens.
    pub fn apply_thrust(
        &self,
        sat: &mut SatelliteState,
        body: &CentralBody,
        delta_v: f64,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        ensure_active(sat)?;
        let delta_v = finite("delta-v", delta_v)?;
        let r = nonzero_radius(sat)?;
        if delta_v != 0.0 {
            let direction = direction_of_motion(sat)?;
            sat.vel += direction * delta_v;
            info!("Thrust applied: Δv = {:.2} m/s", delta_v);
        }

        let speed = sat.speed();
        let escape_speed = escape_speed(body.mu(), r);
        if speed >= escape_speed {
            warn!(
                "Satellite at {:.1} m/s has reached escape velocity ({:.1} m/s)",
                speed, escape_speed
            );
            return Ok(ManeuverOutcome::AppliedWithWarning {
                delta_v,
                warning: ManeuverWarning::EscapeVelocity {
                    speed,
                    escape_speed,
                },
            });
        }
        Ok(ManeuverOutcome::Applied { delta_v })
    }

    /// First burn of a transfer to `target_altitude`.
    ///
    /// Puts the satellite on the ellipse from its current radius to the
    /// target radius and leaves a pending circularization that fires once
    /// the radius is within tolerance of the target.
    pub fn perform_orbital_transfer(
        &mut self,
        sat: &mut SatelliteState,
        body: &CentralBody,
        target_altitude: f64,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        ensure_active(sat)?;
        let target_radius = radius_above_surface(body, finite("target altitude", target_altitude)?)?;
        let r1 = nonzero_radius(sat)?;

        let semi_major_axis = 0.5 * (r1 + target_radius);
        let v_transfer = vis_viva_speed(body.mu(), r1, semi_major_axis);
        let outcome = self.apply_thrust(sat, body, v_transfer - sat.speed())?;

        self.pending = Some(PendingManeuver { target_radius });
        info!(
            "Orbital transfer initiated to {:.0} km, circularization pending",
            target_altitude / 1000.0
        );
        Ok(outcome)
    }

    /// Set speed to local circular speed, keeping the direction of motion.
    ///
    /// Supersedes any pending transfer.
    pub fn circularize(
        &mut self,
        sat: &mut SatelliteState,
        body: &CentralBody,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        ensure_active(sat)?;
        let r = nonzero_radius(sat)?;
        let direction = direction_of_motion(sat)?;

        let v_circular = circular_speed(body.mu(), r);
        let delta_v = v_circular - sat.speed();
        sat.vel = direction * v_circular;
        self.pending = None;

        info!(
            "Orbit circularized at {:.1} km (Δv = {:.2} m/s)",
            body.altitude_of(sat.pos) / 1000.0,
            delta_v
        );
        Ok(ManeuverOutcome::Applied { delta_v })
    }

    /// Complete the pending transfer if the radius has reached the target.
    ///
    /// Returns `Ok(None)` when nothing is pending or the target is not yet
    /// reached.
    pub fn check_pending(
        &mut self,
        sat: &mut SatelliteState,
        body: &CentralBody,
    ) -> Result<Option<ManeuverOutcome>, ManeuverError> {
        let Some(pending) = self.pending else {
            return Ok(None);
        };
        if (sat.radius() - pending.target_radius).abs() >= self.tolerance {
            return Ok(None);
        }
        let outcome = self.circularize(sat, body)?;
        Ok(Some(outcome))
    }

    /// Re-author the orbit from scratch.
    ///
    /// The satellite is placed on [`REFERENCE_AXIS`] at `altitude`, and its
    /// velocity is tilted from +Z toward +Y by the inclination. Elliptical
    /// orbits use the vis-viva speed for an apoapsis 1.5× the start radius.
    pub fn create_inclined_orbit(
        &mut self,
        sat: &mut SatelliteState,
        body: &CentralBody,
        inclination_deg: f64,
        altitude: f64,
        shape: OrbitShape,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        ensure_active(sat)?;
        let inclination = finite("inclination", inclination_deg)? * DEG_TO_RAD;
        let r = radius_above_surface(body, finite("altitude", altitude)?)?;

        let speed = match shape {
            OrbitShape::Circular => circular_speed(body.mu(), r),
            OrbitShape::Elliptical => {
                let apoapsis = r * ELLIPTICAL_APOAPSIS_FACTOR;
                vis_viva_speed(body.mu(), r, 0.5 * (r + apoapsis))
            }
        };
        let direction = DVec3::Z * inclination.cos() + DVec3::Y * inclination.sin();

        let delta_v = speed - sat.speed();
        sat.pos = REFERENCE_AXIS * r;
        sat.vel = direction * speed;
        self.pending = None;

        info!(
            "Inclined orbit created: {:.1}° at {:.0} km ({:?})",
            inclination_deg,
            altitude / 1000.0,
            shape
        );
        Ok(ManeuverOutcome::Applied { delta_v })
    }

    /// Apply an instantaneous orbit rewrite. Supersedes any pending transfer.
    pub fn change_orbit_type(
        &mut self,
        sat: &mut SatelliteState,
        body: &CentralBody,
        change: OrbitChange,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        ensure_active(sat)?;
        let r1 = nonzero_radius(sat)?;
        let direction = direction_of_motion(sat)?;
        let mu = body.mu();

        let (pos, speed) = match change {
            OrbitChange::Circular { altitude } => {
                let target_radius = radius_above_surface(body, finite("altitude", altitude)?)?;
                let radial = sat.pos / r1;
                (radial * target_radius, circular_speed(mu, target_radius))
            }
            OrbitChange::Elliptical { apoapsis_altitude } => {
                let apoapsis = radius_above_surface(body, finite("altitude", apoapsis_altitude)?)?;
                (sat.pos, vis_viva_speed(mu, r1, 0.5 * (r1 + apoapsis)))
            }
            OrbitChange::Escape => (sat.pos, ESCAPE_SPEED_FACTOR * escape_speed(mu, r1)),
        };

        let delta_v = speed - sat.speed();
        sat.pos = pos;
        sat.vel = direction * speed;
        self.pending = None;

        info!("Orbit changed: {} (Δv = {:.2} m/s)", change, delta_v);
        Ok(ManeuverOutcome::Applied { delta_v })
    }
}
