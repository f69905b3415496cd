//! Post-integration altitude checks: the latched low-altitude warning and
//! crash detection.

use bevy::math::DVec3;

use crate::types::CentralBody;

/// Altitude (m) below which the low-altitude warning fires.
pub const DEFAULT_LOW_ALTITUDE_THRESHOLD: f64 = 200_000.0;

/// What the monitor saw this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AltitudeCheck {
    /// Altitude at the time of the check (m)
    pub altitude: f64,
    /// Set only on the tick the warning first fires for the current orbit
    pub low_altitude_warning: bool,
    /// Position is at or inside the central body
    pub crashed: bool,
}

/// Per-orbit altitude state.
///
/// The low-altitude warning is latched: it fires once and stays quiet until
/// `rearm` is called by a maneuver that defines a new orbit.
#[derive(Clone, Debug)]
pub struct AltitudeMonitor {
    threshold: f64,
    warned: bool,
}

impl Default for AltitudeMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_ALTITUDE_THRESHOLD)
    }
}

impl AltitudeMonitor {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            warned: false,
        }
    }

    /// Inspect the freshly integrated position.
    pub fn check(&mut self, pos: DVec3, body: &CentralBody) -> AltitudeCheck {
        let altitude = body.altitude_of(pos);

        let low_altitude_warning = altitude < self.threshold && !self.warned;
        if low_altitude_warning {
            self.warned = true;
        }

        AltitudeCheck {
            altitude,
            low_altitude_warning,
            crashed: pos.length() <= body.radius(),
        }
    }

    /// Allow the warning to fire again for a new orbit.
    pub fn rearm(&mut self) {
        self.warned = false;
    }

    pub fn has_warned(&self) -> bool {
        self.warned
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
