//! The simulation engine: one satellite around one central body.
//!
//! [`Simulation::step`] runs a tick in a fixed order: forces, integration,
//! altitude checks, classification, trail, then the pending-transfer check.
//! Maneuvers can be issued between ticks through the methods on
//! [`Simulation`]; every outcome and warning is queued as a [`SimEvent`] for
//! the caller to drain.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::maneuver::{
    ManeuverCommand, ManeuverError, ManeuverOutcome, ManeuverPlanner, ManeuverWarning,
    OrbitChange, OrbitShape, PendingManeuver, DEFAULT_TRANSFER_TOLERANCE,
};
use crate::monitor::{AltitudeMonitor, DEFAULT_LOW_ALTITUDE_THRESHOLD};
use crate::orbit::{classify, compute_orbital_elements, specific_energy, OrbitClass, OrbitalElements};
use crate::physics::{
    circular_speed, net_force, semi_implicit_euler, validate_dt, DragModel, ForceBreakdown,
    PhysicsError,
};
use crate::trajectory::{TrajectoryHistory, DEFAULT_TRAJECTORY_CAPACITY};
use crate::types::{CentralBody, SatelliteState, SpawnError, EARTH_RADIUS};

/// Engine tuning and feature switches.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Atmospheric drag parameters.
    pub drag: DragModel,
    /// Record the trail of past positions.
    pub record_trajectory: bool,
    /// Run the low-altitude warning and crash checks.
    pub detect_crashes: bool,
    /// Trail length before the oldest sample is evicted.
    pub trajectory_capacity: usize,
    /// Altitude (m) below which the low-altitude warning fires.
    pub low_altitude_threshold: f64,
    /// Radius window (m) that completes a pending transfer.
    pub transfer_tolerance: f64,
    /// Axis used to pick the tangent for spawned orbits.
    pub up_axis: DVec3,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            drag: DragModel::default(),
            record_trajectory: true,
            detect_crashes: true,
            trajectory_capacity: DEFAULT_TRAJECTORY_CAPACITY,
            low_altitude_threshold: DEFAULT_LOW_ALTITUDE_THRESHOLD,
            transfer_tolerance: DEFAULT_TRANSFER_TOLERANCE,
            up_axis: DVec3::Y,
        }
    }
}

/// Something the engine wants its collaborators to know about.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum SimEvent {
    /// Altitude dropped below the warning threshold. Once per orbit.
    LowAltitude { altitude: f64 },
    /// The satellite hit the central body. Terminal.
    Crashed { position: DVec3, impact_speed: f64 },
    /// A burn left the satellite at or above local escape speed.
    EscapeVelocityExceeded { speed: f64, escape_speed: f64 },
    /// A maneuver command was refused; nothing changed.
    ManeuverRejected(ManeuverError),
    /// First transfer burn done, circularization pending.
    TransferStarted { target_radius: f64 },
    /// The pending transfer circularized.
    TransferCompleted { radius: f64 },
    OrbitClassChanged { from: OrbitClass, to: OrbitClass },
}

/// What a call to [`Simulation::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// State advanced by `dt`.
    Advanced,
    /// State advanced and the satellite crashed on this tick.
    Crashed,
    /// Satellite was already inactive; nothing moved.
    Inactive,
}

/// Read-only snapshot for renderers and UI.
#[derive(Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub position: DVec3,
    pub velocity: DVec3,
    pub speed: f64,
    pub mass: f64,
    pub active: bool,
    /// Net acceleration from the last force evaluation, taken at the
    /// position before the latest tick.
    pub acceleration: DVec3,
    /// Gravity force at the pre-tick position.
    pub gravity: DVec3,
    /// Drag force at the pre-tick state.
    pub drag: DVec3,
    pub altitude: f64,
    pub orbit_class: OrbitClass,
    /// Specific orbital energy, when defined.
    pub energy: Option<f64>,
}

/// How a maneuver affects the per-orbit bookkeeping.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OrbitEffect {
    /// Adjusts the current orbit; trail and latch stay.
    Adjust,
    /// Defines a new orbit; trail cleared and low-altitude warning re-armed.
    Redefine,
}

#[derive(Resource, Clone, Debug)]
pub struct Simulation {
    body: CentralBody,
    satellite: SatelliteState,
    config: SimulationConfig,
    planner: ManeuverPlanner,
    monitor: AltitudeMonitor,
    history: TrajectoryHistory,
    forces: ForceBreakdown,
    acceleration: DVec3,
    orbit_class: OrbitClass,
    events: Vec<SimEvent>,
}

impl FromWorld for Simulation {
    /// The reference orbit, tuned by the app's `SimulationConfig` if present.
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();
        Self::reference(config)
    }
}

impl Simulation {
    /// The reference scenario: 500 kg at 600 km above Earth on +Z, moving
    /// at circular speed along `+Z × +Y = -X`.
    pub fn reference(config: SimulationConfig) -> Self {
        let body = CentralBody::earth();
        let r = EARTH_RADIUS + 600_000.0;
        let satellite = SatelliteState {
            pos: DVec3::Z * r,
            vel: DVec3::NEG_X * circular_speed(body.mu(), r),
            mass: 500.0,
            active: true,
        };
        Self::new(body, satellite, config)
    }

    pub fn new(body: CentralBody, satellite: SatelliteState, config: SimulationConfig) -> Self {
        let orbit_class = classify(satellite.pos, satellite.vel, body.mu()).unwrap_or_default();
        Self {
            planner: ManeuverPlanner::new(config.transfer_tolerance),
            monitor: AltitudeMonitor::new(config.low_altitude_threshold),
            history: TrajectoryHistory::with_capacity(config.trajectory_capacity),
            forces: ForceBreakdown::default(),
            acceleration: DVec3::ZERO,
            orbit_class,
            events: Vec::new(),
            body,
            satellite,
            config,
        }
    }

    /// Spawn a satellite at `pos` on a circular orbit.
    pub fn spawn(
        body: CentralBody,
        pos: DVec3,
        mass: f64,
        config: SimulationConfig,
    ) -> Result<Self, SpawnError> {
        let satellite = SatelliteState::spawn(pos, mass, &body, config.up_axis)?;
        Ok(Self::new(body, satellite, config))
    }

    /// Advance the simulation by `dt` simulated seconds.
    ///
    /// On error nothing is modified. A crashed satellite stays frozen and
    /// every later call returns [`TickOutcome::Inactive`].
    pub fn step(&mut self, dt: f64) -> Result<TickOutcome, PhysicsError> {
        let dt = validate_dt(dt)?;
        if !self.satellite.active {
            return Ok(TickOutcome::Inactive);
        }

        let sat = &self.satellite;
        let forces = net_force(sat.pos, sat.vel, sat.mass, &self.body, &self.config.drag)?;
        let next = semi_implicit_euler(sat.pos, sat.vel, sat.mass, &forces, dt);

        self.forces = forces;
        self.acceleration = next.acc;
        self.satellite.pos = next.pos;
        self.satellite.vel = next.vel;

        if self.config.detect_crashes {
            let check = self.monitor.check(self.satellite.pos, &self.body);
            if check.low_altitude_warning {
                warn!("Low altitude: {:.1} km", check.altitude / 1000.0);
                self.events.push(SimEvent::LowAltitude {
                    altitude: check.altitude,
                });
            }
            if check.crashed {
                self.crash();
                return Ok(TickOutcome::Crashed);
            }
        }

        self.refresh_orbit_class();

        if self.config.record_trajectory {
            self.history.push(self.satellite.pos);
        }

        match self.planner.check_pending(&mut self.satellite, &self.body) {
            Ok(Some(_)) => {
                let radius = self.satellite.radius();
                info!("Transfer complete at {:.1} km", self.body.altitude_of(self.satellite.pos) / 1000.0);
                self.redefine_orbit();
                self.events.push(SimEvent::TransferCompleted { radius });
                self.refresh_orbit_class();
            }
            Ok(None) => {}
            Err(err) => {
                warn!("Pending transfer abandoned: {}", err);
                self.planner.clear_pending();
                self.events.push(SimEvent::ManeuverRejected(err));
            }
        }

        Ok(TickOutcome::Advanced)
    }

    fn crash(&mut self) {
        let position = self.satellite.pos;
        let impact_speed = self.satellite.speed();
        warn!(
            "Satellite crashed at {:.0} m/s, position ({:.0}, {:.0}, {:.0})",
            impact_speed, position.x, position.y, position.z
        );

        self.satellite.active = false;
        self.satellite.vel = DVec3::ZERO;
        self.forces = ForceBreakdown::default();
        self.acceleration = DVec3::ZERO;
        self.history.reset();
        self.planner.clear_pending();
        self.events.push(SimEvent::Crashed {
            position,
            impact_speed,
        });
    }

    fn refresh_orbit_class(&mut self) {
        let Ok(class) = classify(self.satellite.pos, self.satellite.vel, self.body.mu()) else {
            return;
        };
        if class != self.orbit_class {
            info!("Orbit type: {} -> {}", self.orbit_class, class);
            self.events.push(SimEvent::OrbitClassChanged {
                from: self.orbit_class,
                to: class,
            });
            self.orbit_class = class;
        }
    }

    fn redefine_orbit(&mut self) {
        self.history.reset();
        self.monitor.rearm();
    }

    /// Queue events and bookkeeping for a maneuver result.
    fn record(
        &mut self,
        result: Result<ManeuverOutcome, ManeuverError>,
        effect: OrbitEffect,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        match &result {
            Ok(outcome) => {
                if let Some(ManeuverWarning::EscapeVelocity { speed, escape_speed }) = outcome.warning() {
                    self.events.push(SimEvent::EscapeVelocityExceeded {
                        speed,
                        escape_speed,
                    });
                }
                if effect == OrbitEffect::Redefine {
                    self.redefine_orbit();
                }
                self.refresh_orbit_class();
            }
            Err(err) => {
                warn!("Maneuver rejected: {}", err);
                self.events.push(SimEvent::ManeuverRejected(err.clone()));
            }
        }
        result
    }

    /// Signed prograde burn of `delta_v` m/s.
    pub fn apply_thrust(&mut self, delta_v: f64) -> Result<ManeuverOutcome, ManeuverError> {
        let result = self
            .planner
            .apply_thrust(&mut self.satellite, &self.body, delta_v);
        self.record(result, OrbitEffect::Adjust)
    }

    /// Start a transfer to `target_altitude`; circularizes automatically on arrival.
    pub fn perform_orbital_transfer(
        &mut self,
        target_altitude: f64,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        let result =
            self.planner
                .perform_orbital_transfer(&mut self.satellite, &self.body, target_altitude);
        if result.is_ok()
            && let Some(pending) = self.planner.pending()
        {
            self.events.push(SimEvent::TransferStarted {
                target_radius: pending.target_radius,
            });
        }
        self.record(result, OrbitEffect::Adjust)
    }

    /// Circular speed at the current radius, same direction of motion.
    pub fn circularize(&mut self) -> Result<ManeuverOutcome, ManeuverError> {
        let result = self.planner.circularize(&mut self.satellite, &self.body);
        self.record(result, OrbitEffect::Redefine)
    }

    pub fn create_inclined_orbit(
        &mut self,
        inclination_deg: f64,
        altitude: f64,
        shape: OrbitShape,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        let result = self.planner.create_inclined_orbit(
            &mut self.satellite,
            &self.body,
            inclination_deg,
            altitude,
            shape,
        );
        self.record(result, OrbitEffect::Redefine)
    }

    /// Instant orbit rewrite by kind name: circular, elliptical or escape.
    pub fn change_orbit_type(
        &mut self,
        kind: &str,
        value: f64,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        match OrbitChange::parse(kind, value) {
            Ok(change) => self.apply_orbit_change(change),
            Err(err) => self.record(Err(err), OrbitEffect::Redefine),
        }
    }

    pub fn apply_orbit_change(
        &mut self,
        change: OrbitChange,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        let result = self
            .planner
            .change_orbit_type(&mut self.satellite, &self.body, change);
        self.record(result, OrbitEffect::Redefine)
    }

    /// Dispatch an operator command.
    pub fn apply_command(
        &mut self,
        command: &ManeuverCommand,
    ) -> Result<ManeuverOutcome, ManeuverError> {
        match command {
            ManeuverCommand::Thrust { delta_v } => self.apply_thrust(*delta_v),
            ManeuverCommand::Transfer { target_altitude } => {
                self.perform_orbital_transfer(*target_altitude)
            }
            ManeuverCommand::Circularize => self.circularize(),
            ManeuverCommand::InclinedOrbit {
                inclination_deg,
                altitude,
                shape,
            } => self.create_inclined_orbit(*inclination_deg, *altitude, *shape),
            ManeuverCommand::ChangeOrbitType { kind, value } => self.change_orbit_type(kind, *value),
        }
    }

    /// Swap the central body's parameters as a unit.
    ///
    /// Any pending transfer targeted the old body and is dropped.
    pub fn set_central_body(&mut self, body: CentralBody) {
        info!(
            "Central body changed: M = {:.3e} kg, R = {:.0} km",
            body.mass(),
            body.radius() / 1000.0
        );
        self.body = body;
        self.planner.clear_pending();
        self.monitor.rearm();
        self.refresh_orbit_class();
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queued events not yet drained.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn telemetry(&self) -> Telemetry {
        let sat = &self.satellite;
        let mu = self.body.mu();
        Telemetry {
            position: sat.pos,
            velocity: sat.vel,
            speed: sat.speed(),
            mass: sat.mass,
            active: sat.active,
            acceleration: self.acceleration,
            gravity: self.forces.gravity,
            drag: self.forces.drag,
            altitude: self.body.altitude_of(sat.pos),
            orbit_class: classify(sat.pos, sat.vel, mu).unwrap_or(self.orbit_class),
            energy: specific_energy(sat.pos, sat.vel, mu).ok(),
        }
    }

    pub fn orbital_elements(&self) -> Result<OrbitalElements, PhysicsError> {
        compute_orbital_elements(
            self.satellite.pos,
            self.satellite.vel,
            self.body.mu(),
            self.config.up_axis,
        )
    }

    pub fn satellite(&self) -> &SatelliteState {
        &self.satellite
    }

    pub fn central_body(&self) -> &CentralBody {
        &self.body
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn trajectory(&self) -> &TrajectoryHistory {
        &self.history
    }

    pub fn pending_maneuver(&self) -> Option<PendingManeuver> {
        self.planner.pending()
    }

    pub fn has_pending_maneuver(&self) -> bool {
        self.planner.has_pending()
    }

    pub fn is_active(&self) -> bool {
        self.satellite.active
    }

    pub fn orbit_class(&self) -> OrbitClass {
        self.orbit_class
    }

    pub fn low_altitude_warned(&self) -> bool {
        self.monitor.has_warned()
    }
}
