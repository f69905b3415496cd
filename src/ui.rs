//! egui telemetry panel and maneuver buttons.
//!
//! Reads the engine's telemetry and published events; everything it changes
//! goes back through `ManeuverCommand` and `LoadScenarioEvent` messages.

use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::input::{THRUST_STEP, TRANSFER_ALTITUDE};
use crate::maneuver::ManeuverCommand;
use crate::orbit::OrbitalElements;
use crate::scenarios::{CurrentScenario, LoadScenarioEvent, SCENARIOS};
use crate::simulation::{SimEvent, Simulation, Telemetry};
use crate::types::{SimulationSet, SimulationTime, RAD_TO_DEG};

/// Number of recent events shown in the panel.
pub const EVENT_LOG_CAPACITY: usize = 8;

/// Recent engine events, newest last.
#[derive(Resource, Default)]
pub struct EventLog {
    entries: VecDeque<String>,
}

impl EventLog {
    pub fn push(&mut self, entry: String) {
        if self.entries.len() == EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Plugin that adds the telemetry panel.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EventLog>()
            .add_systems(Update, record_events.after(SimulationSet::Publish))
            .add_systems(EguiPrimaryContextPass, telemetry_panel);
    }
}

/// One-line description of an engine event.
pub fn describe_event(event: &SimEvent) -> String {
    match event {
        SimEvent::LowAltitude { altitude } => {
            format!("Low altitude: {:.0} km", altitude / 1000.0)
        }
        SimEvent::Crashed { impact_speed, .. } => {
            format!("Crashed at {:.0} m/s", impact_speed)
        }
        SimEvent::EscapeVelocityExceeded { speed, escape_speed } => {
            format!("Escape velocity: {:.0} ≥ {:.0} m/s", speed, escape_speed)
        }
        SimEvent::ManeuverRejected(err) => format!("Rejected: {}", err),
        SimEvent::TransferStarted { target_radius } => {
            format!("Transfer to r = {:.0} km", target_radius / 1000.0)
        }
        SimEvent::TransferCompleted { radius } => {
            format!("Circularized at r = {:.0} km", radius / 1000.0)
        }
        SimEvent::OrbitClassChanged { from, to } => format!("Orbit: {} → {}", from, to),
    }
}

/// Label/value rows for the telemetry grid.
pub fn telemetry_rows(
    telemetry: &Telemetry,
    elements: Option<&OrbitalElements>,
    body_radius: f64,
) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Altitude", format!("{:.1} km", telemetry.altitude / 1000.0)),
        ("Speed", format!("{:.3} km/s", telemetry.speed / 1000.0)),
        ("Orbit", telemetry.orbit_class.to_string()),
        (
            "Acceleration",
            format!("{:.3} m/s²", telemetry.acceleration.length()),
        ),
        ("Drag", format!("{:.2e} N", telemetry.drag.length())),
    ];
    if let Some(energy) = telemetry.energy {
        rows.push(("Energy", format!("{:.3e} J/kg", energy)));
    }
    if let Some(elements) = elements {
        rows.push(("Eccentricity", format!("{:.4}", elements.eccentricity)));
        rows.push((
            "Inclination",
            format!("{:.1}°", elements.inclination * RAD_TO_DEG),
        ));
        rows.push((
            "Periapsis",
            format!("{:.0} km", (elements.periapsis() - body_radius) / 1000.0),
        ));
        if let Some(apoapsis) = elements.apoapsis() {
            rows.push(("Apoapsis", format!("{:.0} km", (apoapsis - body_radius) / 1000.0)));
        }
        if let Some(period) = elements.period {
            rows.push(("Period", format!("{:.1} min", period / 60.0)));
        }
    }
    if !telemetry.active {
        rows.push(("Status", "CRASHED".to_string()));
    }
    rows
}

fn record_events(mut events: MessageReader<SimEvent>, mut log: ResMut<EventLog>) {
    for event in events.read() {
        log.push(describe_event(event));
    }
}

fn telemetry_panel(
    mut contexts: EguiContexts,
    sim: Res<Simulation>,
    sim_time: Res<SimulationTime>,
    current: Res<CurrentScenario>,
    mut log: ResMut<EventLog>,
    mut commands: MessageWriter<ManeuverCommand>,
    mut load: MessageWriter<LoadScenarioEvent>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let telemetry = sim.telemetry();
    let elements = sim.orbital_elements().ok();
    let rows = telemetry_rows(&telemetry, elements.as_ref(), sim.central_body().radius());

    egui::Window::new("Telemetry")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!(
                "T+{:.1} min  ×{}{}",
                sim_time.minutes(),
                sim_time.scale,
                if sim_time.paused { "  (paused)" } else { "" }
            ));
            ui.separator();

            egui::Grid::new("telemetry_grid")
                .num_columns(2)
                .show(ui, |ui| {
                    for (label, value) in &rows {
                        ui.label(*label);
                        ui.label(value);
                        ui.end_row();
                    }
                });

            if let Some(pending) = sim.pending_maneuver() {
                ui.label(format!(
                    "Circularization pending at {:.0} km",
                    (pending.target_radius - sim.central_body().radius()) / 1000.0
                ));
            }

            ui.separator();
            ui.horizontal_wrapped(|ui| {
                if ui.button(format!("+{THRUST_STEP} m/s")).clicked() {
                    commands.write(ManeuverCommand::Thrust {
                        delta_v: THRUST_STEP,
                    });
                }
                if ui.button(format!("−{THRUST_STEP} m/s")).clicked() {
                    commands.write(ManeuverCommand::Thrust {
                        delta_v: -THRUST_STEP,
                    });
                }
                if ui.button("Transfer").clicked() {
                    commands.write(ManeuverCommand::Transfer {
                        target_altitude: TRANSFER_ALTITUDE,
                    });
                }
                if ui.button("Circularize").clicked() {
                    commands.write(ManeuverCommand::Circularize);
                }
                if ui.button("Escape").clicked() {
                    commands.write(ManeuverCommand::ChangeOrbitType {
                        kind: "escape".to_string(),
                        value: 0.0,
                    });
                }
            });

            ui.separator();
            ui.horizontal_wrapped(|ui| {
                for scenario in SCENARIOS {
                    let selected = scenario.id == current.id;
                    if ui
                        .selectable_label(selected, scenario.name)
                        .on_hover_text(scenario.description)
                        .clicked()
                    {
                        log.clear();
                        load.write(LoadScenarioEvent {
                            scenario_id: scenario.id,
                        });
                    }
                }
            });

            ui.collapsing("Events", |ui| {
                for entry in log.entries() {
                    ui.label(entry);
                }
            });
        });
}
