//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the acquisition sequencer and the thermostat state.
//! It exposes a hardware-agnostic API. All I/O flows through port traits
//! injected at call sites, making the whole service testable with mock
//! adapters.
//!
//! ```text
//!  TemperatureProbe ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                       │        AppService         │
//!       HeaterPort ◀──  │ Acquisition · Thermostat  │ ──▶ StatusPort
//!                       └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::Mode;
use crate::control::thermostat::{self, ControlState, ThermostatStatus};
use crate::error::ActuatorError;
use crate::sensors::acquisition::{Acquisition, AcquisitionPhase};

use super::commands::{AppCommand, CommandOutcome, CommandQueue};
use super::events::AppEvent;
use super::ports::{EventSink, HeaterPort, StatusPort, TemperatureProbe};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    acquisition: Acquisition,
    state: ControlState,
    last_now_ms: u32,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration. Heater off, mode OFF,
    /// target = `config.default_target_c`.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            acquisition: Acquisition::from_config(config),
            state: ControlState::new(config.default_target_c),
            last_now_ms: 0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the relay off, publish the initial status and announce start.
    pub fn start(
        &mut self,
        now_ms: u32,
        hw: &mut impl HeaterPort,
        status: &mut impl StatusPort,
        sink: &mut impl EventSink,
    ) {
        self.last_now_ms = now_ms;
        if let Err(e) = hw.set_heater(false) {
            warn!("AppService: initial relay release failed: {}", e);
            sink.emit(&AppEvent::ActuatorFault(e));
        }
        let initial = self.state.status(now_ms);
        status.publish(&initial);
        sink.emit(&AppEvent::Started(initial));
        info!(
            "AppService started (target={:.1}\u{00b0}C)",
            self.state.target.target_c
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: acquisition → thermostat step → relay → status.
    ///
    /// The `hw` parameter satisfies **both** [`TemperatureProbe`] and
    /// [`HeaterPort`], which avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl TemperatureProbe + HeaterPort),
        status: &mut impl StatusPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.last_now_ms = now_ms;

        // Acquisition has no dependency on controller state, so sampling
        // first and passing the reading in is equivalent to the in-step order.
        let reading = self.acquisition.tick(now_ms, hw);
        let was_on = self.state.session.heater_active;
        let out = thermostat::step(self.state, reading, now_ms);
        self.state = out.state;

        for trip in &out.trips {
            warn!("SAFETY | {} -> heater off, mode reset to OFF", trip);
            sink.emit(&AppEvent::SafetyTrip(*trip));
        }
        if out.fault_cleared {
            info!("Sensor fault cleared");
            sink.emit(&AppEvent::FaultCleared);
        }

        let mut write_failed = false;
        if out.write_actuator {
            if let Err(e) = hw.set_heater(out.heater_on) {
                self.fail_safe(hw, sink, e, was_on);
                write_failed = true;
            } else if out.heater_changed {
                sink.emit(&AppEvent::HeaterChanged {
                    on: out.heater_on,
                    temperature_c: self.state.last_good_c,
                });
            }
        }

        // The relay must agree with the controller after every tick.
        let relay_on = hw.is_heater_on();
        if !write_failed && relay_on != self.state.session.heater_active {
            self.fail_safe(hw, sink, ActuatorError::StateMismatch, relay_on);
        }

        status.publish(&self.state.status(now_ms));
    }

    // ── Command handling ──────────────────────────────────────

    /// Validate and apply a raw mode value. Returns whether it was accepted.
    pub fn apply_mode_command(&mut self, raw: i32) -> bool {
        self.state.apply_mode(raw).is_ok()
    }

    /// Validate and apply a target temperature. Returns whether it was accepted.
    pub fn apply_target_command(&mut self, target_c: f32) -> bool {
        self.state.apply_target(target_c).is_ok()
    }

    /// Process an external command, reporting rejections through `sink`.
    ///
    /// Every field present in the command is validated before any is
    /// applied, so an [`AppCommand::Update`] with one bad field changes
    /// nothing.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) -> CommandOutcome {
        let (mode, target_c) = match cmd {
            AppCommand::SetMode(m) => (Some(m), None),
            AppCommand::SetTarget(t) => (None, Some(t)),
            AppCommand::Update { mode, target_c } => (mode, target_c),
        };

        let accepted = match self.state.apply_update(mode, target_c) {
            Ok(()) => {
                info!(
                    "Command applied: mode={:?} target={:.1}\u{00b0}C",
                    self.state.target.mode, self.state.target.target_c
                );
                true
            }
            Err(rejected) => {
                for rejection in &rejected {
                    warn!("Command rejected: {}", rejection);
                    sink.emit(&AppEvent::CommandRejected(*rejection));
                }
                false
            }
        };

        CommandOutcome {
            mode: mode.map(|_| accepted),
            target: target_c.map(|_| accepted),
        }
    }

    /// Apply every queued command. Returns how many were processed.
    pub fn drain_commands(&mut self, queue: &CommandQueue, sink: &mut impl EventSink) -> usize {
        let mut n = 0;
        while let Some(cmd) = queue.try_next() {
            self.handle_command(cmd, sink);
            n += 1;
        }
        n
    }

    // ── Queries ───────────────────────────────────────────────

    /// Observable status as of the last tick.
    pub fn status(&self) -> ThermostatStatus {
        self.state.status(self.last_now_ms)
    }

    /// Build a telemetry event from the current state.
    pub fn build_telemetry(&self) -> AppEvent {
        AppEvent::Telemetry(self.status())
    }

    pub fn control_state(&self) -> ControlState {
        self.state
    }

    pub fn acquisition_phase(&self) -> AcquisitionPhase {
        self.acquisition.phase()
    }

    pub fn heater_active(&self) -> bool {
        self.state.session.heater_active
    }

    pub fn sensor_fault(&self) -> bool {
        self.state.session.sensor_fault
    }

    pub fn requested_mode(&self) -> Mode {
        self.state.target.mode
    }

    pub fn target_c(&self) -> f32 {
        self.state.target.target_c
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Relay write failed or drifted: treat the heater as off and retry OFF
    /// once. `was_on` is the relay state before the failed tick.
    fn fail_safe(
        &mut self,
        hw: &mut impl HeaterPort,
        sink: &mut impl EventSink,
        e: ActuatorError,
        was_on: bool,
    ) {
        log::error!("ACTUATOR | {} -> forcing OFF", e);
        self.state.session.heater_active = false;
        self.state.target.mode = Mode::Off;
        if let Err(e2) = hw.set_heater(false) {
            log::error!("ACTUATOR | release retry failed: {}", e2);
        }
        sink.emit(&AppEvent::ActuatorFault(e));
        if was_on {
            sink.emit(&AppEvent::HeaterChanged {
                on: false,
                temperature_c: self.state.last_good_c,
            });
        }
    }
}
