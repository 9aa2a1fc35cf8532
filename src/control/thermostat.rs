//! Thermostat decision core.
//!
//! [`step`] is a pure transition function over [`ControlState`]. The
//! application service owns one `ControlState`, feeds it the reading
//! produced by acquisition on each tick, and applies the returned
//! [`Step`] to the relay and status outputs.
//!
//! Order inside one step:
//!
//! 1. Session expiry, whenever the heater is on.
//! 2. A requested OFF releases an active heater.
//! 3. No reading: stop here, outputs keep their prior state.
//! 4. Disconnected: latch the fault, heater off, mode back to OFF.
//! 5. Valid reading: clear the fault, then over-temperature, then
//!    hysteresis when the requested mode is HEAT.
//! 6. Build the observable status from the actual heater state.

use heapless::Vec;
use serde::Serialize;

use crate::error::{CommandRejection, SafetyTrip};
use crate::safety::{
    can_accept_heat_command, is_over_temperature, is_session_expired, should_heater_engage,
};
use crate::sensors::TemperatureReading;
use crate::validation::is_valid_target;

use super::Mode;

// ───────────────────────────────────────────────────────────────
// State
// ───────────────────────────────────────────────────────────────

/// Heater and fault flags owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub heater_active: bool,
    /// Stamped on every off→on transition. Meaningless while the heater is off.
    pub session_start_ms: u32,
    pub sensor_fault: bool,
}

/// What the client asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandedTarget {
    pub mode: Mode,
    pub target_c: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub session: SessionState,
    pub target: CommandedTarget,
    /// Last valid reading, `None` before the first sample.
    pub last_good_c: Option<f32>,
}

impl ControlState {
    /// Heater off, mode OFF, no reading yet.
    pub fn new(target_c: f32) -> Self {
        Self {
            session: SessionState::default(),
            target: CommandedTarget {
                mode: Mode::Off,
                target_c,
            },
            last_good_c: None,
        }
    }

    /// Check a raw mode value against the fault latch without applying it.
    /// HEAT is refused while the sensor is faulted; OFF is always accepted.
    fn check_mode(&self, raw: i32) -> Result<Mode, CommandRejection> {
        let mode = Mode::from_raw(raw).ok_or(CommandRejection::InvalidMode(raw))?;
        if mode == Mode::Heat && !can_accept_heat_command(self.session.sensor_fault) {
            return Err(CommandRejection::HeatRefusedSensorFault);
        }
        Ok(mode)
    }

    fn check_target(target_c: f32) -> Result<f32, CommandRejection> {
        if is_valid_target(target_c) {
            Ok(target_c)
        } else {
            Err(CommandRejection::InvalidTarget(target_c))
        }
    }

    /// Validate and apply a mode command.
    pub fn apply_mode(&mut self, raw: i32) -> Result<Mode, CommandRejection> {
        let mode = self.check_mode(raw)?;
        self.target.mode = mode;
        Ok(mode)
    }

    /// Validate and apply a target temperature command.
    pub fn apply_target(&mut self, target_c: f32) -> Result<f32, CommandRejection> {
        let target_c = Self::check_target(target_c)?;
        self.target.target_c = target_c;
        Ok(target_c)
    }

    /// Apply a mode and/or target written together. Every present field is
    /// checked first; either all of them land or none do.
    pub fn apply_update(
        &mut self,
        mode: Option<i32>,
        target_c: Option<f32>,
    ) -> Result<(), Vec<CommandRejection, 2>> {
        let mut rejected = Vec::new();
        let mode = match mode.map(|m| self.check_mode(m)).transpose() {
            Ok(m) => m,
            Err(r) => {
                let _ = rejected.push(r);
                None
            }
        };
        let target_c = match target_c.map(Self::check_target).transpose() {
            Ok(t) => t,
            Err(r) => {
                let _ = rejected.push(r);
                None
            }
        };
        if !rejected.is_empty() {
            return Err(rejected);
        }

        if let Some(t) = target_c {
            self.target.target_c = t;
        }
        if let Some(m) = mode {
            self.target.mode = m;
        }
        Ok(())
    }

    /// Observable status at `now_ms`.
    pub fn status(&self, now_ms: u32) -> ThermostatStatus {
        let heater_on = self.session.heater_active;
        ThermostatStatus {
            current_temp_c: self.last_good_c,
            current_mode: if heater_on { Mode::Heat } else { Mode::Off },
            requested_mode: self.target.mode,
            target_c: self.target.target_c,
            sensor_fault: self.session.sensor_fault,
            session_elapsed_ms: heater_on
                .then(|| now_ms.wrapping_sub(self.session.session_start_ms)),
        }
    }

    fn force_off(&mut self) {
        self.session.heater_active = false;
        self.target.mode = Mode::Off;
    }
}

/// Everything an external observer may see. Published once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermostatStatus {
    pub current_temp_c: Option<f32>,
    /// Reflects the relay, not the request.
    pub current_mode: Mode,
    pub requested_mode: Mode,
    pub target_c: f32,
    pub sensor_fault: bool,
    pub session_elapsed_ms: Option<u32>,
}

// ───────────────────────────────────────────────────────────────
// Transition
// ───────────────────────────────────────────────────────────────

/// Result of one [`step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: ControlState,
    /// Desired relay state.
    pub heater_on: bool,
    /// The relay must be (re)written this tick.
    pub write_actuator: bool,
    pub heater_changed: bool,
    pub trips: Vec<SafetyTrip, 3>,
    /// The fault latch fell on this tick.
    pub fault_cleared: bool,
    pub status: ThermostatStatus,
}

pub fn step(prev: ControlState, reading: Option<TemperatureReading>, now_ms: u32) -> Step {
    let mut state = prev;
    let mut trips: Vec<SafetyTrip, 3> = Vec::new();
    let mut write_actuator = false;
    let mut fault_cleared = false;

    // ── 1. Session expiry ─────────────────────────────────────
    if state.session.heater_active && is_session_expired(state.session.session_start_ms, now_ms) {
        state.force_off();
        let _ = trips.push(SafetyTrip::SessionExpired);
        write_actuator = true;
    }

    // ── 2. Requested OFF ──────────────────────────────────────
    if state.session.heater_active && state.target.mode == Mode::Off {
        state.session.heater_active = false;
        write_actuator = true;
    }

    // ── 3–5. Fresh reading ────────────────────────────────────
    match reading {
        None => {}
        Some(TemperatureReading::Disconnected) => {
            if !state.session.sensor_fault {
                let _ = trips.push(SafetyTrip::SensorFault);
            }
            state.session.sensor_fault = true;
            state.force_off();
            write_actuator = true;
        }
        Some(TemperatureReading::Celsius(temp_c)) => {
            fault_cleared = state.session.sensor_fault;
            state.session.sensor_fault = false;
            state.last_good_c = Some(temp_c);

            if is_over_temperature(temp_c) {
                if state.session.heater_active || state.target.mode == Mode::Heat {
                    let _ = trips.push(SafetyTrip::OverTemperature);
                }
                state.force_off();
            } else if state.target.mode == Mode::Heat {
                let was_on = state.session.heater_active;
                let engage = should_heater_engage(temp_c, state.target.target_c, was_on);
                if engage && !was_on {
                    state.session.session_start_ms = now_ms;
                }
                state.session.heater_active = engage;
            }
            write_actuator = true;
        }
    }

    let heater_on = state.session.heater_active;
    Step {
        state,
        heater_on,
        write_actuator,
        heater_changed: heater_on != prev.session.heater_active,
        trips,
        fault_cleared,
        status: state.status(now_ms),
    }
}
