//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production, stderr on the host).

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::thermostat::ThermostatStatus;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

fn log_status(tag: &str, s: &ThermostatStatus) {
    match s.current_temp_c {
        Some(t) => info!(
            "{} | T={:.1}\u{00b0}C target={:.1}\u{00b0}C | mode={:?} req={:?} | fault={} | session={}s",
            tag,
            t,
            s.target_c,
            s.current_mode,
            s.requested_mode,
            s.sensor_fault,
            s.session_elapsed_ms.unwrap_or(0) / 1000,
        ),
        None => info!(
            "{} | T=? target={:.1}\u{00b0}C | mode={:?} req={:?} | fault={}",
            tag, s.target_c, s.current_mode, s.requested_mode, s.sensor_fault,
        ),
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(s) => log_status("START", s),
            AppEvent::Telemetry(s) => log_status("TELEM", s),
            AppEvent::HeaterChanged { on, temperature_c } => match temperature_c {
                Some(t) => info!("HEATER | {} at {:.1}\u{00b0}C", if *on { "ON" } else { "OFF" }, t),
                None => info!("HEATER | {}", if *on { "ON" } else { "OFF" }),
            },
            AppEvent::SafetyTrip(trip) => warn!("SAFETY | {}", trip),
            AppEvent::FaultCleared => info!("SAFETY | sensor fault cleared"),
            AppEvent::CommandRejected(r) => warn!("CMD | rejected: {}", r),
            AppEvent::ActuatorFault(e) => error!("ACTUATOR | {}", e),
        }
    }
}
