//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them.

use crate::control::thermostat::ThermostatStatus;
use crate::error::{ActuatorError, CommandRejection, SafetyTrip};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial status).
    Started(ThermostatStatus),

    /// The heater relay changed state.
    HeaterChanged {
        on: bool,
        /// Last good reading at the time of the change.
        temperature_c: Option<f32>,
    },

    /// A safety limit forced the heater off.
    SafetyTrip(SafetyTrip),

    /// A valid reading cleared a latched sensor fault.
    FaultCleared,

    /// An inbound command was dropped.
    CommandRejected(CommandRejection),

    /// The relay write failed; the controller has failed safe.
    ActuatorFault(ActuatorError),

    /// Periodic telemetry snapshot.
    Telemetry(ThermostatStatus),
}
