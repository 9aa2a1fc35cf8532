//! Error and trip types for the sauna controller.
//!
//! All variants are `Copy` so they can travel through the decision core and
//! out through [`AppEvent`](crate::app::events::AppEvent) without allocation.
//! None of these are fatal: every one maps to a safe heater-off state or a
//! refused command.

use core::fmt;

// ---------------------------------------------------------------------------
// Safety trips
// ---------------------------------------------------------------------------

/// A safety limit forced the heater off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyTrip {
    /// The probe reported the disconnect sentinel.
    SensorFault,
    /// The reading reached the absolute temperature ceiling.
    OverTemperature,
    /// The heater has been on for the maximum session length.
    SessionExpired,
}

impl fmt::Display for SafetyTrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorFault => write!(f, "sensor disconnected"),
            Self::OverTemperature => write!(f, "over temperature"),
            Self::SessionExpired => write!(f, "session time limit reached"),
        }
    }
}

impl core::error::Error for SafetyTrip {}

// ---------------------------------------------------------------------------
// Command rejections
// ---------------------------------------------------------------------------

/// Why an inbound mode or target command was dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandRejection {
    /// Mode value outside {0, 1}.
    InvalidMode(i32),
    /// Target outside the accepted range, or NaN.
    InvalidTarget(f32),
    /// HEAT requested while the sensor fault latch is set.
    HeatRefusedSensorFault,
}

impl fmt::Display for CommandRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode(v) => write!(f, "invalid mode {v}"),
            Self::InvalidTarget(t) => write!(f, "invalid target {t:.1}\u{00b0}C"),
            Self::HeatRefusedSensorFault => write!(f, "heat refused: sensor fault active"),
        }
    }
}

impl core::error::Error for CommandRejection {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The relay GPIO write failed.
    GpioWriteFailed,
    /// The relay reports a state the controller did not command.
    StateMismatch,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::StateMismatch => write!(f, "relay state does not match controller"),
        }
    }
}

impl core::error::Error for ActuatorError {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No device answered the 1-Wire reset pulse.
    NoPresence,
    /// The bus line is held low.
    BusShorted,
    /// Scratchpad CRC did not match.
    CrcMismatch,
    /// The bus GPIO could not be driven or sampled.
    PinFault,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPresence => write!(f, "no device on 1-Wire bus"),
            Self::BusShorted => write!(f, "1-Wire bus held low"),
            Self::CrcMismatch => write!(f, "scratchpad CRC mismatch"),
            Self::PinFault => write!(f, "1-Wire GPIO fault"),
        }
    }
}

impl core::error::Error for SensorError {}
