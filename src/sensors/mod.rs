//! Temperature sensing: reading type, the non-blocking acquisition
//! sequencer, and the DS18B20 probe driver.

pub mod acquisition;
pub mod ds18b20;

use crate::safety::is_sensor_fault;

/// One sample produced by [`acquisition::Acquisition`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemperatureReading {
    /// A plausible temperature in °C.
    Celsius(f32),
    /// The probe reported the disconnect sentinel, or produced NaN.
    Disconnected,
}

impl TemperatureReading {
    /// Classify a raw probe value.
    pub fn from_raw(raw_c: f32) -> Self {
        if raw_c.is_nan() || is_sensor_fault(raw_c) {
            Self::Disconnected
        } else {
            Self::Celsius(raw_c)
        }
    }
}
