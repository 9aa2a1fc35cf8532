//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the temperature probe, the heater relay and the status LED,
//! exposing them through [`TemperatureProbe`] and [`HeaterPort`]. The LED
//! mirrors the relay. This is the only module in the system that touches
//! actual hardware.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{HeaterPort, TemperatureProbe};
use crate::drivers::relay::Relay;
use crate::error::ActuatorError;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<T, R, L> {
    probe: T,
    relay: Relay<R>,
    led: Relay<L>,
}

impl<T: TemperatureProbe, R: OutputPin, L: OutputPin> HardwareAdapter<T, R, L> {
    pub fn new(probe: T, relay: Relay<R>, led: Relay<L>) -> Self {
        Self { probe, relay, led }
    }
}

// ── TemperatureProbe implementation ───────────────────────────

impl<T: TemperatureProbe, R: OutputPin, L: OutputPin> TemperatureProbe
    for HardwareAdapter<T, R, L>
{
    fn start_conversion(&mut self) {
        self.probe.start_conversion();
    }

    fn read_last_result(&mut self) -> f32 {
        self.probe.read_last_result()
    }
}

// ── HeaterPort implementation ─────────────────────────────────

impl<T: TemperatureProbe, R: OutputPin, L: OutputPin> HeaterPort for HardwareAdapter<T, R, L> {
    fn set_heater(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.relay.set(on)?;
        // Indicator only; a dead LED must not trip the heater path.
        if let Err(e) = self.led.set(on) {
            warn!("Status LED: {}", e);
        }
        Ok(())
    }

    fn is_heater_on(&self) -> bool {
        self.relay.is_on()
    }
}
