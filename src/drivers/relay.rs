//! On/off output driver for the heater contactor relay and the status LED.
//!
//! Generic over any `embedded-hal` 1.0 [`OutputPin`], so the same driver
//! runs on an ESP-IDF `PinDriver` and on a host mock. Polarity is
//! configurable because common relay modules are active-low.
//!
//! The output is driven to OFF at construction; a heater relay must never
//! come up energised.

use embedded_hal::digital::OutputPin;
use log::info;

use crate::error::ActuatorError;

pub struct Relay<P> {
    pin: P,
    active_low: bool,
    on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Take ownership of `pin` and drive it to the OFF level.
    pub fn new(pin: P, active_low: bool) -> Result<Self, ActuatorError> {
        let mut relay = Self {
            pin,
            active_low,
            on: false,
        };
        relay.write_level(false)?;
        info!(
            "Relay: initialised OFF ({})",
            if active_low { "active-low" } else { "active-high" }
        );
        Ok(relay)
    }

    /// Energise (`true`) or release (`false`). On error the cached state is
    /// left at its previous value.
    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.write_level(on)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    #[cfg(test)]
    pub(crate) fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    fn write_level(&mut self, on: bool) -> Result<(), ActuatorError> {
        let high = on != self.active_low;
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ActuatorError::GpioWriteFailed)
    }
}
