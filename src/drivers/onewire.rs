//! Bit-banged 1-Wire bus master (standard speed).
//!
//! Drives a single open-drain GPIO with an external 4.7 kOhm pull-up.
//! `set_low` pulls the line down, `set_high` releases it. Slot timings follow
//! Maxim application note 126. Each time slot runs inside a critical section
//! so an interrupt cannot stretch it past the device's sampling window.
//!
//! Generic over `embedded-hal` 1.0 pins and delays, so the same code runs on
//! an ESP-IDF `PinDriver` and against a host mock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::SensorError;

/// Byte-level access to a 1-Wire bus.
pub trait OneWireBus {
    /// Issue a reset pulse. Returns whether any device answered with a
    /// presence pulse.
    fn reset(&mut self) -> Result<bool, SensorError>;
    fn write_byte(&mut self, byte: u8) -> Result<(), SensorError>;
    fn read_byte(&mut self) -> Result<u8, SensorError>;
}

// Slot timings in microseconds (standard speed).
const T_WRITE1_LOW: u32 = 6;
const T_WRITE1_REST: u32 = 64;
const T_WRITE0_LOW: u32 = 60;
const T_WRITE0_REST: u32 = 10;
const T_READ_LOW: u32 = 6;
const T_READ_SAMPLE: u32 = 9;
const T_READ_REST: u32 = 55;
const T_RESET_LOW: u32 = 480;
const T_PRESENCE_SAMPLE: u32 = 70;
const T_RESET_REST: u32 = 410;

pub struct BitBangBus<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> BitBangBus<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// `pin` must be configured open-drain with the line released.
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    fn release(&mut self) -> Result<(), SensorError> {
        self.pin.set_high().map_err(|_| SensorError::PinFault)
    }

    fn pull_low(&mut self) -> Result<(), SensorError> {
        self.pin.set_low().map_err(|_| SensorError::PinFault)
    }

    fn line_high(&mut self) -> Result<bool, SensorError> {
        self.pin.is_high().map_err(|_| SensorError::PinFault)
    }

    fn write_bit(&mut self, bit: bool) -> Result<(), SensorError> {
        let (low, rest) = if bit {
            (T_WRITE1_LOW, T_WRITE1_REST)
        } else {
            (T_WRITE0_LOW, T_WRITE0_REST)
        };
        critical_section::with(|_| {
            self.pull_low()?;
            self.delay.delay_us(low);
            self.release()
        })?;
        self.delay.delay_us(rest);
        Ok(())
    }

    fn read_bit(&mut self) -> Result<bool, SensorError> {
        let bit = critical_section::with(|_| {
            self.pull_low()?;
            self.delay.delay_us(T_READ_LOW);
            self.release()?;
            self.delay.delay_us(T_READ_SAMPLE);
            self.line_high()
        })?;
        self.delay.delay_us(T_READ_REST);
        Ok(bit)
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut P, &mut D) {
        (&mut self.pin, &mut self.delay)
    }
}

impl<P, D> OneWireBus for BitBangBus<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn reset(&mut self) -> Result<bool, SensorError> {
        // The pull-up must hold an idle line high.
        if !self.line_high()? {
            return Err(SensorError::BusShorted);
        }
        self.pull_low()?;
        self.delay.delay_us(T_RESET_LOW);
        let present = critical_section::with(|_| {
            self.release()?;
            self.delay.delay_us(T_PRESENCE_SAMPLE);
            self.line_high().map(|high| !high)
        })?;
        self.delay.delay_us(T_RESET_REST);
        Ok(present)
    }

    /// LSB first.
    fn write_byte(&mut self, byte: u8) -> Result<(), SensorError> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0)?;
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, SensorError> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }
}

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1, reflected).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}
