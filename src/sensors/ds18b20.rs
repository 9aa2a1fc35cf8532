//! DS18B20 digital temperature probe on a dedicated 1-Wire bus.
//!
//! The probe is the only device on the bus, so every transaction addresses
//! it with SKIP ROM. [`start_conversion`] issues CONVERT T and returns at
//! once; the acquisition sequencer waits out the 750 ms worst-case 12-bit
//! conversion before [`read_last_result`] fetches the scratchpad.
//!
//! Any bus failure (no presence pulse, shorted line, CRC mismatch, an
//! all-zero scratchpad) reads as the disconnect sentinel so the controller's
//! fault path handles it.
//!
//! [`start_conversion`]: TemperatureProbe::start_conversion
//! [`read_last_result`]: TemperatureProbe::read_last_result

use log::warn;

use crate::app::ports::TemperatureProbe;
use crate::drivers::onewire::{OneWireBus, crc8};
use crate::error::SensorError;
use crate::safety::DISCONNECT_SENTINEL_C;

const CMD_SKIP_ROM: u8 = 0xCC;
const CMD_CONVERT_T: u8 = 0x44;
const CMD_READ_SCRATCHPAD: u8 = 0xBE;

pub const SCRATCHPAD_LEN: usize = 9;

pub struct Ds18b20<B> {
    bus: B,
    /// A conversion was started and not yet collected.
    pending: bool,
}

impl<B: OneWireBus> Ds18b20<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            pending: false,
        }
    }

    fn select(&mut self) -> Result<(), SensorError> {
        if !self.bus.reset()? {
            return Err(SensorError::NoPresence);
        }
        self.bus.write_byte(CMD_SKIP_ROM)
    }

    fn convert(&mut self) -> Result<(), SensorError> {
        self.select()?;
        self.bus.write_byte(CMD_CONVERT_T)
    }

    fn read_scratchpad(&mut self) -> Result<[u8; SCRATCHPAD_LEN], SensorError> {
        self.select()?;
        self.bus.write_byte(CMD_READ_SCRATCHPAD)?;
        let mut sp = [0u8; SCRATCHPAD_LEN];
        for byte in &mut sp {
            *byte = self.bus.read_byte()?;
        }
        Ok(sp)
    }

    #[cfg(test)]
    pub(crate) fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

/// Check the CRC and convert the temperature register to °C.
///
/// Bits below the configured resolution are undefined and masked off.
pub fn decode_scratchpad(sp: &[u8; SCRATCHPAD_LEN]) -> Result<f32, SensorError> {
    // A line held low reads as zeros, which the CRC alone accepts.
    if sp.iter().all(|&b| b == 0) {
        return Err(SensorError::BusShorted);
    }
    if crc8(&sp[..8]) != sp[8] {
        return Err(SensorError::CrcMismatch);
    }
    let resolution_bits = 9 + ((sp[4] >> 5) & 0x03);
    let undefined = 12 - resolution_bits;
    let raw = i16::from_le_bytes([sp[0], sp[1]]) & !((1i16 << undefined) - 1);
    Ok(f32::from(raw) / 16.0)
}

impl<B: OneWireBus> TemperatureProbe for Ds18b20<B> {
    fn start_conversion(&mut self) {
        self.pending = match self.convert() {
            Ok(()) => true,
            Err(e) => {
                warn!("DS18B20: conversion not started: {}", e);
                false
            }
        };
    }

    fn read_last_result(&mut self) -> f32 {
        if !core::mem::take(&mut self.pending) {
            return DISCONNECT_SENTINEL_C;
        }
        match self.read_scratchpad().and_then(|sp| decode_scratchpad(&sp)) {
            Ok(c) => c,
            Err(e) => {
                warn!("DS18B20: read failed: {}", e);
                DISCONNECT_SENTINEL_C
            }
        }
    }
}
