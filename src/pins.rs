//! GPIO / peripheral pin assignments for the sauna controller board (ESP32).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Heater contactor relay
// ---------------------------------------------------------------------------

/// Digital output driving the heater contactor relay module.
pub const RELAY_GPIO: i32 = 26;
/// The fitted relay module energises on HIGH.
pub const RELAY_ACTIVE_LOW: bool = false;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// On-board LED, mirrors the relay.
pub const STATUS_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Temperature probe: DS18B20 (1-Wire)
// ---------------------------------------------------------------------------

/// 1-Wire data line, open-drain with an external 4.7 kΩ pull-up to 3.3 V.
pub const TEMP_SENSOR_GPIO: i32 = 27;
