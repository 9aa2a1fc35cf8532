//! System configuration parameters
//!
//! Tunable parameters for the sauna controller. Values can be overridden
//! via NVS. Safety limits (ceiling, session length, hysteresis band) are
//! constants in [`crate::safety`] and are not part of this struct.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::validation::{is_printable_ascii, is_valid_target};

/// Maximum accessory name length advertised to pairing clients.
pub const ACCESSORY_NAME_LEN: usize = 32;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Identity ---
    /// Name the accessory advertises to remote clients
    pub accessory_name: String<ACCESSORY_NAME_LEN>,

    // --- Thermostat ---
    /// Target temperature applied at boot (°C)
    pub default_target_c: f32,

    // --- Acquisition ---
    /// Interval between conversion requests (milliseconds)
    pub sample_interval_ms: u32,
    /// Time the probe needs to finish a conversion (milliseconds)
    pub conversion_latency_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut accessory_name = String::new();
        // "Sauna" always fits in ACCESSORY_NAME_LEN.
        let _ = accessory_name.push_str("Sauna");

        Self {
            accessory_name,
            default_target_c: 70.0,
            sample_interval_ms: 2000,
            conversion_latency_ms: 750,
            control_loop_interval_ms: 100, // 10 Hz
            telemetry_interval_secs: 30,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.
    ///
    /// Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.accessory_name.is_empty() || !is_printable_ascii(&self.accessory_name) {
            return Err(ConfigError::ValidationFailed(
                "accessory_name must be non-empty printable ASCII",
            ));
        }
        if !is_valid_target(self.default_target_c) {
            return Err(ConfigError::ValidationFailed(
                "default_target_c must be 40.0–100.0",
            ));
        }
        if !(250..=60_000).contains(&self.sample_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "sample_interval_ms must be 250–60000",
            ));
        }
        if !(1..=2000).contains(&self.conversion_latency_ms) {
            return Err(ConfigError::ValidationFailed(
                "conversion_latency_ms must be 1–2000",
            ));
        }
        if self.conversion_latency_ms >= self.sample_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "conversion_latency_ms must be < sample_interval_ms",
            ));
        }
        if !(10..=1000).contains(&self.control_loop_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be 10–1000",
            ));
        }
        if !(5..=3600).contains(&self.telemetry_interval_secs) {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_secs must be 5–3600",
            ));
        }
        Ok(())
    }
}
