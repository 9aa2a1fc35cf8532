//! Safety evaluator.
//!
//! Stateless predicates consulted by the thermostat core on every cycle.
//! The limits here are compile-time constants and are deliberately absent
//! from [`SystemConfig`](crate::config::SystemConfig): nothing that arrives
//! over the air can raise the ceiling or extend a session.
//!
//! ## Precedence inside one control cycle
//!
//! 1. Session expiry (checked every cycle, reading or not).
//! 2. Sensor fault (disconnect sentinel).
//! 3. Over-temperature.
//! 4. Hysteresis, only when none of the above fired and the mode is HEAT.

/// Probe value that means "no device answered on the bus" (°C).
pub const DISCONNECT_SENTINEL_C: f32 = -127.0;
/// Absolute ceiling; any reading at or above this forces the heater off (°C).
pub const MAX_SAFE_TEMP_C: f32 = 110.0;
/// Longest continuous heating session.
pub const SESSION_MAX_MINUTES: u32 = 60;
/// [`SESSION_MAX_MINUTES`] in milliseconds.
pub const SESSION_MAX_MS: u32 = SESSION_MAX_MINUTES * 60 * 1000;
/// Width of the deadband below the target (°C).
pub const HYSTERESIS_BAND_C: f32 = 2.0;

/// The probe is disconnected or faulted.
pub fn is_sensor_fault(temp_c: f32) -> bool {
    temp_c <= DISCONNECT_SENTINEL_C
}

/// The reading is at or above the absolute ceiling.
pub fn is_over_temperature(temp_c: f32) -> bool {
    temp_c >= MAX_SAFE_TEMP_C
}

/// `true` once `SESSION_MAX_MS` have passed since `start_ms`.
///
/// Uses wrapping subtraction so a session that straddles the `u32`
/// millisecond rollover is still measured correctly.
pub fn is_session_expired(start_ms: u32, now_ms: u32) -> bool {
    now_ms.wrapping_sub(start_ms) >= SESSION_MAX_MS
}

/// ON/OFF hysteresis decision.
///
/// Engages strictly below `target - band`, releases at or above `target`,
/// and holds the current state inside the deadband.
pub fn should_heater_engage(current_c: f32, target_c: f32, heater_active: bool) -> bool {
    if !heater_active && current_c < target_c - HYSTERESIS_BAND_C {
        return true;
    }
    if heater_active && current_c >= target_c {
        return false;
    }
    heater_active
}

/// A HEAT request is refused outright while the sensor is faulted.
pub fn can_accept_heat_command(sensor_fault: bool) -> bool {
    !sensor_fault
}
