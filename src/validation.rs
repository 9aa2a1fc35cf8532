//! Input validation for values arriving from the accessory protocol.
//!
//! Pure predicates. A `false` return is the whole answer: the caller drops
//! the command and leaves controller state untouched.

/// Lowest target temperature a client may request (°C).
pub const TARGET_TEMP_MIN_C: f32 = 40.0;
/// Highest target temperature a client may request (°C).
pub const TARGET_TEMP_MAX_C: f32 = 100.0;

/// Raw wire value for OFF.
pub const MODE_OFF: i32 = 0;
/// Raw wire value for HEAT.
pub const MODE_HEAT: i32 = 1;

/// Only OFF (0) and HEAT (1) are valid target heating modes.
pub fn is_valid_mode(value: i32) -> bool {
    value == MODE_OFF || value == MODE_HEAT
}

/// `true` iff `TARGET_TEMP_MIN_C <= temp <= TARGET_TEMP_MAX_C`. NaN fails.
pub fn is_valid_target(temp: f32) -> bool {
    (TARGET_TEMP_MIN_C..=TARGET_TEMP_MAX_C).contains(&temp)
}

/// Returns `true` if every byte of `s` is in the printable ASCII range
/// `0x20..=0x7E`.
///
/// Used for the accessory name, which is advertised to pairing clients.
pub fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}
