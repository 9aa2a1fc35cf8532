//! Control algorithms.
//!
//! [`thermostat`] holds the pure decision core: given the previous state,
//! an optional fresh reading and the current time, it returns the next
//! state plus the actuator command. No I/O happens here.

pub mod thermostat;

use serde::{Deserialize, Serialize};

use crate::validation::{MODE_HEAT, MODE_OFF, is_valid_mode};

/// Heating mode, as requested by a client or as reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Mode {
    #[default]
    Off = 0,
    Heat = 1,
}

impl Mode {
    /// Decode a raw wire value. `None` for anything but 0 or 1.
    pub fn from_raw(value: i32) -> Option<Self> {
        if !is_valid_mode(value) {
            return None;
        }
        Some(if value == MODE_HEAT { Self::Heat } else { Self::Off })
    }

    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Off => MODE_OFF,
            Self::Heat => MODE_HEAT,
        }
    }
}
