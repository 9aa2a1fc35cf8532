//! Latest-value status mailbox.
//!
//! The control loop publishes a [`ThermostatStatus`] once per tick; the
//! accessory-protocol task reads whatever was published last. There is
//! exactly one writer, so a critical-section cell is all that is needed.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::app::ports::StatusPort;
use crate::control::thermostat::ThermostatStatus;

pub struct StatusBoard {
    latest: Mutex<CriticalSectionRawMutex, Cell<Option<ThermostatStatus>>>,
}

impl StatusBoard {
    pub const fn new() -> Self {
        Self {
            latest: Mutex::new(Cell::new(None)),
        }
    }

    /// `None` until the controller has published once.
    pub fn latest(&self) -> Option<ThermostatStatus> {
        self.latest.lock(Cell::get)
    }

    /// JSON rendering of the latest status for the protocol layer.
    pub fn latest_json(&self) -> Option<String> {
        self.latest().and_then(|s| serde_json::to_string(&s).ok())
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPort for &StatusBoard {
    fn publish(&mut self, status: &ThermostatStatus) {
        self.latest.lock(|c| c.set(Some(*status)));
    }
}

/// Status shared with the protocol task.
pub static STATUS_BOARD: StatusBoard = StatusBoard::new();
