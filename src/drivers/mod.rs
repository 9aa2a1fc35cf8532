//! Bus and actuator drivers, plus the task watchdog.

pub mod onewire;
pub mod relay;
pub mod watchdog;
