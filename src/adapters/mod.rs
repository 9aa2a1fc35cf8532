//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                 | Connects to                 |
//! |------------|----------------------------|-----------------------------|
//! | `hardware` | TemperatureProbe           | DS18B20 on 1-Wire GPIO      |
//! |            | HeaterPort                 | Relay + status LED GPIO     |
//! | `log_sink` | EventSink                  | Serial log output           |
//! | `nvs`      | ConfigPort                 | NVS / in-memory store       |
//! | `status`   | StatusPort                 | Protocol-task status mailbox|
//! | `time`     | ClockPort                  | ESP32 system timer          |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod status;
pub mod time;
