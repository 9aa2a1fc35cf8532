//! Fuzz target: `AppService` control cycle
//!
//! Decodes the input as a stream of 6-byte records, each either a tick
//! (time advance + raw probe value) or a command, and drives the service.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - The relay always matches the controller's heater flag
//! - A faulted sensor never coexists with an energised heater
//! - An energised heater never outlives the session limit
//!
//! cargo fuzz run fuzz_controller

#![no_main]

use libfuzzer_sys::fuzz_target;
use sauna::app::commands::AppCommand;
use sauna::app::events::AppEvent;
use sauna::app::ports::{EventSink, HeaterPort, StatusPort, TemperatureProbe};
use sauna::app::service::AppService;
use sauna::config::SystemConfig;
use sauna::control::thermostat::ThermostatStatus;
use sauna::error::ActuatorError;
use sauna::safety::SESSION_MAX_MS;

struct Rig {
    value: f32,
    relay: bool,
}

impl TemperatureProbe for Rig {
    fn start_conversion(&mut self) {}
    fn read_last_result(&mut self) -> f32 {
        self.value
    }
}

impl HeaterPort for Rig {
    fn set_heater(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.relay = on;
        Ok(())
    }
    fn is_heater_on(&self) -> bool {
        self.relay
    }
}

struct Null;

impl EventSink for Null {
    fn emit(&mut self, _event: &AppEvent) {}
}

impl StatusPort for Null {
    fn publish(&mut self, _status: &ThermostatStatus) {}
}

fuzz_target!(|data: &[u8]| {
    let mut svc = AppService::new(&SystemConfig::default());
    let mut rig = Rig {
        value: 20.0,
        relay: false,
    };
    let mut now: u32 = 0;
    svc.start(now, &mut rig, &mut Null, &mut Null);

    for rec in data.chunks_exact(6) {
        let arg = f32::from_le_bytes([rec[2], rec[3], rec[4], rec[5]]);
        match rec[0] % 5 {
            0 | 1 => {
                // Advance by up to ~65 s so expiry is reachable.
                let dt = u32::from(rec[1]) * 256 + 1;
                now = now.wrapping_add(dt);
                rig.value = arg;
                svc.tick(now, &mut rig, &mut Null, &mut Null);

                let st = svc.control_state();
                assert_eq!(rig.relay, st.session.heater_active);
                if st.session.heater_active {
                    assert!(!st.session.sensor_fault);
                    assert!(now.wrapping_sub(st.session.session_start_ms) < SESSION_MAX_MS);
                }
            }
            2 => {
                svc.handle_command(AppCommand::SetMode(i32::from(rec[1] as i8)), &mut Null);
            }
            3 => {
                svc.handle_command(AppCommand::SetTarget(arg), &mut Null);
            }
            _ => {
                let before = svc.control_state();
                let out = svc.handle_command(
                    AppCommand::Update {
                        mode: Some(i32::from(rec[1] as i8)),
                        target_c: Some(arg),
                    },
                    &mut Null,
                );
                if !out.all_accepted() {
                    assert_eq!(svc.control_state(), before);
                }
            }
        }
    }
});
