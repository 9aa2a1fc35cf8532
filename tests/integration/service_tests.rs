//! End-to-end control cycles against mock hardware.

use sauna::app::events::AppEvent;
use sauna::control::Mode;
use sauna::error::{ActuatorError, SafetyTrip};
use sauna::safety::{DISCONNECT_SENTINEL_C, SESSION_MAX_MS};
use sauna::sensors::acquisition::AcquisitionPhase;

use crate::mock_hw::{Harness, MockHardware};

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_publishes_unknown_temperature_and_releases_relay() {
    let h = Harness::new(MockHardware::new(20.0));
    assert_eq!(h.hw.heater_writes, vec![false]);
    let s = h.status.last();
    assert_eq!(s.current_temp_c, None);
    assert_eq!(s.current_mode, Mode::Off);
    assert_eq!(s.target_c, 70.0);
    assert!(matches!(h.sink.events[0], AppEvent::Started(_)));
}

#[test]
fn status_published_every_tick() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.run_for(1_000);
    // one from start plus one per tick
    assert_eq!(h.status.published.len(), 1 + 10);
}

// ── Acquisition cadence ───────────────────────────────────────

#[test]
fn samples_every_two_seconds_without_early_reads() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.run_for(20_000);
    assert_eq!(h.hw.conversions(), 10);
    assert_eq!(h.hw.reads, 10);
    assert!(!h.hw.early_read);
    let gaps: Vec<u32> = h
        .hw
        .conversion_times
        .windows(2)
        .map(|w| w[1] - w[0])
        .collect();
    assert!(gaps.iter().all(|&g| g == 2_000), "gaps {gaps:?}");
}

#[test]
fn no_reading_means_no_relay_write() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.command_mode(1);
    h.tick(); // t=0: request only
    assert!(matches!(
        h.svc.acquisition_phase(),
        AcquisitionPhase::ConversionPending { .. }
    ));
    assert_eq!(h.hw.heater_writes, vec![false]);
}

// ── Thermostat sequence ───────────────────────────────────────

#[test]
fn hysteresis_sequence_at_target_70() {
    let mut h = Harness::new(MockHardware::scripted(&[20.0, 20.0, 66.0, 68.0, 70.0, 71.0]));
    assert!(h.command_mode(1));

    let mut relay = Vec::new();
    for _ in 0..6 {
        h.run_until_reading();
        relay.push(h.hw.relay_on());
    }
    assert_eq!(relay, vec![true, true, true, true, false, false]);

    let changes: Vec<bool> = h
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::HeaterChanged { on, .. } => Some(*on),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![true, false]);
    assert_eq!(h.status.last().current_temp_c, Some(71.0));
    assert_eq!(h.status.last().current_mode, Mode::Off);
    assert_eq!(h.status.last().requested_mode, Mode::Heat);
}

#[test]
fn reengages_only_below_band() {
    let mut h = Harness::new(MockHardware::scripted(&[75.0, 69.0, 68.0, 67.9]));
    h.command_mode(1);
    let mut relay = Vec::new();
    for _ in 0..4 {
        h.run_until_reading();
        relay.push(h.hw.relay_on());
    }
    assert_eq!(relay, vec![false, false, false, true]);
}

#[test]
fn off_mode_never_heats() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.run_for(10_000);
    assert!(h.hw.heater_writes.iter().all(|on| !on));
    assert_eq!(h.status.last().current_temp_c, Some(20.0));
}

#[test]
fn off_command_releases_heater_on_next_tick() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.command_mode(1);
    h.run_until_reading();
    assert!(h.hw.relay_on());

    assert!(h.command_mode(0));
    h.tick();
    assert!(!h.hw.relay_on());
    assert_eq!(h.status.last().current_mode, Mode::Off);
}

// ── Session expiry ────────────────────────────────────────────

#[test]
fn session_expires_after_one_hour_of_heating() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.command_mode(1);
    h.run_until_reading();
    assert!(h.hw.relay_on());
    let start = h.svc.control_state().session.session_start_ms;

    while h.now_ms.wrapping_sub(start) < SESSION_MAX_MS {
        h.tick();
        assert!(h.hw.relay_on(), "released early at {}", h.now_ms);
    }
    h.tick();
    assert!(!h.hw.relay_on());
    assert_eq!(h.svc.requested_mode(), Mode::Off);
    assert_eq!(h.trips(), vec![SafetyTrip::SessionExpired]);

    // cold readings do not restart it
    h.run_for(10_000);
    assert!(!h.hw.relay_on());
}

#[test]
fn new_heat_command_after_expiry_starts_fresh_session() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.command_mode(1);
    h.run_until_reading();
    let first = h.svc.control_state().session.session_start_ms;
    h.run_for(SESSION_MAX_MS + 1_000);
    assert!(!h.hw.relay_on());

    assert!(h.command_mode(1));
    h.run_until_reading();
    assert!(h.hw.relay_on());
    let second = h.svc.control_state().session.session_start_ms;
    assert!(second.wrapping_sub(first) > SESSION_MAX_MS);
}

#[test]
fn heating_across_millis_rollover_is_not_expired() {
    let start = u32::MAX - 5_000;
    let mut h = Harness::starting_at(MockHardware::new(20.0), start);
    h.command_mode(1);
    h.run_until_reading();
    assert!(h.hw.relay_on());

    h.run_for(20_000);
    assert!(h.now_ms < start, "clock should have wrapped");
    assert!(h.hw.relay_on());
    assert!(h.trips().is_empty());
    let elapsed = h.status.last().session_elapsed_ms.unwrap();
    assert!(elapsed < 25_000, "elapsed {elapsed}");
    assert!(!h.hw.early_read);
}

// ── Sensor fault ──────────────────────────────────────────────

#[test]
fn disconnect_forces_off_and_blocks_heat_until_recovery() {
    let mut h = Harness::new(MockHardware::scripted(&[20.0, DISCONNECT_SENTINEL_C]));
    h.hw.steady = DISCONNECT_SENTINEL_C;
    h.command_mode(1);
    h.run_until_reading();
    assert!(h.hw.relay_on());

    h.run_until_reading();
    assert!(!h.hw.relay_on());
    assert!(h.svc.sensor_fault());
    assert!(h.status.last().sensor_fault);
    assert_eq!(h.svc.requested_mode(), Mode::Off);
    assert_eq!(h.trips(), vec![SafetyTrip::SensorFault]);

    // still faulted: HEAT refused, OFF accepted
    h.run_until_reading();
    assert!(!h.command_mode(1));
    assert!(h.command_mode(0));

    // probe comes back
    h.hw.steady = 20.0;
    h.run_until_reading();
    assert!(!h.svc.sensor_fault());
    assert!(h.sink.events.contains(&AppEvent::FaultCleared));
    assert!(!h.hw.relay_on(), "no automatic re-engage after a fault");

    assert!(h.command_mode(1));
    h.run_until_reading();
    assert!(h.hw.relay_on());
    // exactly one trip for the whole outage
    assert_eq!(h.trips(), vec![SafetyTrip::SensorFault]);
}

#[test]
fn fault_keeps_last_good_temperature_for_display() {
    let mut h = Harness::new(MockHardware::scripted(&[55.0, DISCONNECT_SENTINEL_C]));
    h.run_until_reading();
    h.run_until_reading();
    let s = h.status.last();
    assert!(s.sensor_fault);
    assert_eq!(s.current_temp_c, Some(55.0));
}

#[test]
fn nan_reading_is_treated_as_disconnect() {
    let mut h = Harness::new(MockHardware::scripted(&[20.0, f32::NAN]));
    h.command_mode(1);
    h.run_until_reading();
    h.run_until_reading();
    assert!(!h.hw.relay_on());
    assert!(h.svc.sensor_fault());
}

// ── Over-temperature ──────────────────────────────────────────

#[test]
fn over_temperature_trips_and_stays_off() {
    let mut h = Harness::new(MockHardware::scripted(&[20.0, 110.0, 20.0]));
    h.svc.apply_target_command(100.0);
    h.command_mode(1);
    h.run_until_reading();
    assert!(h.hw.relay_on());

    h.run_until_reading();
    assert!(!h.hw.relay_on());
    assert_eq!(h.svc.requested_mode(), Mode::Off);
    assert_eq!(h.trips(), vec![SafetyTrip::OverTemperature]);

    h.run_until_reading();
    assert!(!h.hw.relay_on());
}

// ── Actuator failure ──────────────────────────────────────────

#[test]
fn relay_failure_reports_and_fails_safe() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.command_mode(1);
    h.hw.fail_writes = true;
    h.run_until_reading();
    assert!(!h.svc.heater_active());
    assert_eq!(h.svc.requested_mode(), Mode::Off);
    assert!(
        h.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::ActuatorFault(_)))
    );
    assert_eq!(h.status.last().current_mode, Mode::Off);
}

#[test]
fn failed_engage_is_not_reported_as_heater_off() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.command_mode(1);
    h.hw.fail_writes = true;
    h.run_until_reading();
    assert!(
        !h.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::HeaterChanged { .. }))
    );
}

#[test]
fn relay_that_ignores_off_is_caught() {
    let mut h = Harness::new(MockHardware::scripted(&[20.0, 115.0]));
    h.svc.apply_target_command(100.0);
    h.command_mode(1);
    h.run_until_reading();
    assert!(h.hw.relay_on());

    h.hw.stuck_relay = true;
    h.run_until_reading();
    assert_eq!(h.trips(), vec![SafetyTrip::OverTemperature]);
    assert!(
        h.sink
            .events
            .contains(&AppEvent::ActuatorFault(ActuatorError::StateMismatch))
    );
    assert!(!h.svc.heater_active());
    assert_eq!(h.status.last().current_mode, Mode::Off);
    // OFF is retried while the contact stays closed
    let writes = h.hw.heater_writes.len();
    h.tick();
    assert!(h.hw.heater_writes.len() > writes);
    assert_eq!(h.hw.heater_writes.last(), Some(&false));
}
