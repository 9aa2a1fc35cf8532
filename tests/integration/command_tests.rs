//! Command intake: validation, fault gating, and queue delivery.

use sauna::app::commands::{AppCommand, CommandQueue};
use sauna::app::events::AppEvent;
use sauna::control::Mode;
use sauna::error::CommandRejection;
use sauna::safety::DISCONNECT_SENTINEL_C;

use crate::mock_hw::{Harness, MockHardware};

fn rejections(h: &Harness) -> Vec<CommandRejection> {
    h.sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::CommandRejected(r) => Some(*r),
            _ => None,
        })
        .collect()
}

#[test]
fn invalid_mode_values_are_dropped() {
    let mut h = Harness::new(MockHardware::new(20.0));
    for raw in [2, 3, -1, 42] {
        let out = h.svc.handle_command(AppCommand::SetMode(raw), &mut h.sink);
        assert_eq!(out.mode, Some(false));
    }
    assert_eq!(h.svc.requested_mode(), Mode::Off);
    assert_eq!(rejections(&h).len(), 4);
    assert_eq!(rejections(&h)[0], CommandRejection::InvalidMode(2));
}

#[test]
fn out_of_range_target_is_dropped() {
    let mut h = Harness::new(MockHardware::new(20.0));
    assert!(!h.svc.apply_target_command(39.9));
    assert!(!h.svc.apply_target_command(100.5));
    assert!(!h.svc.apply_target_command(f32::NAN));
    assert_eq!(h.svc.target_c(), 70.0);
    assert!(h.svc.apply_target_command(40.0));
    assert!(h.svc.apply_target_command(100.0));
    assert_eq!(h.svc.target_c(), 100.0);
}

#[test]
fn rejected_commands_cause_no_heater_action() {
    let mut h = Harness::new(MockHardware::new(20.0));
    h.svc.handle_command(AppCommand::SetMode(7), &mut h.sink);
    h.svc.handle_command(AppCommand::SetTarget(500.0), &mut h.sink);
    h.run_for(10_000);
    assert!(h.hw.heater_writes.iter().all(|on| !on));
}

#[test]
fn same_target_twice_is_idempotent() {
    let mut h = Harness::new(MockHardware::new(20.0));
    assert!(h.svc.apply_target_command(85.0));
    let once = h.svc.control_state();
    assert!(h.svc.apply_target_command(85.0));
    assert_eq!(h.svc.control_state(), once);
}

#[test]
fn lowering_target_below_reading_releases_heater() {
    let mut h = Harness::new(MockHardware::new(60.0));
    h.command_mode(1);
    h.run_until_reading();
    assert!(h.hw.relay_on());

    assert!(h.svc.apply_target_command(50.0));
    h.run_until_reading();
    assert!(!h.hw.relay_on());
    assert_eq!(h.svc.requested_mode(), Mode::Heat);
}

#[test]
fn heat_refused_during_fault_is_not_queued() {
    let mut h = Harness::new(MockHardware::new(DISCONNECT_SENTINEL_C));
    h.run_until_reading();
    assert!(h.svc.sensor_fault());

    let out = h.svc.handle_command(AppCommand::SetMode(1), &mut h.sink);
    assert_eq!(out.mode, Some(false));
    assert_eq!(rejections(&h), vec![CommandRejection::HeatRefusedSensorFault]);

    // recovery alone does not resurrect the refused request
    h.hw.steady = 20.0;
    h.run_until_reading();
    assert!(!h.svc.sensor_fault());
    assert_eq!(h.svc.requested_mode(), Mode::Off);
    assert!(!h.hw.relay_on());
}

#[test]
fn update_applies_both_fields_between_ticks() {
    let mut h = Harness::new(MockHardware::new(60.0));
    let queue = CommandQueue::new();
    queue
        .submit(AppCommand::Update {
            mode: Some(1),
            target_c: Some(90.0),
        })
        .unwrap();

    assert_eq!(h.svc.drain_commands(&queue, &mut h.sink), 1);
    h.run_until_reading();
    assert!(h.hw.relay_on());
    let s = h.status.last();
    assert_eq!(s.target_c, 90.0);
    assert_eq!(s.requested_mode, Mode::Heat);
}

#[test]
fn update_with_one_bad_field_changes_nothing() {
    let mut h = Harness::new(MockHardware::new(20.0));
    let before = h.svc.control_state();
    let out = h.svc.handle_command(
        AppCommand::Update {
            mode: Some(1),
            target_c: Some(150.0),
        },
        &mut h.sink,
    );
    assert_eq!(out.target, Some(false));
    assert_eq!(out.mode, Some(false));
    assert!(!out.all_accepted());
    assert_eq!(h.svc.control_state(), before);
    assert_eq!(rejections(&h), vec![CommandRejection::InvalidTarget(150.0)]);

    // no stale-target heating on the next reading
    h.run_until_reading();
    assert!(!h.hw.relay_on());
}

#[test]
fn update_with_bad_mode_keeps_old_target() {
    let mut h = Harness::new(MockHardware::new(20.0));
    let out = h.svc.handle_command(
        AppCommand::Update {
            mode: Some(5),
            target_c: Some(80.0),
        },
        &mut h.sink,
    );
    assert_eq!(out.mode, Some(false));
    assert_eq!(out.target, Some(false));
    assert_eq!(h.svc.target_c(), 70.0);
    assert_eq!(rejections(&h), vec![CommandRejection::InvalidMode(5)]);
}

#[test]
fn update_refused_during_fault_reports_every_rejection() {
    let mut h = Harness::new(MockHardware::new(DISCONNECT_SENTINEL_C));
    h.run_until_reading();
    let out = h.svc.handle_command(
        AppCommand::Update {
            mode: Some(1),
            target_c: Some(500.0),
        },
        &mut h.sink,
    );
    assert!(!out.all_accepted());
    assert_eq!(
        rejections(&h),
        vec![
            CommandRejection::HeatRefusedSensorFault,
            CommandRejection::InvalidTarget(500.0)
        ]
    );
    assert_eq!(h.svc.target_c(), 70.0);
}

#[test]
fn queued_commands_apply_in_order() {
    let mut h = Harness::new(MockHardware::new(20.0));
    let queue = CommandQueue::new();
    queue.submit(AppCommand::SetMode(1)).unwrap();
    queue.submit(AppCommand::SetTarget(60.0)).unwrap();
    queue.submit(AppCommand::SetMode(0)).unwrap();
    h.svc.drain_commands(&queue, &mut h.sink);
    assert_eq!(h.svc.requested_mode(), Mode::Off);
    assert_eq!(h.svc.target_c(), 60.0);
    assert!(queue.is_empty());
}
