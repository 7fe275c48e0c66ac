//! Integration tests: Controller against mock adapters.
//!
//! These drive whole scheduler iterations through the public API and
//! check the ordered hardware call history and emitted events.

use super::mock_hw::{HwCall, rig};
use waterlin::app::events::AppEvent;
use waterlin::app::ports::ValveState::{Closed, Open};
use waterlin::app::service::Controller;
use waterlin::config::{RunMode, SystemConfig};
use waterlin::error::{ActuatorError, Error, SensorError};
use waterlin::fsm::{MenuState, Setting};
use waterlin::scheduler::DayAccumulator;
use waterlin::zones::ZoneId;

const DAY: u64 = 86_400_000;

fn banner() -> HwCall {
    HwCall::Show("    WaterLin    ".into(), String::new())
}

fn watering() -> HwCall {
    HwCall::Show("    WATERING    ".into(), String::new())
}

/// Controller with a full day already on the clock.
fn due_controller() -> Controller {
    let mut ctl = Controller::new(SystemConfig::default()).unwrap();
    *ctl.day_mut() = DayAccumulator::with_elapsed(DAY, DAY);
    ctl
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_shows_banner_and_does_not_count_toward_day() {
    let (mut hw, mut delay, mut sink) = rig();
    let mut ctl = Controller::new(SystemConfig::default()).unwrap();

    ctl.start(&mut hw, &mut delay, &mut sink);

    assert_eq!(
        hw.calls(),
        vec![HwCall::Show("STARTING".into(), String::new()), HwCall::Wait(2000)]
    );
    assert_eq!(sink.events, vec![AppEvent::Started(RunMode::Operate)]);
    assert_eq!(ctl.day().elapsed_ms(), 0);
    assert_eq!(ctl.day().remaining_ms(), DAY);
}

// ── Idle loop ─────────────────────────────────────────────────

#[test]
fn idle_ticks_accumulate_loop_interval_and_draw_once() {
    let (mut hw, mut delay, mut sink) = rig();
    let mut ctl = Controller::new(SystemConfig::default()).unwrap();

    for _ in 0..5 {
        ctl.tick(&mut hw, &mut delay, &mut sink);
    }

    assert_eq!(ctl.day().elapsed_ms(), 5);
    assert_eq!(hw.shown().len(), 1, "unchanged panel is not redrawn");
    assert_eq!(hw.calls()[0], banner());
    assert!(hw.valve_calls().is_empty());
    assert!(sink.events.is_empty());
}

// ── Daily cycle ───────────────────────────────────────────────

#[test]
fn single_dry_zone_is_watered_for_its_duration() {
    let (mut hw, mut delay, mut sink) = rig();
    hw.probe_mv[0] = Ok(1263); // ~3 %, below the default 5 % threshold
    let mut ctl = due_controller();

    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert_eq!(
        hw.calls(),
        vec![
            banner(),
            watering(),
            HwCall::Valve(0, Open),
            HwCall::Wait(60_000),
            HwCall::Valve(0, Closed),
            HwCall::Wait(1),
        ]
    );
    assert!(sink.events.contains(&AppEvent::ValveClosed {
        zone: ZoneId::ALL[0],
        minute: 1,
    }));
    assert!(sink.events.contains(&AppEvent::DayRolledOver { carried_ms: 60_000 }));
    // watering minute carried, plus this iteration's loop interval
    assert_eq!(ctl.day().elapsed_ms(), 60_001);
    assert_eq!(
        sink.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CycleCompleted(report) => Some(report.minutes),
                _ => None,
            })
            .collect::<Vec<_>>(),
        vec![1],
        "the cycle report is delivered through the sink"
    );
    assert!(!ctl.zones().dry_flags().any());
}

#[test]
fn all_wet_day_rolls_over_without_touching_valves() {
    let (mut hw, mut delay, mut sink) = rig();
    let mut ctl = due_controller();

    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert_eq!(hw.calls(), vec![banner(), HwCall::Wait(1)]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ZoneSampled { dry: false, .. })),
        4
    );
    assert!(sink.events.contains(&AppEvent::DayRolledOver { carried_ms: 0 }));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CycleCompleted(_))), 0);
    assert_eq!(ctl.day().elapsed_ms(), 1);
}

#[test]
fn overshoot_before_the_cycle_is_carried() {
    let (mut hw, mut delay, mut sink) = rig();
    let mut ctl = Controller::new(SystemConfig::default()).unwrap();
    *ctl.day_mut() = DayAccumulator::with_elapsed(DAY, DAY + 250);

    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert!(sink.events.contains(&AppEvent::DayRolledOver { carried_ms: 250 }));
    assert_eq!(ctl.day().elapsed_ms(), 251);
}

#[test]
fn panel_is_redrawn_after_a_cycle() {
    let (mut hw, mut delay, mut sink) = rig();
    hw.probe_mv[2] = Ok(1400); // below 0 % on zone 3's fit
    let mut ctl = due_controller();
    ctl.tick(&mut hw, &mut delay, &mut sink);
    hw.clear_log();

    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert_eq!(hw.calls(), vec![banner(), HwCall::Wait(1)]);
}

// ── Menu interaction ──────────────────────────────────────────

#[test]
fn knob_sets_duration_then_cycle_uses_it() {
    let (mut hw, mut delay, mut sink) = rig();
    let mut ctl = Controller::new(SystemConfig::default()).unwrap();

    // Operate -> Duration1 takes five presses.
    hw.press_next(5);
    hw.knob = Ok(0.015); // 1 % of travel -> 2 minutes
    for _ in 0..5 {
        ctl.tick(&mut hw, &mut delay, &mut sink);
    }
    assert_eq!(ctl.menu_state(), MenuState::Duration1);
    assert_eq!(ctl.zones().durations(), [2, 1, 1, 1]);
    assert!(sink.events.contains(&AppEvent::SettingChanged {
        setting: Setting::Duration(ZoneId::ALL[0]),
        value: 2,
    }));

    // Four more presses wrap back to Operate.
    hw.press_next(4);
    for _ in 0..4 {
        ctl.tick(&mut hw, &mut delay, &mut sink);
    }
    assert_eq!(ctl.menu_state(), MenuState::Operate);

    // The lap also set every threshold to 1 %, so go drier than that.
    assert_eq!(ctl.zones().thresholds(), [1, 1, 1, 1]);
    hw.probe_mv[0] = Ok(1300);
    *ctl.day_mut() = DayAccumulator::with_elapsed(DAY, DAY);
    hw.clear_log();
    sink.events.clear();
    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert_eq!(
        hw.calls(),
        vec![
            banner(),
            watering(),
            HwCall::Valve(0, Open),
            HwCall::Wait(60_000),
            HwCall::Wait(60_000),
            HwCall::Valve(0, Closed),
            HwCall::Wait(1),
        ]
    );
    assert!(sink.events.contains(&AppEvent::ValveClosed {
        zone: ZoneId::ALL[0],
        minute: 2,
    }));
}

#[test]
fn editing_blocks_the_daily_decision() {
    let (mut hw, mut delay, mut sink) = rig();
    hw.probe_mv = [Ok(1263); 4];
    let mut ctl = due_controller();
    hw.press_next(1);

    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert_eq!(ctl.menu_state(), MenuState::Threshold1);
    assert!(hw.valve_calls().is_empty());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ZoneSampled { .. })), 0);
    assert!(ctl.day().is_due(), "decision deferred until back in Operate");
}

#[test]
fn knob_fault_keeps_the_setting() {
    let (mut hw, mut delay, mut sink) = rig();
    let mut ctl = Controller::new(SystemConfig::default()).unwrap();
    hw.press_next(1);
    hw.knob = Err(SensorError::AdcReadFailed);

    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert_eq!(ctl.zones().thresholds(), [5, 5, 5, 5]);
    assert!(sink.events.contains(&AppEvent::SensorFault {
        zone: None,
        error: SensorError::AdcReadFailed,
    }));
    assert_eq!(
        hw.shown().last().map(|(a, _)| a.clone()),
        Some("R1:5  % R2:5  % ".to_string())
    );
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn zero_voltage_probe_is_reported_and_skipped() {
    let (mut hw, mut delay, mut sink) = rig();
    hw.probe_mv = [Ok(1263), Ok(0), Ok(1000), Ok(1000)];
    let mut ctl = due_controller();

    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert!(sink.events.contains(&AppEvent::SensorFault {
        zone: Some(ZoneId::ALL[1]),
        error: SensorError::NonPositiveVoltage { millivolts: 0 },
    }));
    assert_eq!(hw.valve_calls(), vec![(0, Open), (0, Closed)]);
}

#[test]
fn valve_failure_aborts_and_closes_everything() {
    let (mut hw, mut delay, mut sink) = rig();
    hw.probe_mv = [Ok(1263), Ok(1000), Ok(1000), Ok(1000)];
    hw.fail_valve = Some((0, Open));
    let mut ctl = due_controller();

    ctl.tick(&mut hw, &mut delay, &mut sink);

    let failure = Error::Actuator(ActuatorError::ValveWriteFailed(ZoneId::ALL[0]));
    assert!(sink.events.contains(&AppEvent::CycleFailed(failure)));
    assert_eq!(
        hw.valve_calls(),
        vec![(0, Closed), (1, Closed), (2, Closed), (3, Closed)]
    );
    assert!(!ctl.zones().dry_flags().any());
    assert!(sink.events.contains(&AppEvent::DayRolledOver { carried_ms: 0 }));
    assert!(!hw.open.iter().any(|&o| o));
}

#[test]
fn display_failure_never_stops_irrigation() {
    let (mut hw, mut delay, mut sink) = rig();
    hw.probe_mv[0] = Ok(1263);
    hw.fail_display = true;
    let mut ctl = due_controller();

    ctl.tick(&mut hw, &mut delay, &mut sink);

    assert!(sink.events.contains(&AppEvent::Fault(Error::Actuator(
        ActuatorError::DisplayWriteFailed
    ))));
    assert_eq!(hw.valve_calls(), vec![(0, Open), (0, Closed)]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CycleCompleted(_))), 1);
}

// ── Calibration mode ──────────────────────────────────────────

#[test]
fn calibration_mode_shows_raw_millivolts() {
    let (mut hw, mut delay, mut sink) = rig();
    hw.probe_mv = [Ok(1263), Err(SensorError::AdcReadFailed), Ok(980), Ok(1500)];
    let config = SystemConfig {
        run_mode: RunMode::SensorCalibration,
        ..SystemConfig::default()
    };
    let mut ctl = Controller::new(config).unwrap();

    ctl.calibration_tick(&mut hw, &mut delay, &mut sink);

    assert_eq!(
        hw.calls(),
        vec![
            HwCall::Show("S1:1263 S2:--   ".into(), "S3:980  S4:1500 ".into()),
            HwCall::Wait(200),
        ]
    );
    assert!(hw.valve_calls().is_empty());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorFault { .. })), 1);
}
