//! Relay ordering and interrupt masking across mode changes

use yag_trigger::hal::{BenchEventKind, MockBench, MockDelay, MockRelays, MockTrigger};
use yag_trigger::{
    Activity, EdgeOutcome, ModeKind, OperatingMode, RelayId, SpotParams, StitchParams,
    WeldController,
};

type Controller = WeldController<MockRelays, MockTrigger, MockDelay>;

fn booted() -> (MockBench, Controller) {
    let bench = MockBench::new();
    let mut controller = WeldController::new(bench.relays(), bench.trigger(), bench.delay());
    controller.boot().unwrap();
    (bench, controller)
}

fn spot() -> OperatingMode {
    OperatingMode::Spot(SpotParams::new(0.2, 1.0))
}

fn relay(relay: RelayId, high: bool) -> BenchEventKind {
    BenchEventKind::Relay { relay, high }
}

fn timeline(bench: &MockBench) -> Vec<(u64, BenchEventKind)> {
    bench.journal().iter().map(|e| (e.at_ms, e.kind)).collect()
}

// ============================================================================
// Boot
// ============================================================================

#[test]
fn boot_releases_everything_and_settles() {
    let (bench, controller) = booted();

    assert_eq!(controller.mode(), OperatingMode::Normal);
    assert_eq!(controller.relays(), [false; 4]);
    assert_eq!(bench.relay_pattern(), [false; 4]);
    assert!(!bench.interrupt_enabled());
    assert_eq!(bench.now_ms(), 300);
    assert_eq!(
        timeline(&bench),
        vec![
            (0, BenchEventKind::InterruptDisabled),
            (0, relay(RelayId::Relay4, true)),
            (100, relay(RelayId::Relay3, true)),
            (200, relay(RelayId::Relay1, true)),
            (200, relay(RelayId::Relay2, true)),
        ]
    );
}

// ============================================================================
// Arming
// ============================================================================

#[test]
fn arming_order_and_timing() {
    let (bench, mut controller) = booted();
    bench.clear_journal();

    controller.set_mode(spot()).unwrap();

    assert_eq!(
        timeline(&bench),
        vec![
            (300, relay(RelayId::Relay1, false)),
            (300, relay(RelayId::Relay2, false)),
            (300, relay(RelayId::Relay3, true)),
            (400, BenchEventKind::InterruptDisabled),
            (400, relay(RelayId::Relay4, false)),
            (1400, BenchEventKind::InterruptEnabled),
        ]
    );
    assert_eq!(bench.relay_pattern(), [true, true, false, true]);
    assert!(bench.interrupt_enabled());
}

#[test]
fn stitch_arms_like_spot() {
    let (bench, mut controller) = booted();
    controller
        .set_mode(OperatingMode::Stitch(StitchParams::new(0.0, 0.5, 0.5)))
        .unwrap();

    assert_eq!(controller.mode().kind(), ModeKind::Stitch);
    assert_eq!(bench.relay_pattern(), [true, true, false, true]);
    assert!(bench.interrupt_enabled());
}

#[test]
fn relay4_transient_is_masked_when_arming() {
    let (bench, mut controller) = booted();
    bench.set_relay4_glitch(true);

    controller.set_mode(spot()).unwrap();

    assert_eq!(bench.edges_delivered(), 0);
    assert!(!controller.trigger_latched());
    assert_eq!(controller.poll().unwrap(), None);
}

#[test]
fn trigger_held_while_arming_does_not_fire() {
    let (bench, mut controller) = booted();
    bench.press();

    controller.set_mode(spot()).unwrap();

    // Sense line went high while detection was off
    assert_eq!(bench.edges_delivered(), 0);
    assert_eq!(controller.poll().unwrap(), None);

    // A fresh press is a genuine trigger
    bench.release();
    bench.press();
    bench.release_at(bench.now_ms() + 20);
    assert_eq!(
        controller.poll().unwrap(),
        Some(Activity::Spot { spot_count: 1 })
    );
}

#[test]
fn rearming_same_mode_installs_new_program() {
    let (_bench, mut controller) = booted();
    controller.set_mode(spot()).unwrap();
    controller
        .set_mode(OperatingMode::Spot(SpotParams::new(0.5, 2.0)))
        .unwrap();

    assert_eq!(controller.spot_program(), SpotParams::new(0.5, 2.0));
    assert_eq!(controller.relays(), [true, true, false, true]);
}

// ============================================================================
// Disarming
// ============================================================================

#[test]
fn normal_disables_interrupt_before_relay4() {
    let (bench, mut controller) = booted();
    controller.set_mode(spot()).unwrap();
    bench.clear_journal();

    controller.set_mode(OperatingMode::Normal).unwrap();

    assert_eq!(
        timeline(&bench),
        vec![
            (1400, BenchEventKind::InterruptDisabled),
            (1400, relay(RelayId::Relay4, true)),
            (1500, relay(RelayId::Relay3, true)),
            (1600, relay(RelayId::Relay1, true)),
            (1600, relay(RelayId::Relay2, true)),
        ]
    );
    assert_eq!(bench.now_ms(), 1700);
    assert!(!bench.interrupt_enabled());
}

#[test]
fn relay4_transient_is_masked_when_disarming() {
    let (bench, mut controller) = booted();
    controller.set_mode(spot()).unwrap();
    bench.set_relay4_glitch(true);

    controller.set_mode(OperatingMode::Normal).unwrap();

    assert_eq!(bench.edges_delivered(), 0);
    assert_eq!(controller.poll().unwrap(), None);
}

#[test]
fn round_trip_restores_boot_pattern() {
    let (bench, mut controller) = booted();
    let boot = bench.relay_pattern();

    controller.set_mode(spot()).unwrap();
    controller
        .set_mode(OperatingMode::Stitch(StitchParams::new(0.1, 0.2, 0.3)))
        .unwrap();
    controller.set_mode(OperatingMode::Normal).unwrap();

    assert_eq!(bench.relay_pattern(), boot);
    assert_eq!(controller.relays(), boot);
    assert_eq!(controller.mode(), OperatingMode::Normal);
}

// ============================================================================
// Latch handling across modes
// ============================================================================

#[test]
fn stale_latch_is_discarded_on_mode_change() {
    let (bench, mut controller) = booted();
    controller.set_mode(spot()).unwrap();

    bench.press();
    assert!(controller.trigger_latched());

    controller
        .set_mode(OperatingMode::Stitch(StitchParams::new(0.0, 0.5, 0.5)))
        .unwrap();

    assert!(!controller.trigger_latched());
    assert_eq!(controller.poll().unwrap(), None);
    assert_eq!(controller.counters().stitch_count, 0);
}

#[test]
fn no_procedure_in_normal_mode() {
    let (bench, mut controller) = booted();
    bench.press();
    bench.advance(500);
    bench.release();

    assert_eq!(controller.poll().unwrap(), None);
    assert_eq!(bench.weld_pulses(), vec![]);
}

#[test]
fn edge_in_normal_mode_is_reported() {
    let (bench, mut controller) = booted();
    controller.set_mode(spot()).unwrap();

    // Faulty board: detection survives the disable and relay4 is stuck closed
    bench.set_leaky_disable(true);
    controller.set_mode(OperatingMode::Normal).unwrap();
    bench.set_relay4_welded(true);

    bench.press();

    assert_eq!(
        bench.journal().last().map(|e| e.kind),
        Some(BenchEventKind::Edge(EdgeOutcome::ContractViolation))
    );
    assert!(!controller.trigger_latched());
    assert_eq!(
        controller.poll().unwrap(),
        Some(Activity::ContractViolation { edges: 1 })
    );
    assert_eq!(controller.poll().unwrap(), None);
    assert_eq!(bench.weld_pulses(), vec![]);
}

// ============================================================================
// Self-disarming interrupts
// ============================================================================

#[test]
fn one_shot_interrupt_is_rearmed_between_welds() {
    let (bench, mut controller) = booted();
    bench.set_one_shot_interrupts(true);
    controller.set_mode(spot()).unwrap();

    for expected in 1..=3 {
        bench.press();
        bench.release_at(bench.now_ms() + 30);
        assert_eq!(
            controller.poll().unwrap(),
            Some(Activity::Spot {
                spot_count: expected
            })
        );
        assert!(bench.interrupt_enabled());
    }
}
