//! Mock implementations for testing without hardware.
//!
//! The relay, trigger, and delay mocks all share one [`MockBench`]: a
//! virtual clock, a scripted torch switch, and a journal of everything the
//! controller did to the hardware. Delays advance the virtual clock and
//! replay the switch script as they go, so rising edges reach the installed
//! [`TriggerMonitor`] at the right virtual time and a 5 s weld runs in
//! microseconds.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockRelays`] | [`RelayDriver`] | Records coil levels on the bench |
//! | [`MockTrigger`] | [`TriggerInput`] | Sense line and edge interrupt |
//! | [`MockDelay`] | [`Delay`] | Advances virtual time |
//! | [`MockThermometer`] | [`TemperatureSensor`] | Fixed or failing reading |
//! | [`MockTransport`] | [`LineTransport`] | Queued input, captured output |
//!
//! # Sense line model
//!
//! The sense input is high only while the torch switch is pressed AND relay4
//! is energized. Energizing relay4 with the switch already pressed is a
//! rising edge like any other.
//!
//! # Example
//!
//! ```rust
//! use yag_trigger::hal::{BenchEventKind, MockBench};
//! use yag_trigger::traits::{Delay, RelayDriver, RelayId};
//!
//! let bench = MockBench::new();
//! let mut relays = bench.relays();
//! let mut delay = bench.delay();
//!
//! relays.write(RelayId::Relay3, false).unwrap();
//! delay.delay_ms(100);
//! relays.write(RelayId::Relay3, true).unwrap();
//!
//! assert_eq!(bench.now_ms(), 100);
//! assert_eq!(bench.weld_pulses(), vec![(0, 100)]);
//! assert!(matches!(bench.journal()[0].kind, BenchEventKind::Relay { .. }));
//! ```
//!
//! [`RelayDriver`]: crate::traits::RelayDriver
//! [`TriggerInput`]: crate::traits::TriggerInput
//! [`Delay`]: crate::traits::Delay
//! [`TemperatureSensor`]: crate::traits::TemperatureSensor
//! [`LineTransport`]: crate::traits::LineTransport

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::monitor::{EdgeOutcome, TriggerMonitor};
use crate::traits::{
    Delay, LineTransport, RelayDriver, RelayId, TemperatureSensor, TriggerInput,
};

// ============================================================================
// Bench
// ============================================================================

/// One thing that happened on the bench.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchEvent {
    /// Virtual time in milliseconds.
    pub at_ms: u64,
    /// What happened.
    pub kind: BenchEventKind,
}

/// Kinds of [`BenchEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchEventKind {
    /// A relay coil input was driven to `high`.
    Relay {
        /// Which relay.
        relay: RelayId,
        /// Physical level (low = energized).
        high: bool,
    },
    /// Rising-edge detection was enabled.
    InterruptEnabled,
    /// Rising-edge detection was disabled.
    InterruptDisabled,
    /// A rising edge reached the installed monitor.
    Edge(EdgeOutcome),
}

#[derive(Debug)]
struct BenchState {
    now_ms: u64,
    levels: [bool; 4],
    switch_pressed: bool,
    sense: bool,
    script: VecDeque<(u64, bool)>,
    monitor: Option<TriggerMonitor>,
    armed: bool,
    live: bool,
    one_shot: bool,
    leaky_disable: bool,
    relay4_glitch: bool,
    relay4_welded: bool,
    enable_fault: bool,
    rearm_budget: Option<u32>,
    relay_fault_after: Option<u32>,
    journal: Vec<BenchEvent>,
}

impl BenchState {
    fn new() -> Self {
        Self {
            now_ms: 0,
            // Coil inputs idle high: nothing energized
            levels: [true; 4],
            switch_pressed: false,
            sense: false,
            script: VecDeque::new(),
            monitor: None,
            armed: false,
            live: false,
            one_shot: false,
            leaky_disable: false,
            relay4_glitch: false,
            relay4_welded: false,
            enable_fault: false,
            rearm_budget: None,
            relay_fault_after: None,
            journal: Vec::new(),
        }
    }

    fn record(&mut self, kind: BenchEventKind) {
        self.journal.push(BenchEvent {
            at_ms: self.now_ms,
            kind,
        });
    }

    fn schedule(&mut self, at_ms: u64, pressed: bool) {
        if at_ms <= self.now_ms {
            self.set_switch(pressed);
            return;
        }
        let pos = self.script.partition_point(|&(t, _)| t <= at_ms);
        self.script.insert(pos, (at_ms, pressed));
    }

    fn set_switch(&mut self, pressed: bool) {
        self.switch_pressed = pressed;
        self.update_sense();
    }

    fn update_sense(&mut self) {
        let connected = self.relay4_welded || !self.levels[RelayId::Relay4.index()];
        let level = self.switch_pressed && connected;
        if level && !self.sense {
            self.rising_edge();
        }
        self.sense = level;
    }

    fn rising_edge(&mut self) {
        if !self.live {
            return;
        }
        let Some(monitor) = self.monitor.as_ref() else {
            return;
        };
        let outcome = monitor.on_rising_edge();
        if self.one_shot {
            self.live = false;
        }
        self.record(BenchEventKind::Edge(outcome));
    }

    fn advance(&mut self, ms: u64) {
        let target = self.now_ms.saturating_add(ms);
        while let Some(&(at, pressed)) = self.script.front() {
            if at > target {
                break;
            }
            self.script.pop_front();
            self.now_ms = self.now_ms.max(at);
            self.set_switch(pressed);
        }
        self.now_ms = target;
    }

    fn write_relay(&mut self, relay: RelayId, high: bool) -> Result<(), ()> {
        match self.relay_fault_after {
            Some(0) => {
                self.relay_fault_after = None;
                return Err(());
            }
            Some(n) => self.relay_fault_after = Some(n - 1),
            None => {}
        }
        let changed = self.levels[relay.index()] != high;
        self.levels[relay.index()] = high;
        self.record(BenchEventKind::Relay { relay, high });
        if relay == RelayId::Relay4 && changed {
            if self.relay4_glitch {
                self.rising_edge();
            }
            self.update_sense();
        }
        Ok(())
    }

    fn take_rearm(&mut self) -> Result<(), ()> {
        match self.rearm_budget {
            Some(0) => Err(()),
            Some(n) => {
                self.rearm_budget = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Virtual-time test bench shared by the hardware mocks.
///
/// Cloning the bench (or any mock taken from it) shares the same state.
#[derive(Clone, Debug)]
pub struct MockBench {
    state: Rc<RefCell<BenchState>>,
}

impl Default for MockBench {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBench {
    /// Creates a bench at t = 0 with the switch released.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(BenchState::new())),
        }
    }

    /// Relay driver wired to this bench.
    pub fn relays(&self) -> MockRelays {
        MockRelays {
            state: Rc::clone(&self.state),
        }
    }

    /// Trigger input wired to this bench.
    pub fn trigger(&self) -> MockTrigger {
        MockTrigger {
            state: Rc::clone(&self.state),
        }
    }

    /// Delay that advances this bench's clock.
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: Rc::clone(&self.state),
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Advance virtual time, replaying the switch script.
    pub fn advance(&self, ms: u64) {
        self.state.borrow_mut().advance(ms);
    }

    // ------------------------------------------------------------------
    // Torch switch script
    // ------------------------------------------------------------------

    /// Press the torch switch now.
    pub fn press(&self) {
        let mut state = self.state.borrow_mut();
        let now = state.now_ms;
        state.schedule(now, true);
    }

    /// Release the torch switch now.
    pub fn release(&self) {
        let mut state = self.state.borrow_mut();
        let now = state.now_ms;
        state.schedule(now, false);
    }

    /// Press the switch at `at_ms` (immediately if already past).
    pub fn press_at(&self, at_ms: u64) {
        self.state.borrow_mut().schedule(at_ms, true);
    }

    /// Release the switch at `at_ms` (immediately if already past).
    pub fn release_at(&self, at_ms: u64) {
        self.state.borrow_mut().schedule(at_ms, false);
    }

    /// Press at `at_ms` and release `hold_ms` later.
    pub fn tap_at(&self, at_ms: u64, hold_ms: u64) {
        let mut state = self.state.borrow_mut();
        state.schedule(at_ms, true);
        state.schedule(at_ms + hold_ms, false);
    }

    /// Contact bounce starting at `at_ms`: `presses` closures separated by
    /// opens, one millisecond apart, ending with the switch pressed.
    pub fn bounce_at(&self, at_ms: u64, presses: u32) {
        let mut state = self.state.borrow_mut();
        let mut t = at_ms;
        for i in 0..presses {
            state.schedule(t, true);
            t += 1;
            if i + 1 < presses {
                state.schedule(t, false);
                t += 1;
            }
        }
    }

    /// Current switch position.
    pub fn switch_pressed(&self) -> bool {
        self.state.borrow().switch_pressed
    }

    // ------------------------------------------------------------------
    // Fault injection
    // ------------------------------------------------------------------

    /// Make detection disarm itself after each delivered edge until
    /// `rearm` is called, as ESP-IDF GPIO interrupts do.
    pub fn set_one_shot_interrupts(&self, one_shot: bool) {
        self.state.borrow_mut().one_shot = one_shot;
    }

    /// Make `disable_interrupt` leave detection running, so edges arrive
    /// in Normal mode.
    pub fn set_leaky_disable(&self, leaky: bool) {
        self.state.borrow_mut().leaky_disable = leaky;
    }

    /// Produce a rising edge on every relay4 switch-over.
    pub fn set_relay4_glitch(&self, glitch: bool) {
        self.state.borrow_mut().relay4_glitch = glitch;
    }

    /// Connect the sense line to the switch regardless of relay4, as if
    /// its contacts had welded shut.
    pub fn set_relay4_welded(&self, welded: bool) {
        let mut state = self.state.borrow_mut();
        state.relay4_welded = welded;
        state.update_sense();
    }

    /// Make `enable_rising_edge` fail without installing the monitor.
    pub fn set_enable_fault(&self, fault: bool) {
        self.state.borrow_mut().enable_fault = fault;
    }

    /// Let `rearm` succeed `n` more times, then fail on every call until
    /// [`clear_faults`](Self::clear_faults).
    pub fn fail_rearm_after(&self, n: u32) {
        self.state.borrow_mut().rearm_budget = Some(n);
    }

    /// Let `n` more relay writes through, then fail the next one (once).
    /// The failed write leaves the coil where it was.
    pub fn fail_relay_write_after(&self, n: u32) {
        self.state.borrow_mut().relay_fault_after = Some(n);
    }

    /// Drop every injected driver error.
    pub fn clear_faults(&self) {
        let mut state = self.state.borrow_mut();
        state.enable_fault = false;
        state.rearm_budget = None;
        state.relay_fault_after = None;
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Everything recorded so far, oldest first.
    pub fn journal(&self) -> Vec<BenchEvent> {
        self.state.borrow().journal.clone()
    }

    /// Forget the journal (the clock keeps running).
    pub fn clear_journal(&self) {
        self.state.borrow_mut().journal.clear();
    }

    /// Physical level of a coil input.
    pub fn relay_level(&self, relay: RelayId) -> bool {
        self.state.borrow().levels[relay.index()]
    }

    /// True when the coil input is low (active-low).
    pub fn relay_energized(&self, relay: RelayId) -> bool {
        !self.relay_level(relay)
    }

    /// Energized state of relay1..relay4.
    pub fn relay_pattern(&self) -> [bool; 4] {
        RelayId::ALL.map(|relay| self.relay_energized(relay))
    }

    /// Whether a monitor is installed and detection is live.
    pub fn interrupt_enabled(&self) -> bool {
        let state = self.state.borrow();
        state.live && state.monitor.is_some()
    }

    /// Edges delivered to a monitor.
    pub fn edges_delivered(&self) -> usize {
        self.state
            .borrow()
            .journal
            .iter()
            .filter(|e| matches!(e.kind, BenchEventKind::Edge(_)))
            .count()
    }

    /// Relay3 energized intervals as `(start, end)` virtual times.
    ///
    /// An interval still open is reported up to the current time.
    pub fn weld_pulses(&self) -> Vec<(u64, u64)> {
        let state = self.state.borrow();
        let mut pulses = Vec::new();
        let mut start = None;
        for event in &state.journal {
            if let BenchEventKind::Relay {
                relay: RelayId::Relay3,
                high,
            } = event.kind
            {
                match (high, start) {
                    (false, None) => start = Some(event.at_ms),
                    (true, Some(s)) => {
                        pulses.push((s, event.at_ms));
                        start = None;
                    }
                    _ => {}
                }
            }
        }
        if let Some(s) = start {
            pulses.push((s, state.now_ms));
        }
        pulses
    }

    /// Time of the first journal event matching `pred`.
    pub fn first_time(&self, pred: impl Fn(&BenchEventKind) -> bool) -> Option<u64> {
        self.state
            .borrow()
            .journal
            .iter()
            .find(|e| pred(&e.kind))
            .map(|e| e.at_ms)
    }
}

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Relay coil driver on a [`MockBench`].
#[derive(Clone, Debug)]
pub struct MockRelays {
    state: Rc<RefCell<BenchState>>,
}

impl RelayDriver for MockRelays {
    type Error = ();

    fn write(&mut self, relay: RelayId, high: bool) -> Result<(), ()> {
        self.state.borrow_mut().write_relay(relay, high)
    }
}

/// Trigger-sense input on a [`MockBench`].
#[derive(Clone, Debug)]
pub struct MockTrigger {
    state: Rc<RefCell<BenchState>>,
}

impl TriggerInput for MockTrigger {
    type Error = ();

    fn is_asserted(&mut self) -> bool {
        self.state.borrow().sense
    }

    fn enable_rising_edge(&mut self, monitor: TriggerMonitor) -> Result<(), ()> {
        let mut state = self.state.borrow_mut();
        if state.enable_fault {
            return Err(());
        }
        state.monitor = Some(monitor);
        state.armed = true;
        state.live = true;
        state.record(BenchEventKind::InterruptEnabled);
        Ok(())
    }

    fn disable_interrupt(&mut self) -> Result<(), ()> {
        let mut state = self.state.borrow_mut();
        if !state.leaky_disable {
            state.monitor = None;
            state.armed = false;
            state.live = false;
        }
        state.record(BenchEventKind::InterruptDisabled);
        Ok(())
    }

    fn rearm(&mut self) -> Result<(), ()> {
        let mut state = self.state.borrow_mut();
        state.take_rearm()?;
        if state.armed {
            state.live = true;
        }
        Ok(())
    }
}

/// Delay on a [`MockBench`]: returns immediately after advancing the clock.
#[derive(Clone, Debug)]
pub struct MockDelay {
    state: Rc<RefCell<BenchState>>,
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.state.borrow_mut().advance(u64::from(ms));
    }
}

/// Mock temperature sensor.
///
/// # Example
///
/// ```rust
/// use yag_trigger::hal::MockThermometer;
/// use yag_trigger::traits::TemperatureSensor;
///
/// let mut sensor = MockThermometer::new(24.0);
/// assert_eq!(sensor.read_celsius(), Ok(24.0));
///
/// sensor.set_failing(true);
/// assert!(sensor.read_celsius().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockThermometer {
    /// Reported temperature.
    pub celsius: f32,
    /// When set, reads fail.
    pub failing: bool,
}

impl MockThermometer {
    /// Creates a sensor reporting `celsius`.
    pub fn new(celsius: f32) -> Self {
        Self {
            celsius,
            failing: false,
        }
    }

    /// Change the reported temperature.
    pub fn set_celsius(&mut self, celsius: f32) {
        self.celsius = celsius;
    }

    /// Make reads fail (or succeed again).
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl TemperatureSensor for MockThermometer {
    type Error = ();

    fn read_celsius(&mut self) -> Result<f32, ()> {
        if self.failing {
            Err(())
        } else {
            Ok(self.celsius)
        }
    }
}

// ============================================================================
// Transport Mock
// ============================================================================

/// Mock byte transport.
///
/// Queue bytes for the firmware to read and inspect what it wrote.
///
/// # Example
///
/// ```rust
/// use yag_trigger::hal::MockTransport;
/// use yag_trigger::traits::LineTransport;
///
/// let mut transport = MockTransport::new();
/// transport.queue_line("mode?");
///
/// let mut buf = [0u8; 16];
/// let n = transport.try_read(&mut buf).unwrap();
/// assert_eq!(&buf[..n], b"mode?\r\n");
///
/// transport.write_all(b"normal\r\n").unwrap();
/// assert_eq!(transport.sent_text(), "normal\r\n");
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Bytes waiting to be read.
    pub incoming: VecDeque<u8>,
    /// Bytes written so far.
    pub sent: Vec<u8>,
}

impl MockTransport {
    /// Creates an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw bytes.
    pub fn queue_bytes(&mut self, bytes: &[u8]) {
        self.incoming.extend(bytes.iter().copied());
    }

    /// Queue one line with a CR LF terminator.
    pub fn queue_line(&mut self, line: &str) {
        self.queue_bytes(line.as_bytes());
        self.queue_bytes(b"\r\n");
    }

    /// Everything written, as text (lossy).
    pub fn sent_text(&self) -> alloc::string::String {
        alloc::string::String::from_utf8_lossy(&self.sent).into_owned()
    }

    /// Drain and return everything written.
    pub fn take_sent(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.sent)
    }
}

impl LineTransport for MockTransport {
    type Error = ();

    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let n = buf.len().min(self.incoming.len());
        for (slot, byte) in buf.iter_mut().zip(self.incoming.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), ()> {
        self.sent.extend_from_slice(bytes);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeKind;
    use crate::monitor::TriggerLatch;
    use alloc::sync::Arc;

    fn armed_bench() -> (MockBench, Arc<TriggerLatch>) {
        let bench = MockBench::new();
        let latch = Arc::new(TriggerLatch::new());
        latch.set_mode(ModeKind::Spot);
        bench.relays().write(RelayId::Relay4, false).unwrap();
        bench
            .trigger()
            .enable_rising_edge(TriggerLatch::monitor(&latch))
            .unwrap();
        (bench, latch)
    }

    // =========================================================================
    // Clock and script
    // =========================================================================

    #[test]
    fn delay_advances_clock() {
        let bench = MockBench::new();
        bench.delay().delay_ms(250);
        bench.advance(50);
        assert_eq!(bench.now_ms(), 300);
    }

    #[test]
    fn script_replays_in_order() {
        let bench = MockBench::new();
        bench.release_at(30);
        bench.press_at(10);
        bench.advance(5);
        assert!(!bench.switch_pressed());
        bench.advance(10);
        assert!(bench.switch_pressed());
        bench.advance(100);
        assert!(!bench.switch_pressed());
    }

    // =========================================================================
    // Sense line
    // =========================================================================

    #[test]
    fn sense_isolated_without_relay4() {
        let bench = MockBench::new();
        bench.press();
        assert!(!bench.trigger().is_asserted());
        bench.relays().write(RelayId::Relay4, false).unwrap();
        assert!(bench.trigger().is_asserted());
    }

    #[test]
    fn edge_reaches_monitor() {
        let (bench, latch) = armed_bench();
        bench.press_at(20);
        bench.advance(10);
        assert!(!latch.is_latched());
        bench.advance(10);
        assert!(latch.is_latched());
        assert_eq!(bench.edges_delivered(), 1);
    }

    #[test]
    fn bounce_train_delivers_every_edge() {
        let (bench, _latch) = armed_bench();
        bench.bounce_at(5, 4);
        bench.advance(20);
        assert_eq!(bench.edges_delivered(), 4);
        assert!(bench.switch_pressed());
    }

    #[test]
    fn disabled_interrupt_drops_edges() {
        let (bench, latch) = armed_bench();
        bench.trigger().disable_interrupt().unwrap();
        bench.press();
        assert!(!latch.is_latched());
        assert!(!bench.interrupt_enabled());
    }

    #[test]
    fn one_shot_needs_rearm() {
        let (bench, latch) = armed_bench();
        bench.set_one_shot_interrupts(true);
        bench.bounce_at(1, 3);
        bench.advance(10);
        assert_eq!(bench.edges_delivered(), 1);
        assert!(!bench.interrupt_enabled());

        latch.clear();
        bench.trigger().rearm().unwrap();
        assert!(bench.interrupt_enabled());
        bench.release();
        bench.press();
        assert!(latch.is_latched());
    }

    #[test]
    fn relay4_glitch_fires_when_live() {
        let (bench, latch) = armed_bench();
        bench.set_relay4_glitch(true);
        bench.relays().write(RelayId::Relay4, true).unwrap();
        assert!(latch.is_latched());
    }

    #[test]
    fn failed_relay_write_is_transient() {
        let bench = MockBench::new();
        let mut relays = bench.relays();
        bench.fail_relay_write_after(1);
        assert_eq!(relays.write(RelayId::Relay1, false), Ok(()));
        assert_eq!(relays.write(RelayId::Relay2, false), Err(()));
        assert!(!bench.relay_energized(RelayId::Relay2));
        assert_eq!(relays.write(RelayId::Relay2, false), Ok(()));
        assert!(bench.relay_energized(RelayId::Relay2));
    }

    #[test]
    fn rearm_budget_runs_out() {
        let bench = MockBench::new();
        let mut trigger = bench.trigger();
        bench.fail_rearm_after(2);
        assert_eq!(trigger.rearm(), Ok(()));
        assert_eq!(trigger.rearm(), Ok(()));
        assert_eq!(trigger.rearm(), Err(()));
        assert_eq!(trigger.rearm(), Err(()));
        bench.clear_faults();
        assert_eq!(trigger.rearm(), Ok(()));
    }

    #[test]
    fn failed_enable_installs_nothing() {
        let bench = MockBench::new();
        let latch = Arc::new(TriggerLatch::new());
        bench.set_enable_fault(true);
        assert_eq!(
            bench
                .trigger()
                .enable_rising_edge(TriggerLatch::monitor(&latch)),
            Err(())
        );
        assert!(!bench.interrupt_enabled());
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    #[test]
    fn weld_pulses_pair_relay3_writes() {
        let bench = MockBench::new();
        let mut relays = bench.relays();
        relays.write(RelayId::Relay3, false).unwrap();
        bench.advance(40);
        relays.write(RelayId::Relay3, true).unwrap();
        bench.advance(10);
        relays.write(RelayId::Relay3, false).unwrap();
        bench.advance(5);
        assert_eq!(bench.weld_pulses(), vec![(0, 40), (50, 55)]);
    }

    #[test]
    fn relay_pattern_is_active_low() {
        let bench = MockBench::new();
        assert_eq!(bench.relay_pattern(), [false; 4]);
        bench.relays().write(RelayId::Relay2, false).unwrap();
        assert_eq!(bench.relay_pattern(), [false, true, false, false]);
    }

    // =========================================================================
    // MockThermometer / MockTransport Tests
    // =========================================================================

    #[test]
    fn thermometer_reads() {
        let mut sensor = MockThermometer::new(30.0);
        assert_eq!(sensor.read_celsius(), Ok(30.0));
        sensor.set_celsius(18.5);
        assert_eq!(sensor.read_celsius(), Ok(18.5));
    }

    #[test]
    fn transport_reads_in_chunks() {
        let mut transport = MockTransport::new();
        transport.queue_line("help");
        let mut buf = [0u8; 4];
        assert_eq!(transport.try_read(&mut buf), Ok(4));
        assert_eq!(&buf, b"help");
        assert_eq!(transport.try_read(&mut buf), Ok(2));
        assert_eq!(transport.try_read(&mut buf), Ok(0));
    }

    #[test]
    fn transport_take_sent() {
        let mut transport = MockTransport::new();
        transport.write_all(b"OK spot\r\n").unwrap();
        assert_eq!(transport.take_sent(), b"OK spot\r\n".to_vec());
        assert!(transport.sent.is_empty());
    }
}
